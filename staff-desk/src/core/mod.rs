//! Core module for the staff desk
//!
//! Headless screens and their building blocks:
//! - ListingController: debounced, paginated employee listing
//! - FilterPanel: staged department/designation filter
//! - LoginForm / SignupForm: credential screens
//! - RouteGuard: session-token gate for protected routes
//! - export / pager: CSV output and pager derivation

pub mod auth;
pub mod debounce;
pub mod error;
pub mod events;
pub mod export;
pub mod filter_panel;
pub mod listing;
pub mod pager;
pub mod route;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthContext, LoginForm, LoginOutcome, SignupForm, SignupOutcome};
pub use debounce::Debouncer;
pub use error::{DeskError, DeskResult};
pub use events::{Notice, NoticeLevel, UiEvent, UiEvents};
pub use export::{default_export_path, employees_to_csv, export_csv};
pub use filter_panel::FilterPanel;
pub use listing::{ListingCommand, ListingController, ListingHandle, ListingSnapshot, ListingState};
pub use pager::{PageButton, PagerView};
pub use route::{GuardOutcome, Route, RouteGuard, expire_session};
