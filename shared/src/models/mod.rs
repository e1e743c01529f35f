//! Data models
//!
//! Read-only records as served by the directory API.

pub mod employee;

// Re-exports
pub use employee::*;
