//! Shared types for the staff directory
//!
//! Wire DTOs, list query composition and credential validation used by
//! both the HTTP client and the desk front-end.

pub mod client;
pub mod models;
pub mod request;
pub mod response;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use models::EmployeeRecord;
pub use request::{FetchAnchor, FilterQuery, ListQuery};
pub use response::{EmployeeListEnvelope, EmployeeListResponse, FilterOptions, PaginationData};
pub use validation::ValidationError;
