//! Staff Client - HTTP client for the staff directory API
//!
//! Provides typed calls to the directory REST API and the session store
//! the bearer token lives in.

pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{DirectoryApi, NetworkDirectoryApi};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};

// Re-export shared types for convenience
pub use shared::{
    EmployeeListResponse, EmployeeRecord, FetchAnchor, FilterOptions, FilterQuery, ListQuery,
    LoginRequest, LoginResponse, PaginationData, RegisterRequest, RegisterResponse,
};
