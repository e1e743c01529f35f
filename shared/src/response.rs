//! API Response types
//!
//! Bodies returned by the `/employee` endpoints.

use serde::{Deserialize, Serialize};

use crate::models::EmployeeRecord;

/// Error marker the list endpoint uses for an expired or missing token
pub const UNAUTHORIZED_MARKER: &str = "Unauthorized";

/// Pagination metadata
///
/// Entirely server-supplied. `num_of_pages == ceil(total / limit)` is
/// assumed, never enforced on this side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationData {
    /// Current page number (1-based)
    pub current_page: u32,
    /// Items per page
    pub limit: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub num_of_pages: u32,
}

/// One page of the employee listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListResponse {
    pub employee_data: Vec<EmployeeRecord>,
    pub pagination_data: PaginationData,
}

/// Raw body of `GET /employee/all`
///
/// The same endpoint answers either with data or with `{ "error": ... }`,
/// so every field is optional here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListEnvelope {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub employee_data: Option<Vec<EmployeeRecord>>,
    #[serde(default)]
    pub pagination_data: Option<PaginationData>,
}

impl EmployeeListEnvelope {
    /// True when the body signals an authorization failure
    ///
    /// Takes precedence over any data present in the same body.
    pub fn is_unauthorized(&self) -> bool {
        self.error.as_deref() == Some(UNAUTHORIZED_MARKER)
    }

    /// Split into the page payload, if both parts are present
    pub fn into_page(self) -> Option<EmployeeListResponse> {
        Some(EmployeeListResponse {
            employee_data: self.employee_data?,
            pagination_data: self.pagination_data?,
        })
    }
}

/// Valid filter values from `GET /employee/allfilter`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub designation: Vec<String>,
    #[serde(default)]
    pub department: Vec<String>,
}
