//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee row as listed by `GET /employee/all`
///
/// Records carry no identity beyond their list position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub role: String,
}

impl EmployeeRecord {
    pub fn new(
        name: impl Into<String>,
        status: impl Into<String>,
        designation: impl Into<String>,
        department: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            designation: designation.into(),
            department: department.into(),
            role: role.into(),
        }
    }
}
