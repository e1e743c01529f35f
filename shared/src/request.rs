//! Request types for the shared crate
//!
//! Composition of the `GET /employee/all` query string.

use serde::{Deserialize, Serialize};

/// Active filter of the employee listing
///
/// An empty field means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub designation: String,
}

impl FilterQuery {
    pub fn new(department: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            designation: designation.into(),
        }
    }

    /// True when neither field constrains the listing
    pub fn is_empty(&self) -> bool {
        self.department.is_empty() && self.designation.is_empty()
    }

    /// Clear both fields
    pub fn clear(&mut self) {
        self.department.clear();
        self.designation.clear();
    }
}

/// Which page a list fetch asks for
///
/// `ResetToFirstPage` omits the `page` parameter, the server then answers
/// with page 1 of the (new) result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchAnchor {
    ResetToFirstPage,
    Page(u32),
}

impl FetchAnchor {
    /// Page parameter to send, if any
    pub fn page(self) -> Option<u32> {
        match self {
            FetchAnchor::ResetToFirstPage => None,
            FetchAnchor::Page(page) => Some(page),
        }
    }
}

/// Fully composed list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: FilterQuery,
    pub name: String,
    pub anchor: FetchAnchor,
}

impl ListQuery {
    pub fn new(filter: FilterQuery, name: impl Into<String>, anchor: FetchAnchor) -> Self {
        Self {
            filter,
            name: name.into(),
            anchor,
        }
    }

    /// Query parameters in wire order
    ///
    /// Order is fixed: `department`, `designation`, `name`, `page`. Empty
    /// values are left out entirely.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if !self.filter.department.is_empty() {
            pairs.push(("department", self.filter.department.clone()));
        }
        if !self.filter.designation.is_empty() {
            pairs.push(("designation", self.filter.designation.clone()));
        }
        if !self.name.is_empty() {
            pairs.push(("name", self.name.clone()));
        }
        if let Some(page) = self.anchor.page() {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    /// Requested page, `None` when the server default applies
    pub fn page(&self) -> Option<u32> {
        self.anchor.page()
    }
}
