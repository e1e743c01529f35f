//! CSV export of the displayed employees
//!
//! Only the page currently on screen is exported, never the full result
//! set.

use super::error::DeskResult;
use shared::EmployeeRecord;
use std::path::{Path, PathBuf};

pub const EXPORT_FILE_NAME: &str = "employees.csv";

pub const CSV_HEADER: [&str; 5] = ["Name", "Status", "Designation", "Department", "Role"];

/// Spreadsheet formula triggers get a leading quote
fn neutralize_formula(value: &str) -> String {
    let trimmed = value.trim_start();
    match trimmed.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{value}"),
        _ => value.to_string(),
    }
}

fn csv_escape(value: &str) -> String {
    let safe = neutralize_formula(value);
    if safe.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", safe.replace('"', "\"\""))
    } else {
        safe
    }
}

fn csv_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(csv_escape)
        .collect::<Vec<_>>()
        .join(",")
}

/// Header row followed by one row per employee
pub fn employees_to_csv(employees: &[EmployeeRecord]) -> String {
    let mut lines = Vec::with_capacity(employees.len() + 1);
    lines.push(csv_line(CSV_HEADER));
    for employee in employees {
        lines.push(csv_line([
            employee.name.as_str(),
            employee.status.as_str(),
            employee.designation.as_str(),
            employee.department.as_str(),
            employee.role.as_str(),
        ]));
    }
    lines.join("\n")
}

/// `employees.csv` inside `dir`
pub fn default_export_path(dir: &Path) -> PathBuf {
    dir.join(EXPORT_FILE_NAME)
}

/// Write the CSV to `path`, creating parent directories
pub fn export_csv(employees: &[EmployeeRecord], path: &Path) -> DeskResult<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, employees_to_csv(employees))?;
    tracing::info!(path = %path.display(), rows = employees.len(), "Employees exported");
    Ok(path.to_path_buf())
}
