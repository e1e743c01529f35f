//! Text rendering of screens and notices

use crate::core::{ListingSnapshot, Notice, PagerView, Route};
use shared::{EmployeeRecord, FilterOptions, FilterQuery};

const COLUMNS: [&str; 5] = ["Name", "Status", "Designation", "Department", "Role"];

pub fn notice(notice: &Notice) -> String {
    format!("[{}] {}", notice.level.as_str(), notice.message)
}

pub fn route_banner(route: Route) -> String {
    let title = match route {
        Route::Login => "Login",
        Route::Signup => "Sign up",
        Route::Employees => "Employees",
    };
    format!("== {title} ({}) ==", route.path())
}

fn cells(employee: &EmployeeRecord) -> [&str; 5] {
    [
        &employee.name,
        &employee.status,
        &employee.designation,
        &employee.department,
        &employee.role,
    ]
}

/// Fixed-width table with a header row
pub fn table(employees: &[EmployeeRecord]) -> String {
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for employee in employees {
        for (width, cell) in widths.iter_mut().zip(cells(employee)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let row = |values: [&str; 5]| {
        values
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(employees.len() + 2);
    lines.push(row(COLUMNS));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(employees.iter().map(|e| row(cells(e))));
    lines.join("\n")
}

/// Page buttons, active one in brackets
pub fn pager(view: &PagerView) -> String {
    let buttons = view
        .buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.number)
            } else {
                b.number.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("Pages: {buttons}\n{}", view.summary())
}

pub fn listing(snapshot: &ListingSnapshot) -> String {
    if snapshot.loading {
        return "Loading...".to_string();
    }
    let Some(pagination) = snapshot.pagination.as_ref() else {
        return "No data loaded yet.".to_string();
    };

    let mut out = String::new();
    if !snapshot.search.is_empty() || !snapshot.filter.is_empty() {
        out.push_str(&active_query(&snapshot.search, &snapshot.filter));
        out.push('\n');
    }
    if snapshot.employees.is_empty() {
        out.push_str("No employees found.");
    } else {
        out.push_str(&table(&snapshot.employees));
    }
    out.push('\n');
    out.push_str(&pager(&PagerView::from_pagination(pagination)));
    out
}

fn active_query(search: &str, filter: &FilterQuery) -> String {
    let mut parts = Vec::new();
    if !search.is_empty() {
        parts.push(format!("name~\"{search}\""));
    }
    if !filter.department.is_empty() {
        parts.push(format!("department={}", filter.department));
    }
    if !filter.designation.is_empty() {
        parts.push(format!("designation={}", filter.designation));
    }
    format!("Filtered by {}", parts.join(", "))
}

fn option_list(label: &str, options: &[String], selected: &str) -> String {
    let values = if options.is_empty() {
        "(none)".to_string()
    } else {
        options
            .iter()
            .map(|o| if o == selected { format!("*{o}") } else { o.clone() })
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{label}: {values}")
}

/// Filter panel with the staged selection starred
pub fn filter_panel(options: &FilterOptions, staged: &FilterQuery) -> String {
    [
        "-- Filter --".to_string(),
        option_list("Department", &options.department, &staged.department),
        option_list("Designation", &options.designation, &staged.designation),
        "(department/designation <value>, reset, apply, close)".to_string(),
    ]
    .join("\n")
}
