//! Pager derivation
//!
//! Pure function of the last received pagination metadata. Nothing here
//! slices or counts records locally.

use shared::PaginationData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub buttons: Vec<PageButton>,
    /// First shown record (1-based), 0 when there are none
    pub from: u64,
    /// Last shown record, 0 when there are none
    pub to: u64,
    pub total: u64,
}

impl PagerView {
    pub fn from_pagination(pagination: &PaginationData) -> Self {
        let buttons = (1..=pagination.num_of_pages)
            .map(|number| PageButton {
                number,
                active: number == pagination.current_page,
            })
            .collect();

        let (from, to) = if pagination.total == 0 || pagination.limit == 0 {
            (0, 0)
        } else {
            let limit = u64::from(pagination.limit);
            let page = u64::from(pagination.current_page.max(1));
            let to = (page * limit).min(pagination.total);
            ((page - 1) * limit + 1, to)
        };

        Self {
            buttons,
            from,
            to,
            total: pagination.total,
        }
    }

    pub fn active_page(&self) -> Option<u32> {
        self.buttons.iter().find(|b| b.active).map(|b| b.number)
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} employees",
            self.from, self.to, self.total
        )
    }
}
