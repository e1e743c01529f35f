//! Filter panel
//!
//! Edits a staged copy of the listing filter. Nothing reaches the listing
//! until [`FilterPanel::apply`]; staging alone never fetches.

use super::error::{DeskError, DeskResult};
use super::events::UiEvents;
use super::listing::ListingHandle;
use super::route::expire_session;
use shared::{FilterOptions, FilterQuery};
use staff_client::{DirectoryApi, SessionStore};
use std::sync::Arc;

pub struct FilterPanel {
    api: Arc<dyn DirectoryApi>,
    session: Arc<dyn SessionStore>,
    events: UiEvents,
    options: FilterOptions,
    options_loaded: bool,
    staged: Option<FilterQuery>,
}

impl FilterPanel {
    pub fn new(api: Arc<dyn DirectoryApi>, session: Arc<dyn SessionStore>, events: UiEvents) -> Self {
        Self {
            api,
            session,
            events,
            options: FilterOptions::default(),
            options_loaded: false,
            staged: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.staged.is_some()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Staged filter while the panel is open
    pub fn staged(&self) -> Option<&FilterQuery> {
        self.staged.as_ref()
    }

    /// Open the panel on a copy of `active`
    ///
    /// Options are fetched on the first successful open and kept after that.
    /// A failed fetch leaves the lists empty and is retried on the next open.
    pub async fn open(&mut self, active: &FilterQuery) -> &FilterOptions {
        if !self.options_loaded {
            match self.api.filter_options().await {
                Ok(options) => {
                    tracing::debug!(
                        departments = options.department.len(),
                        designations = options.designation.len(),
                        "Filter options loaded"
                    );
                    self.options = options;
                    self.options_loaded = true;
                }
                Err(e) if e.is_unauthorized() => {
                    expire_session(self.session.as_ref(), &self.events);
                    self.staged = None;
                    return &self.options;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load filter options");
                    self.events.error(format!("Failed to load filter options: {e}"));
                }
            }
        }
        self.staged = Some(active.clone());
        &self.options
    }

    fn staged_mut(&mut self) -> DeskResult<&mut FilterQuery> {
        self.staged.as_mut().ok_or(DeskError::PanelClosed)
    }

    fn check_option(&self, field: &'static str, value: &str, allowed: &[String]) -> DeskResult<()> {
        if !self.is_open() {
            return Err(DeskError::PanelClosed);
        }
        if value.is_empty() || allowed.iter().any(|option| option == value) {
            Ok(())
        } else {
            Err(DeskError::UnknownOption {
                field,
                value: value.to_string(),
            })
        }
    }

    /// Stage a department; empty clears it
    pub fn select_department(&mut self, value: impl Into<String>) -> DeskResult<()> {
        let value = value.into();
        self.check_option("department", &value, &self.options.department)?;
        self.staged_mut()?.department = value;
        Ok(())
    }

    /// Stage a designation; empty clears it
    pub fn select_designation(&mut self, value: impl Into<String>) -> DeskResult<()> {
        let value = value.into();
        self.check_option("designation", &value, &self.options.designation)?;
        self.staged_mut()?.designation = value;
        Ok(())
    }

    /// Clear the staged fields, panel stays open
    pub fn reset(&mut self) -> DeskResult<()> {
        self.staged_mut()?.clear();
        Ok(())
    }

    /// Commit the staged filter to the listing and close
    pub fn apply(&mut self, listing: &ListingHandle) -> DeskResult<FilterQuery> {
        let staged = self.staged.take().ok_or(DeskError::PanelClosed)?;
        tracing::debug!(
            department = %staged.department,
            designation = %staged.designation,
            "Applying filter"
        );
        listing.apply_filter(staged.clone())?;
        Ok(staged)
    }

    /// Close without applying
    pub fn close(&mut self) {
        self.staged = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{NoticeLevel, UiEvent};
    use crate::core::listing::ListingController;
    use crate::core::route::Route;
    use crate::core::testing::{FakeApi, page_of};
    use staff_client::{ClientError, MemorySessionStore};
    use std::time::Duration;
    use tokio::time::sleep;

    fn panel(api: &Arc<FakeApi>, session: &Arc<MemorySessionStore>, events: &UiEvents) -> FilterPanel {
        FilterPanel::new(api.clone(), session.clone(), events.clone())
    }

    #[tokio::test]
    async fn test_options_fetched_once() {
        let api = Arc::new(FakeApi::new());
        let session = Arc::new(MemorySessionStore::with_token("t"));
        let (events, _rx) = UiEvents::channel();
        let mut panel = panel(&api, &session, &events);

        let options = panel.open(&FilterQuery::default()).await;
        assert_eq!(options.department, vec!["Ops", "R&D"]);
        panel.close();
        panel.open(&FilterQuery::default()).await;

        assert_eq!(api.options_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_options_are_retried() {
        let api = Arc::new(FakeApi::new());
        api.set_options(Err(ClientError::InvalidResponse("down".into())));
        let session = Arc::new(MemorySessionStore::with_token("t"));
        let (events, mut rx) = UiEvents::channel();
        let mut panel = panel(&api, &session, &events);

        assert!(panel.open(&FilterQuery::default()).await.department.is_empty());
        assert!(panel.is_open());
        match rx.try_recv().unwrap() {
            UiEvent::Notice(notice) => assert_eq!(notice.level, NoticeLevel::Error),
            other => panic!("unexpected event: {other:?}"),
        }

        api.set_options(Ok(FilterOptions {
            designation: vec!["Dev".into()],
            department: vec![],
        }));
        panel.open(&FilterQuery::default()).await;
        assert_eq!(api.options_calls(), 2);
        assert_eq!(panel.options().designation, vec!["Dev"]);
    }

    #[tokio::test]
    async fn test_unauthorized_options_expire_session() {
        let api = Arc::new(FakeApi::new());
        api.set_options(Err(ClientError::Unauthorized));
        let session = Arc::new(MemorySessionStore::with_token("t"));
        let (events, mut rx) = UiEvents::channel();
        let mut panel = panel(&api, &session, &events);

        panel.open(&FilterQuery::default()).await;

        assert!(!panel.is_open());
        assert!(!session.is_authenticated());
        rx.try_recv().unwrap();
        assert_eq!(rx.try_recv().unwrap(), UiEvent::Navigate(Route::Login));
    }

    #[tokio::test]
    async fn test_selection_validation_and_staging() {
        let api = Arc::new(FakeApi::new());
        let session = Arc::new(MemorySessionStore::with_token("t"));
        let (events, _rx) = UiEvents::channel();
        let mut panel = panel(&api, &session, &events);

        assert!(matches!(panel.select_department("Ops"), Err(DeskError::PanelClosed)));

        panel.open(&FilterQuery::new("", "Lead")).await;
        panel.select_department("Ops").unwrap();
        assert!(matches!(
            panel.select_designation("Chef"),
            Err(DeskError::UnknownOption { field: "designation", .. })
        ));
        assert_eq!(panel.staged(), Some(&FilterQuery::new("Ops", "Lead")));

        panel.reset().unwrap();
        assert!(panel.is_open());
        assert!(panel.staged().unwrap().is_empty());

        panel.close();
        assert_eq!(panel.staged(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_staging_never_fetches_and_apply_does() {
        let api = Arc::new(FakeApi::with_page(page_of(8, 1, 8, 20, 3)));
        let session = Arc::new(MemorySessionStore::with_token("t"));
        let (events, _rx) = UiEvents::channel();
        let quiet = Duration::from_millis(800);
        let (listing, _task) = ListingController::spawn(api.clone(), session.clone(), events.clone(), quiet);
        sleep(quiet + Duration::from_millis(100)).await;
        assert_eq!(api.list_calls().len(), 1);

        let mut panel = panel(&api, &session, &events);
        panel.open(&listing.snapshot().filter).await;
        panel.select_department("R&D").unwrap();
        panel.select_designation("Dev").unwrap();
        panel.reset().unwrap();
        panel.select_department("Ops").unwrap();
        sleep(quiet * 3).await;
        assert_eq!(api.list_calls().len(), 1);

        let applied = panel.apply(&listing).unwrap();
        assert_eq!(applied, FilterQuery::new("Ops", ""));
        assert!(!panel.is_open());
        sleep(Duration::from_millis(10)).await;

        let calls = api.list_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].filter, FilterQuery::new("Ops", ""));
        assert_eq!(calls[1].page(), None);
    }
}
