//! Employee listing controller
//!
//! Owns the search text, requested page, active filter, loading flag and
//! the last received page of employees. Runs as a single task that
//! `select!`s over UI commands, the debounce deadline and fetch
//! completions:
//!
//! - search edits and page clicks re-arm an 800 ms trailing debounce;
//! - an applied filter fetches immediately, leaving any armed timer alone;
//! - fetches run as their own tasks and are applied in completion order,
//!   so a slow stale response can overwrite a newer one (no cancellation
//!   of superseded requests).
//!
//! The page parameter is decided once per fetch by [`ListingState::anchor`].

use super::debounce::Debouncer;
use super::error::{DeskError, DeskResult};
use super::events::UiEvents;
use super::route::expire_session;
use shared::{EmployeeListResponse, EmployeeRecord, FetchAnchor, FilterQuery, ListQuery, PaginationData};
use staff_client::{ClientResult, DirectoryApi, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Most recent input change not yet reflected by a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingChange {
    #[default]
    None,
    /// Search text or filter changed: the next fetch restarts at page 1
    QueryChanged,
    /// Only a page button was clicked: the next fetch asks for that page
    PageClicked(u32),
}

/// What the screen shows, published after every state change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingSnapshot {
    pub search: String,
    pub page: u32,
    pub filter: FilterQuery,
    pub loading: bool,
    pub employees: Vec<EmployeeRecord>,
    pub pagination: Option<PaginationData>,
}

/// Commands accepted by the controller task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingCommand {
    Search(String),
    GoToPage(u32),
    ApplyFilter(FilterQuery),
    Refresh,
}

// ============================================================================
// State
// ============================================================================

/// Synchronous listing state; the controller task drives it
#[derive(Debug, Clone)]
pub struct ListingState {
    search: String,
    page: u32,
    filter: FilterQuery,
    pending: PendingChange,
    loading: bool,
    employees: Vec<EmployeeRecord>,
    pagination: Option<PaginationData>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            filter: FilterQuery::default(),
            pending: PendingChange::None,
            loading: false,
            employees: Vec::new(),
            pagination: None,
        }
    }
}

impl ListingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filter(&self) -> &FilterQuery {
        &self.filter
    }

    pub fn pending(&self) -> PendingChange {
        self.pending
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn pagination(&self) -> Option<&PaginationData> {
        self.pagination.as_ref()
    }

    /// Returns whether the text actually changed
    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.search {
            return false;
        }
        self.search = text;
        self.pending = PendingChange::QueryChanged;
        true
    }

    /// Returns whether the page actually changed
    ///
    /// Page 0, or a page past the last known one, is rejected. A pending
    /// search or filter change is kept: the next fetch still restarts at
    /// page 1 of the new result set.
    pub fn click_page(&mut self, page: u32) -> DeskResult<bool> {
        let last_page = self.pagination.map(|p| p.num_of_pages);
        if page == 0 || last_page.is_some_and(|last| page > last) {
            return Err(DeskError::PageOutOfRange(page));
        }
        if page == self.page {
            return Ok(false);
        }
        self.page = page;
        if self.pending != PendingChange::QueryChanged {
            self.pending = PendingChange::PageClicked(page);
        }
        Ok(true)
    }

    pub fn apply_filter(&mut self, filter: FilterQuery) {
        self.filter = filter;
        self.pending = PendingChange::QueryChanged;
    }

    /// Page decision for the next fetch
    pub fn anchor(&self) -> FetchAnchor {
        match self.pending {
            PendingChange::QueryChanged => FetchAnchor::ResetToFirstPage,
            PendingChange::PageClicked(page) => FetchAnchor::Page(page),
            PendingChange::None => FetchAnchor::Page(self.page),
        }
    }

    /// Compose the request, consume the pending change, raise loading
    pub fn begin_fetch(&mut self) -> ListQuery {
        let query = ListQuery::new(self.filter.clone(), self.search.clone(), self.anchor());
        self.pending = PendingChange::None;
        self.loading = true;
        query
    }

    /// Take over the server's page; the server is the source of truth
    pub fn apply_page(&mut self, response: EmployeeListResponse) {
        self.loading = false;
        self.page = response.pagination_data.current_page;
        self.employees = response.employee_data;
        self.pagination = Some(response.pagination_data);
    }

    /// Lower loading without touching the displayed data
    pub fn fail_fetch(&mut self) {
        self.loading = false;
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        ListingSnapshot {
            search: self.search.clone(),
            page: self.page,
            filter: self.filter.clone(),
            loading: self.loading,
            employees: self.employees.clone(),
            pagination: self.pagination,
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

struct FetchCompletion {
    query: ListQuery,
    result: ClientResult<EmployeeListResponse>,
}

/// Handle to a running listing controller
#[derive(Debug, Clone)]
pub struct ListingHandle {
    commands: mpsc::UnboundedSender<ListingCommand>,
    snapshots: watch::Receiver<ListingSnapshot>,
    shutdown: CancellationToken,
}

impl ListingHandle {
    fn send(&self, command: ListingCommand) -> DeskResult<()> {
        self.commands
            .send(command)
            .map_err(|_| DeskError::ListingStopped)
    }

    /// Search field edit (one call per keystroke is fine)
    pub fn set_search(&self, text: impl Into<String>) -> DeskResult<()> {
        self.send(ListingCommand::Search(text.into()))
    }

    /// Page button click
    pub fn go_to_page(&self, page: u32) -> DeskResult<()> {
        self.send(ListingCommand::GoToPage(page))
    }

    /// Commit a filter and fetch right away
    pub fn apply_filter(&self, filter: FilterQuery) -> DeskResult<()> {
        self.send(ListingCommand::ApplyFilter(filter))
    }

    /// Fetch right away with the current inputs
    pub fn refresh(&self) -> DeskResult<()> {
        self.send(ListingCommand::Refresh)
    }

    /// Latest published state
    pub fn snapshot(&self) -> ListingSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every published state
    pub fn subscribe(&self) -> watch::Receiver<ListingSnapshot> {
        self.snapshots.clone()
    }

    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

pub struct ListingController {
    api: Arc<dyn DirectoryApi>,
    session: Arc<dyn SessionStore>,
    events: UiEvents,
    state: ListingState,
    debouncer: Debouncer,
    snapshots: watch::Sender<ListingSnapshot>,
}

impl ListingController {
    /// Start the controller task
    ///
    /// Mounting counts as the first input change, so the initial load is
    /// debounced like any other.
    pub fn spawn(
        api: Arc<dyn DirectoryApi>,
        session: Arc<dyn SessionStore>,
        events: UiEvents,
        quiet_period: Duration,
    ) -> (ListingHandle, JoinHandle<()>) {
        let state = ListingState::new();
        let (snapshots, snapshot_rx) = watch::channel(state.snapshot());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let mut controller = Self {
            api,
            session,
            events,
            state,
            debouncer: Debouncer::new(quiet_period),
            snapshots,
        };
        controller.debouncer.schedule();

        let task = tokio::spawn(controller.run(command_rx, shutdown.clone()));
        let handle = ListingHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            shutdown,
        };
        (handle, task)
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<ListingCommand>,
        shutdown: CancellationToken,
    ) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FetchCompletion>();
        tracing::debug!(quiet_ms = self.debouncer.quiet_period().as_millis() as u64, "Listing controller started");

        loop {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                _ = shutdown.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command, &done_tx),
                    None => break,
                },
                _ = Debouncer::wait(deadline) => {
                    self.debouncer.cancel();
                    self.start_fetch(&done_tx);
                }
                Some(completion) = done_rx.recv() => self.finish_fetch(completion),
            }
        }

        tracing::debug!("Listing controller stopped");
    }

    fn handle_command(
        &mut self,
        command: ListingCommand,
        done_tx: &mpsc::UnboundedSender<FetchCompletion>,
    ) {
        match command {
            ListingCommand::Search(text) => {
                if self.state.set_search(text) {
                    self.debouncer.schedule();
                    self.publish();
                }
            }
            ListingCommand::GoToPage(page) => match self.state.click_page(page) {
                Ok(true) => {
                    self.debouncer.schedule();
                    self.publish();
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(page, "Page click rejected");
                    self.events.warn(e.to_string());
                }
            },
            ListingCommand::ApplyFilter(filter) => {
                self.state.apply_filter(filter);
                self.start_fetch(done_tx);
            }
            ListingCommand::Refresh => self.start_fetch(done_tx),
        }
    }

    fn start_fetch(&mut self, done_tx: &mpsc::UnboundedSender<FetchCompletion>) {
        let query = self.state.begin_fetch();
        self.publish();

        tracing::debug!(
            search = %query.name,
            department = %query.filter.department,
            designation = %query.filter.designation,
            page = ?query.page(),
            "Fetching employees"
        );

        let api = self.api.clone();
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let result = api.list_employees(&query).await;
            // Receiver gone means the screen was closed
            let _ = done_tx.send(FetchCompletion { query, result });
        });
    }

    fn finish_fetch(&mut self, completion: FetchCompletion) {
        match completion.result {
            Ok(page) => {
                tracing::debug!(
                    page = page.pagination_data.current_page,
                    rows = page.employee_data.len(),
                    total = page.pagination_data.total,
                    "Employee page received"
                );
                self.state.apply_page(page);
            }
            Err(e) if e.is_unauthorized() => {
                self.state.fail_fetch();
                expire_session(self.session.as_ref(), &self.events);
            }
            Err(e) => {
                tracing::error!(error = %e, requested_page = ?completion.query.page(), "Employee fetch failed");
                self.state.fail_fetch();
                self.events.error(format!("Failed to load employees: {e}"));
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }
}
