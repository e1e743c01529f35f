//! Console front-end
//!
//! Reads commands from stdin, renders listing snapshots and notices, and
//! follows navigation requests through the route guard.

pub mod commands;
pub mod render;

use crate::config::DeskConfig;
use crate::core::{
    AuthContext, DeskResult, FilterPanel, ListingController, ListingHandle, ListingSnapshot,
    LoginForm, LoginOutcome, Route, RouteGuard, SignupForm, SignupOutcome, UiEvent, UiEvents,
    default_export_path, export_csv,
};
use commands::Command;
use staff_client::{DirectoryApi, SessionStore};
use std::future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Listing screen resources, alive while the route is shown
struct ListingScreen {
    handle: ListingHandle,
    task: JoinHandle<()>,
    panel: FilterPanel,
}

pub struct Console {
    config: DeskConfig,
    api: Arc<dyn DirectoryApi>,
    session: Arc<dyn SessionStore>,
    events: UiEvents,
    guard: RouteGuard,
    auth: AuthContext,
    route: Route,
    listing: Option<ListingScreen>,
    snapshots: Option<watch::Receiver<ListingSnapshot>>,
}

impl Console {
    pub fn new(
        config: DeskConfig,
        api: Arc<dyn DirectoryApi>,
        session: Arc<dyn SessionStore>,
        events: UiEvents,
    ) -> Self {
        let auth = AuthContext::new(api.clone(), session.clone(), events.clone())
            .with_redirect_delay(config.redirect_delay());
        Self {
            guard: RouteGuard::new(session.clone()),
            config,
            api,
            session,
            events,
            auth,
            route: Route::Login,
            listing: None,
            snapshots: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Run until `quit` or end of input
    pub async fn run(mut self, mut ui_events: mpsc::UnboundedReceiver<UiEvent>) -> DeskResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.enter(Route::Employees);

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.handle_line(&line).await == Flow::Quit {
                            break;
                        }
                    }
                    None => break,
                },
                Some(event) = ui_events.recv() => self.handle_event(event),
                Some(snapshot) = next_snapshot(&mut self.snapshots) => {
                    println!("{}", render::listing(&snapshot));
                }
            }
        }

        self.leave_listing();
        tracing::info!("Console closed");
        Ok(())
    }

    /// Switch to `route`, or to wherever the guard sends us instead
    pub fn enter(&mut self, route: Route) {
        let route = self.guard.resolve(route);
        if route == Route::Employees {
            if self.listing.is_none() {
                self.start_listing();
            }
        } else {
            self.leave_listing();
        }
        self.route = route;
        println!("{}", render::route_banner(route));
        if route == Route::Signup {
            let form = SignupForm::prefilled(self.session.as_ref());
            if form.remember_me {
                println!("Remembered username: {}", form.username);
            }
        }
        println!("{}", commands::help(route));
    }

    fn start_listing(&mut self) {
        let (handle, task) = ListingController::spawn(
            self.api.clone(),
            self.session.clone(),
            self.events.clone(),
            self.config.debounce(),
        );
        self.snapshots = Some(handle.subscribe());
        let panel = FilterPanel::new(self.api.clone(), self.session.clone(), self.events.clone());
        self.listing = Some(ListingScreen { handle, task, panel });
    }

    fn leave_listing(&mut self) {
        if let Some(screen) = self.listing.take() {
            screen.handle.shutdown();
            // The task only waits on channels; it ends right after the cancel
            drop(screen.task);
        }
        self.snapshots = None;
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Notice(notice) => println!("{}", render::notice(&notice)),
            UiEvent::Navigate(route) => self.enter(route),
        }
    }

    pub async fn handle_line(&mut self, line: &str) -> Flow {
        match commands::parse(self.route, line) {
            Ok(Some(command)) => self.dispatch(command).await,
            Ok(None) => Flow::Continue,
            Err(e) => {
                self.events.warn(e.to_string());
                Flow::Continue
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> Flow {
        let result = match command {
            Command::Quit => return Flow::Quit,
            Command::Help => {
                println!("{}", commands::help(self.route));
                Ok(())
            }
            Command::Login {
                username,
                password,
                remember_me,
            } => self.login(username, password, remember_me).await,
            Command::Signup => {
                self.enter(Route::Signup);
                Ok(())
            }
            Command::Register {
                username,
                password,
                confirm,
                remember_me,
            } => {
                self.register(username, password, confirm, remember_me).await;
                Ok(())
            }
            Command::Back => {
                self.enter(Route::Login);
                Ok(())
            }
            Command::Logout => self.auth.logout(),
            command => self.listing_command(command).await,
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Command failed");
            self.events.error(e.to_string());
        }
        Flow::Continue
    }

    async fn login(&mut self, username: String, password: String, remember_me: bool) -> DeskResult<()> {
        let mut form = LoginForm::new(username, password).with_remember_me(remember_me);
        if let LoginOutcome::Invalid(_) = form.submit(&self.auth).await?
            && let Some(message) = form.error_message()
        {
            println!("{message}");
        }
        Ok(())
    }

    async fn register(
        &mut self,
        username: Option<String>,
        password: String,
        confirm: String,
        remember_me: bool,
    ) {
        let prefilled = SignupForm::prefilled(self.session.as_ref());
        let username = match username {
            Some(username) => username,
            None if prefilled.remember_me => prefilled.username,
            None => {
                self.events.warn("No remembered username, type it before the password");
                return;
            }
        };
        let mut form = SignupForm::new(username, password, confirm).with_remember_me(remember_me);
        if let SignupOutcome::Invalid(_) = form.submit(&self.auth).await
            && let Some(message) = form.error_message()
        {
            println!("{message}");
        }
    }

    async fn listing_command(&mut self, command: Command) -> DeskResult<()> {
        let Some(screen) = self.listing.as_mut() else {
            return Ok(());
        };
        match command {
            Command::Search(text) => screen.handle.set_search(text),
            Command::Page(page) => screen.handle.go_to_page(page),
            Command::Refresh => screen.handle.refresh(),
            Command::Filter => {
                let active = screen.handle.snapshot().filter;
                screen.panel.open(&active).await;
                print_panel(&screen.panel);
                Ok(())
            }
            Command::Department(value) => {
                screen.panel.select_department(value)?;
                print_panel(&screen.panel);
                Ok(())
            }
            Command::Designation(value) => {
                screen.panel.select_designation(value)?;
                print_panel(&screen.panel);
                Ok(())
            }
            Command::Reset => {
                screen.panel.reset()?;
                print_panel(&screen.panel);
                Ok(())
            }
            Command::Apply => screen.panel.apply(&screen.handle).map(|_| ()),
            Command::Close => {
                screen.panel.close();
                Ok(())
            }
            Command::Export(path) => {
                let employees = screen.handle.snapshot().employees;
                let path: PathBuf = path.unwrap_or_else(|| default_export_path(&self.config.export_dir));
                let written = export_csv(&employees, &path)?;
                self.events.success(format!(
                    "Exported {} employees to {}",
                    employees.len(),
                    written.display()
                ));
                Ok(())
            }
            other => {
                tracing::debug!(?other, "Command ignored on listing");
                Ok(())
            }
        }
    }
}

fn print_panel(panel: &FilterPanel) {
    if let Some(staged) = panel.staged() {
        println!("{}", render::filter_panel(panel.options(), staged));
    }
}

/// Next published snapshot; pending while no listing is shown
async fn next_snapshot(
    receiver: &mut Option<watch::Receiver<ListingSnapshot>>,
) -> Option<ListingSnapshot> {
    match receiver {
        Some(rx) => {
            if rx.changed().await.is_err() {
                future::pending::<()>().await;
            }
            Some(rx.borrow_and_update().clone())
        }
        None => future::pending().await,
    }
}
