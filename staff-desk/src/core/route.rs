//! Routes and the session guard
//!
//! The guard only checks that a token is present. A present token can
//! still be rejected by the server; that case is handled where the 401
//! arrives, through [`expire_session`].

use super::events::UiEvents;
use staff_client::SessionStore;
use std::sync::Arc;

/// Notice shown when the server rejects the session
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Employees,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Signup => "/signup",
            Route::Employees => "/employee",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Login),
            "/signup" => Some(Route::Signup),
            "/employee" => Some(Route::Employees),
            _ => None,
        }
    }

    /// Routes that need a session token
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Employees)
    }
}

/// Result of guarding a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<T> {
    Render(T),
    Redirect(Route),
}

impl<T> GuardOutcome<T> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardOutcome::Redirect(_))
    }
}

/// "Render children if authenticated, else redirect to login"
#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<dyn SessionStore>,
}

impl RouteGuard {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Build the guarded value for `route`, or redirect to login
    ///
    /// `render` is only invoked when access is granted.
    pub fn check<T>(&self, route: Route, render: impl FnOnce() -> T) -> GuardOutcome<T> {
        if route.is_protected() && !self.session.is_authenticated() {
            tracing::debug!(path = route.path(), "No session, redirecting to login");
            return GuardOutcome::Redirect(Route::Login);
        }
        GuardOutcome::Render(render())
    }

    /// Route that actually gets shown when `route` is requested
    pub fn resolve(&self, route: Route) -> Route {
        match self.check(route, || route) {
            GuardOutcome::Render(route) | GuardOutcome::Redirect(route) => route,
        }
    }
}

/// Server-signaled unauthorized: drop the token, tell the user, go to login
pub fn expire_session(session: &dyn SessionStore, events: &UiEvents) {
    if let Err(e) = session.clear_token() {
        tracing::error!(error = %e, "Failed to clear session token");
    }
    tracing::warn!("Session rejected by server");
    events.error(SESSION_EXPIRED_MESSAGE);
    events.navigate(Route::Login);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{NoticeLevel, UiEvent};
    use staff_client::MemorySessionStore;

    #[test]
    fn test_paths_round_trip() {
        for route in [Route::Login, Route::Signup, Route::Employees] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_guard_redirects_without_token() {
        let guard = RouteGuard::new(Arc::new(MemorySessionStore::new()));
        let mut rendered = false;
        let outcome = guard.check(Route::Employees, || rendered = true);
        assert_eq!(outcome, GuardOutcome::Redirect(Route::Login));
        assert!(!rendered);
        assert_eq!(guard.resolve(Route::Employees), Route::Login);
    }

    #[test]
    fn test_guard_renders_with_token() {
        let guard = RouteGuard::new(Arc::new(MemorySessionStore::with_token("t")));
        assert_eq!(guard.check(Route::Employees, || 42), GuardOutcome::Render(42));
        assert_eq!(guard.resolve(Route::Employees), Route::Employees);
    }

    #[test]
    fn test_public_routes_never_redirect() {
        let guard = RouteGuard::new(Arc::new(MemorySessionStore::new()));
        assert_eq!(guard.resolve(Route::Login), Route::Login);
        assert_eq!(guard.resolve(Route::Signup), Route::Signup);
    }

    #[test]
    fn test_expire_session_clears_and_redirects() {
        let session = MemorySessionStore::with_token("stale");
        let (events, mut rx) = UiEvents::channel();

        expire_session(&session, &events);

        assert!(!session.is_authenticated());
        match rx.try_recv().unwrap() {
            UiEvent::Notice(notice) => {
                assert_eq!(notice.level, NoticeLevel::Error);
                assert_eq!(notice.message, SESSION_EXPIRED_MESSAGE);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(rx.try_recv().unwrap(), UiEvent::Navigate(Route::Login));
    }
}
