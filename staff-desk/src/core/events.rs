//! UI event definitions
//!
//! Screens never print or switch routes themselves. They emit transient
//! notices and navigation requests on this channel and the front-end
//! decides how to present them.

use super::route::Route;
use tokio::sync::mpsc;

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warn,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warn => "warn",
            NoticeLevel::Error => "error",
        }
    }
}

/// Transient, user-visible message (a "toast")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Event emitted by a screen towards the front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Notice(Notice),
    Navigate(Route),
}

/// Sending half of the UI event channel
///
/// Cheap to clone; a dropped receiver only means nobody is watching
/// anymore, so send failures are ignored.
#[derive(Debug, Clone)]
pub struct UiEvents {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl UiEvents {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("UI event dropped, no receiver");
        }
    }

    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.emit(UiEvent::Notice(Notice {
            level,
            message: message.into(),
        }));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NoticeLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NoticeLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.notify(NoticeLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NoticeLevel::Error, message);
    }

    pub fn navigate(&self, route: Route) {
        tracing::info!(path = route.path(), "Navigating");
        self.emit(UiEvent::Navigate(route));
    }
}
