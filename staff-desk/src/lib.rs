//! Staff Desk - console client for the staff directory
//!
//! Headless screens live in [`core`]; [`console`] drives them from stdin.

pub mod config;
pub mod console;
pub mod core;

pub use config::DeskConfig;
pub use staff_client;

use console::Console;
use staff_client::{FileSessionStore, NetworkDirectoryApi, SessionStore};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "staff_desk=info,staff_client=info";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global subscriber
///
/// With a log directory, logs go to a daily rolling file; otherwise to
/// stderr so they stay out of the rendered screens. Keep the returned
/// guard alive for the whole run or buffered file lines are lost.
pub fn init_logging(config: &DeskConfig) -> std::io::Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match &config.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = rolling::daily(log_dir, "staff-desk.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_writer(non_blocking_file);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .init();

            tracing::info!(path = %log_dir.display(), "Tracing initialized");
            Ok(Some(guard))
        }
        None => {
            let stderr_layer = fmt::layer()
                .with_timer(LocalTimer)
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}

/// Build the client stack and run the console until it exits
pub async fn run(config: DeskConfig) -> crate::core::DeskResult<()> {
    config.validate()?;

    let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&config.session_file)?);
    let api = Arc::new(NetworkDirectoryApi::new(config.client_config(), session.clone())?);

    tracing::info!(
        api_base = %api.base_url(),
        session_file = %config.session_file.display(),
        authenticated = session.is_authenticated(),
        "Staff desk starting"
    );

    let (events, ui_events) = crate::core::UiEvents::channel();
    Console::new(config, api, session, events).run(ui_events).await
}
