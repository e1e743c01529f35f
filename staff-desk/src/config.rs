//! Desk configuration
//!
//! Every option can come from the command line or the environment
//! (after `.env` has been loaded).

use crate::core::{DeskError, DeskResult};
use clap::Parser;
use staff_client::ClientConfig;
use staff_client::config::DEFAULT_API_BASE;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Console client for the staff directory")]
pub struct DeskConfig {
    /// Base URL of the directory API
    #[arg(long, env = "STAFF_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// JSON file the session token is kept in
    #[arg(long, env = "STAFF_SESSION_FILE", default_value = "session.json")]
    pub session_file: PathBuf,

    /// Quiet period of the search debounce (ms)
    #[arg(long, env = "STAFF_DEBOUNCE_MS", default_value_t = 800)]
    pub debounce_ms: u64,

    /// Delay between a successful login and the listing (ms)
    #[arg(long, env = "STAFF_REDIRECT_DELAY_MS", default_value_t = 3_000)]
    pub redirect_delay_ms: u64,

    /// Directory `employees.csv` is written to
    #[arg(long, env = "STAFF_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// HTTP request timeout (s)
    #[arg(long, env = "STAFF_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write daily rolling log files here instead of stderr
    #[arg(long, env = "STAFF_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl DeskConfig {
    pub fn validate(&self) -> DeskResult<()> {
        let base = self.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(DeskError::Config(format!(
                "api base must be an http(s) URL, got {:?}",
                self.api_base
            )));
        }
        if self.timeout_secs == 0 {
            return Err(DeskError::Config("timeout must be at least 1 second".into()));
        }
        if self.session_file.as_os_str().is_empty() {
            return Err(DeskError::Config("session file path is empty".into()));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base.trim()).with_timeout(self.timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeskConfig::try_parse_from(["staff-desk"]).unwrap();
        config.validate().unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(800));
        assert_eq!(config.redirect_delay(), Duration::from_secs(3));
        assert_eq!(config.session_file, PathBuf::from("session.json"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = DeskConfig::try_parse_from([
            "staff-desk",
            "--api-base",
            "https://staff.example.com/",
            "--debounce-ms",
            "250",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        let client = config.client_config();
        assert_eq!(client.base_url, "https://staff.example.com");
        assert_eq!(client.timeout, 5);
        assert_eq!(config.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = DeskConfig::try_parse_from(["staff-desk", "--api-base", "localhost:3000"]).unwrap();
        assert!(matches!(config.validate(), Err(DeskError::Config(_))));

        let config = DeskConfig::try_parse_from(["staff-desk", "--timeout-secs", "0"]).unwrap();
        assert!(matches!(config.validate(), Err(DeskError::Config(_))));
    }
}
