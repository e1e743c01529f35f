//! Client configuration

/// Default API base when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Client configuration for connecting to the directory API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ClientConfig::new("http://api.local/");
        assert_eq!(config.url("/employee/all"), "http://api.local/employee/all");
        assert_eq!(config.url("auth/login"), "http://api.local/auth/login");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default().with_timeout(5);
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert_eq!(config.timeout, 5);
    }
}
