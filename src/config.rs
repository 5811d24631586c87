//! Client configuration.
//!
//! A [`ScholarConfig`] is built once and handed to the URL builder, the HTTP
//! fetcher and the client. Nothing reads process-wide settings.

use std::time::Duration;

/// Default Google Scholar origin
pub const DEFAULT_SCHOLAR_URL: &str = "https://scholar.google.ca";

/// Largest page the citations endpoint serves per request
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Desktop browser user agent; the service rejects default client identifiers
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:27.0) Gecko/20100101 Firefox/27.0";

/// Settings shared by the URL builder and the fetcher
#[derive(Debug, Clone)]
pub struct ScholarConfig {
    /// Service origin, e.g. `https://scholar.google.ca`
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Proxy URL (e.g., "http://127.0.0.1:7890")
    pub proxy: Option<String>,
    /// Publications per page
    pub page_size: u32,
}

impl Default for ScholarConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SCHOLAR_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            proxy: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ScholarConfig {
    /// Default settings pointed at another origin (mirrors, mock servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Base URL without trailing slashes
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
