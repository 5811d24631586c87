//! Document fetching.
//!
//! The extraction engine only needs "give me the text behind this URL or fail".
//! [`Fetcher`] is that contract; [`HttpFetcher`] is the reqwest implementation.

use crate::config::ScholarConfig;
use crate::error::{Result, ScholarError};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Forms of the anti-automation interstitial. Page text is not checked, since
/// titles and abstracts may quote the interstitial's wording.
const CAPTCHA_FORM: &str = "#gs_captcha_f, #captcha-form, form[action*='/sorry/']";

/// Path the service redirects blocked clients to
const SORRY_PATH: &str = "/sorry/";

/// Source of raw markup documents.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ScholarError::Remote`] when the response status is not a success.
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// HTTP fetcher with a browser-like user agent
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the HTTP client from settings.
    pub fn new(config: &ScholarConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout);

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                ScholarError::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ScholarError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Unsuccessful response");
            return Err(ScholarError::Remote {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await?;

        if is_captcha_page(&final_url, &body) {
            warn!(url = %url, "CAPTCHA detected");
            return Err(ScholarError::Captcha);
        }

        Ok(body)
    }
}

fn is_captcha_page(final_url: &Url, body: &str) -> bool {
    if final_url.path().starts_with(SORRY_PATH) {
        return true;
    }
    let Ok(form) = Selector::parse(CAPTCHA_FORM) else {
        return false;
    };
    let document = Html::parse_document(body);
    let found = document.select(&form).next().is_some();
    found
}
