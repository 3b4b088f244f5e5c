//! HTTP client for storefront JSON endpoints and HTML pages.

mod endpoints;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ScraperError;

pub use endpoints::store_endpoint;
pub(crate) use endpoints::{
    all_products_url, articles_url, blogs_url, collection_detail_url, collections_page_url,
    collections_url, homepage_url, products_url,
};

const ACCEPT_JSON: &str = "application/json,text/plain;q=0.9,*/*;q=0.8";
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Per-client request policy.
///
/// The defaults reproduce a plain browser visit: fixed desktop identity, no
/// timeout beyond the transport's own, one request in flight at a time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    /// Upper bound on concurrent per-item fetches (collection details, blog
    /// articles). Values below 1 are treated as 1.
    pub max_concurrency: usize,
    /// `limit` query parameter for the product listing endpoints.
    pub product_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: shopharvest_core::DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_concurrency: 1,
            product_limit: 250,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn from_app_config(config: &shopharvest_core::AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: (config.request_timeout_secs > 0)
                .then(|| Duration::from_secs(config.request_timeout_secs)),
            max_concurrency: config.max_concurrency,
            product_limit: config.product_limit,
        }
    }
}

/// Single-attempt GET client shared by every collector.
///
/// There is no retry or rate limiting: a non-2xx status, a transport failure
/// or an unparseable body is reported once and the caller decides whether to
/// fall back.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    config: ClientConfig,
}

impl StorefrontClient {
    /// Builds the underlying `reqwest::Client` from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// constructed (e.g., invalid TLS config or user agent).
    pub fn new(config: ClientConfig) -> Result<Self, ScraperError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches `url` and returns the body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: DNS, connection or body read failure.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        self.get(url, ACCEPT_HTML).await
    }

    /// Fetches `url` and deserializes the body as `T`.
    ///
    /// # Errors
    ///
    /// Everything [`Self::fetch_text`] returns, plus:
    /// - [`ScraperError::EmptyBody`]: the body is empty or whitespace.
    /// - [`ScraperError::Deserialize`]: the body is not JSON or not shaped like `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ScraperError> {
        let body = self.get(url, ACCEPT_JSON).await?;
        if body.trim().is_empty() {
            return Err(ScraperError::EmptyBody {
                url: url.to_owned(),
            });
        }
        serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("response from {url}"),
            source: e,
        })
    }

    async fn get(&self, url: &str, accept: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
