use thiserror::Error;

/// Failure of a single upstream fetch or parse.
///
/// Collectors never surface this to the caller: every variant is treated as
/// "endpoint unavailable" and either triggers a fallback or collapses to an
/// empty value.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },

    #[error("no records returned by {url}")]
    NoRecords { url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-request failure reported by [`crate::StoreScraper::scrape`].
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("store URL is required")]
    MissingInput,

    #[error("{message}: {detail}")]
    ScrapeFailed { message: String, detail: String },
}

impl ScrapeError {
    /// Stable machine-readable code for this failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ScrapeError::MissingInput => "missing_input",
            ScrapeError::ScrapeFailed { .. } => "scrape_failed",
        }
    }
}
