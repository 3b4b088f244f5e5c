//! One-shot storefront scrape: runs every collector and assembles the
//! [`Aggregate`].

use tokio::task::{AbortHandle, JoinError};

use crate::client::{ClientConfig, StorefrontClient};
use crate::collectors::{
    collect_articles, collect_blogs, collect_collections, collect_products, collect_store_info,
    ordered_fan_out,
};
use crate::error::{ScrapeError, ScraperError};
use crate::types::Aggregate;

const SCRAPE_FAILED_MESSAGE: &str = "failed to scrape store";

/// Entry point for scraping a single store.
///
/// Upstream absence never fails a scrape: every collector degrades to its
/// empty value. Only a blank input or a crash inside the pipeline is reported
/// as a [`ScrapeError`].
#[derive(Debug, Clone)]
pub struct StoreScraper {
    client: StorefrontClient,
}

impl StoreScraper {
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(StorefrontClient::new(config)?))
    }

    /// Scrapes `store_url`, which must already be normalized (scheme present,
    /// no trailing slash required).
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::MissingInput`] if `store_url` is blank; nothing is fetched.
    /// - [`ScrapeError::ScrapeFailed`] if the pipeline panics.
    ///
    /// The pipeline runs on its own task; dropping the returned future
    /// cancels it, so no further upstream requests are made.
    pub async fn scrape(&self, store_url: &str) -> Result<Aggregate, ScrapeError> {
        if store_url.trim().is_empty() {
            return Err(ScrapeError::MissingInput);
        }

        let client = self.client.clone();
        let owned_url = store_url.to_owned();
        let task = tokio::spawn(async move { run_pipeline(&client, &owned_url).await });
        let _abort_on_drop = AbortOnDrop(task.abort_handle());
        task.await.map_err(|e| {
            let detail = join_error_detail(e);
            tracing::error!(store_url, detail = %detail, "scrape pipeline crashed");
            ScrapeError::ScrapeFailed {
                message: SCRAPE_FAILED_MESSAGE.to_owned(),
                detail,
            }
        })
    }
}

/// Cancels the pipeline task when the `scrape` future is dropped before it
/// finishes. Aborting a finished task is a no-op.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn run_pipeline(client: &StorefrontClient, store_url: &str) -> Aggregate {
    tracing::info!(store_url, "scrape started");

    let store_info = collect_store_info(client, store_url).await;
    let products = collect_products(client, store_url).await;
    let collections = collect_collections(client, store_url).await;
    let mut blogs = collect_blogs(client, store_url).await;

    let handles: Vec<String> = blogs.iter().map(|blog| blog.handle.clone()).collect();
    let per_blog = ordered_fan_out(handles, client.config().max_concurrency, |handle| async move {
        collect_articles(client, store_url, &handle).await
    })
    .await;

    let mut articles = Vec::new();
    for (blog, blog_articles) in blogs.iter_mut().zip(per_blog) {
        articles.extend(blog_articles.iter().cloned());
        blog.articles = blog_articles;
    }

    tracing::info!(
        store_url,
        products = products.len(),
        collections = collections.len(),
        blogs = blogs.len(),
        articles = articles.len(),
        "scrape finished"
    );

    Aggregate {
        products,
        collections,
        blogs,
        articles,
        store_info,
    }
}

fn join_error_detail(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "pipeline panicked".to_owned()
    }
}
