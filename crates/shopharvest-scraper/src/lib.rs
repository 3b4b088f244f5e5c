//! Best-effort storefront scraper.
//!
//! [`StoreScraper::scrape`] pulls the product catalog, collections, blogs
//! with their articles, and homepage metadata from a storefront's public JSON
//! endpoints, falling back to HTML scraping where an endpoint is missing.

pub mod client;
pub mod collectors;
pub mod error;
pub mod markup;
pub mod scrape;
pub mod types;

pub use client::{store_endpoint, ClientConfig, StorefrontClient};
pub use error::{ScrapeError, ScraperError};
pub use markup::{HtmlDocument, MarkupExtractor};
pub use scrape::StoreScraper;
pub use types::{Aggregate, Article, Blog, Collection, Product, SocialPlatform, StoreInfo};
