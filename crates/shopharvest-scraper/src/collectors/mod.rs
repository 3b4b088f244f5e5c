//! Per-entity collectors.
//!
//! Each collector consumes the store base URL (plus a blog handle for
//! articles) and returns its slice of the [`crate::Aggregate`]. Failures are
//! absorbed here: a collector whose every source fails returns its empty
//! value, which callers cannot tell apart from "the store has none".

mod articles;
mod blogs;
mod collections;
mod links;
mod products;
mod store_info;

use std::future::Future;

use futures::stream::{self, StreamExt};

pub use articles::{collect_articles, summarize_article};
pub use blogs::{blogs_from_links, collect_blogs};
pub use collections::{collect_collections, collections_from_links};
pub use products::collect_products;
pub use store_info::{collect_store_info, parse_store_info};

/// Runs `f` over `items` with at most `limit` futures in flight.
///
/// Results come back in input order regardless of completion order.
pub(crate) async fn ordered_fan_out<I, T, F, Fut>(items: I, limit: usize, f: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(items)
        .map(f)
        .buffered(limit.max(1))
        .collect()
        .await
}
