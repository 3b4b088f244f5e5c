//! Blog collector: structured listing with a homepage link scrape fallback.

use serde_json::{Map, Value};

use crate::client::{blogs_url, homepage_url, StorefrontClient};
use crate::markup::{HtmlDocument, MarkupExtractor};
use crate::types::{Blog, BlogsResponse};

use super::links::scan_handle_links;

/// Fetches the store's blogs. `articles` is left empty on every blog.
///
/// Falls back to `/blogs/<handle>` anchors on the homepage when the listing
/// endpoint fails; returns an empty list when both fail.
pub async fn collect_blogs(client: &StorefrontClient, store_url: &str) -> Vec<Blog> {
    match client.fetch_json::<BlogsResponse>(&blogs_url(store_url)).await {
        Ok(response) => response.blogs,
        Err(e) => {
            tracing::warn!(
                store_url,
                error = %e,
                "blogs endpoint unavailable; scanning homepage links"
            );
            match client.fetch_text(&homepage_url(store_url)).await {
                Ok(html) => blogs_from_html(&html, store_url),
                Err(e) => {
                    tracing::warn!(store_url, error = %e, "homepage unavailable; no blogs");
                    Vec::new()
                }
            }
        }
    }
}

fn blogs_from_html(html: &str, store_url: &str) -> Vec<Blog> {
    let doc = HtmlDocument::parse(html);
    blogs_from_links(&doc, store_url)
}

/// Builds blogs from `/blogs/<handle>` anchors, skipping tag archives.
///
/// Article links (`/blogs/news/some-post`) resolve to their blog handle and
/// de-duplicate against it. `id` is the 1-based position in the returned list.
pub fn blogs_from_links(doc: &dyn MarkupExtractor, store_url: &str) -> Vec<Blog> {
    scan_handle_links(doc, store_url, "/blogs/", |path, _| !path.contains("/tagged/"))
        .into_iter()
        .enumerate()
        .map(|(idx, link)| Blog {
            id: Value::from(idx + 1),
            handle: link.handle,
            title: link.title,
            url: Some(link.url),
            extra: Map::new(),
            articles: Vec::new(),
        })
        .collect()
}
