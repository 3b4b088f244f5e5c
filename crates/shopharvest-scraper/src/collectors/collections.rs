//! Collection collector: structured listing plus per-collection detail,
//! with a collections-page scrape when the listing is unavailable.

use serde_json::{Map, Value};

use crate::client::{
    collection_detail_url, collections_page_url, collections_url, StorefrontClient,
};
use crate::markup::{HtmlDocument, MarkupExtractor};
use crate::types::{Collection, CollectionDetailResponse, CollectionsResponse};

use super::links::scan_handle_links;
use super::ordered_fan_out;

/// Fetches every collection the store exposes.
///
/// Each listed collection is enriched with its detail record; a failed detail
/// fetch leaves that one collection with its listing fields only. When the
/// listing itself fails, collections are scraped from the collections page.
pub async fn collect_collections(client: &StorefrontClient, store_url: &str) -> Vec<Collection> {
    match client
        .fetch_json::<CollectionsResponse>(&collections_url(store_url))
        .await
    {
        Ok(response) => enrich_collections(client, store_url, response.collections).await,
        Err(e) => {
            tracing::warn!(
                store_url,
                error = %e,
                "collections endpoint unavailable; scraping collections page"
            );
            scrape_collections_page(client, store_url).await
        }
    }
}

async fn enrich_collections(
    client: &StorefrontClient,
    store_url: &str,
    collections: Vec<Collection>,
) -> Vec<Collection> {
    let limit = client.config().max_concurrency;
    ordered_fan_out(collections, limit, |mut collection| async move {
        if collection.handle.is_empty() {
            return collection;
        }
        let url = collection_detail_url(store_url, &collection.handle);
        match client.fetch_json::<CollectionDetailResponse>(&url).await {
            Ok(detail) => {
                if let Err(e) = collection.merge_detail(detail.collection) {
                    tracing::debug!(
                        store_url,
                        handle = %collection.handle,
                        error = %e,
                        "collection detail does not fit; keeping listing fields"
                    );
                }
            }
            Err(e) => {
                tracing::debug!(
                    store_url,
                    handle = %collection.handle,
                    error = %e,
                    "collection detail unavailable"
                );
            }
        }
        collection
    })
    .await
}

async fn scrape_collections_page(client: &StorefrontClient, store_url: &str) -> Vec<Collection> {
    match client.fetch_text(&collections_page_url(store_url)).await {
        Ok(html) => collections_from_html(&html, store_url),
        Err(e) => {
            tracing::warn!(store_url, error = %e, "collections page unavailable");
            Vec::new()
        }
    }
}

fn collections_from_html(html: &str, store_url: &str) -> Vec<Collection> {
    let doc = HtmlDocument::parse(html);
    collections_from_links(&doc, store_url)
}

/// Builds collections from `/collections/<handle>` anchors.
///
/// Product links and the catch-all `all` collection are skipped. `id` is the
/// 1-based position in the returned list.
pub fn collections_from_links(doc: &dyn MarkupExtractor, store_url: &str) -> Vec<Collection> {
    scan_handle_links(doc, store_url, "/collections/", |path, handle| {
        !path.contains("/products/") && handle != "all"
    })
    .into_iter()
    .enumerate()
    .map(|(idx, link)| Collection {
        id: Value::from(idx + 1),
        handle: link.handle,
        title: link.title,
        url: Some(link.url),
        extra: Map::new(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_product_links_and_all() {
        let html = r#"
            <a href="/collections/all">Shop all</a>
            <a href="/collections/tees/products/basic-tee">Basic tee</a>
            <a href="/collections/tees">Tees</a>
            <a href="/pages/about">About</a>
        "#;
        let collections = collections_from_html(html, "https://shop.test");
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].handle, "tees");
        assert_eq!(collections[0].id, Value::from(1));
        assert_eq!(
            collections[0].url.as_deref(),
            Some("https://shop.test/collections/tees")
        );
    }

    #[test]
    fn synthetic_ids_follow_output_position() {
        let html = r#"
            <a href="/collections/a">A</a>
            <a href="/collections/a">A again</a>
            <a href="/collections/b">B</a>
        "#;
        let collections = collections_from_html(html, "https://shop.test");
        let ids: Vec<Value> = collections.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec![Value::from(1), Value::from(2)]);
        assert!(collections.iter().all(|c| c.extra.is_empty()));
    }
}
