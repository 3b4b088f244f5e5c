//! Product catalog collector.

use crate::client::{all_products_url, products_url, StorefrontClient};
use crate::error::ScraperError;
use crate::types::{Product, ProductsResponse};

/// Fetches the product catalog.
///
/// Tries the catalog listing first and the all-items collection listing
/// second. Whichever answers first with at least one product is used as-is;
/// the two are never merged. Returns an empty list when both fail.
pub async fn collect_products(client: &StorefrontClient, store_url: &str) -> Vec<Product> {
    let limit = client.config().product_limit;
    let sources = [
        ("catalog", products_url(store_url, limit)),
        ("all_items", all_products_url(store_url, limit)),
    ];

    for (source, url) in &sources {
        match fetch_products(client, url).await {
            Ok(products) => {
                tracing::debug!(store_url, source, count = products.len(), "fetched products");
                return products;
            }
            Err(e) => {
                tracing::warn!(store_url, source, error = %e, "product endpoint unavailable");
            }
        }
    }

    tracing::warn!(store_url, "no product endpoint answered; returning empty catalog");
    Vec::new()
}

async fn fetch_products(
    client: &StorefrontClient,
    url: &str,
) -> Result<Vec<Product>, ScraperError> {
    let response: ProductsResponse = client.fetch_json(url).await?;
    if response.products.is_empty() {
        return Err(ScraperError::NoRecords {
            url: url.to_owned(),
        });
    }
    Ok(response.products)
}
