//! Upstream endpoint paths, all relative to the store base URL.

/// Appends `path` to `store_url`, dropping any trailing slash on the base.
///
/// The base is otherwise used as given: scheme and host normalization is the
/// caller's job.
#[must_use]
pub fn store_endpoint(store_url: &str, path: &str) -> String {
    format!("{}{path}", store_url.trim_end_matches('/'))
}

pub(crate) fn homepage_url(store_url: &str) -> String {
    store_endpoint(store_url, "/")
}

pub(crate) fn products_url(store_url: &str, limit: u32) -> String {
    store_endpoint(store_url, &format!("/products.json?limit={limit}"))
}

pub(crate) fn all_products_url(store_url: &str, limit: u32) -> String {
    store_endpoint(
        store_url,
        &format!("/collections/all/products.json?limit={limit}"),
    )
}

pub(crate) fn collections_url(store_url: &str) -> String {
    store_endpoint(store_url, "/collections.json")
}

pub(crate) fn collection_detail_url(store_url: &str, handle: &str) -> String {
    store_endpoint(store_url, &format!("/collections/{handle}.json"))
}

pub(crate) fn collections_page_url(store_url: &str) -> String {
    store_endpoint(store_url, "/collections")
}

pub(crate) fn blogs_url(store_url: &str) -> String {
    store_endpoint(store_url, "/blogs.json")
}

pub(crate) fn articles_url(store_url: &str, blog_handle: &str) -> String {
    store_endpoint(store_url, &format!("/blogs/{blog_handle}/articles.json"))
}
