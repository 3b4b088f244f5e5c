//! Data model for a scraped storefront.
//!
//! ## Observed shapes from public storefront endpoints
//!
//! ### Products
//! `products.json` items carry `id`, `title`, `handle`, `variants[]` (each with
//! a decimal-string `price`), `images[]` and more. Nothing here interprets
//! them: [`Product`] is a transparent wrapper over the raw JSON value so the
//! record reaches the caller exactly as the store sent it.
//!
//! ### Collections
//! `collections.json` items carry `id`, `handle`, `title`, `body_html`,
//! `published_at`, `updated_at`, `sort_order` and sometimes `image` and
//! `products_count`. The per-collection `collections/{handle}.json` response
//! wraps a richer object under `"collection"`. Fields this crate does not name
//! are kept in [`Collection::extra`].
//!
//! ### Blogs and articles
//! `blogs.json` items carry `id`, `handle`, `title`; article records carry the
//! rich body in `content` (some themes use `body_html`). Articles leave this
//! crate with that markup replaced by a plain-text `summary`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Social networks looked up on the homepage, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    Pinterest,
    Youtube,
    Tiktok,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 6] = [
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::Twitter,
        SocialPlatform::Pinterest,
        SocialPlatform::Youtube,
        SocialPlatform::Tiktok,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Pinterest => "pinterest",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Tiktok => "tiktok",
        }
    }
}

/// Store identity and contact metadata derived from the homepage.
///
/// Every field defaults to empty; a missing value is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub logo: String,
    pub favicon: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub social_links: BTreeMap<SocialPlatform, String>,
}

impl StoreInfo {
    /// Record used when the homepage itself cannot be retrieved.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            name: "Unknown Store".to_string(),
            ..Self::default()
        }
    }
}

/// A product record exactly as returned by the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(pub Value);

/// A storefront collection.
///
/// Records scraped from HTML only populate `id`, `handle`, `title` and `url`;
/// their `id` is the 1-based position in the scraped list, not a store ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    /// Overlays `detail` onto this record: keys present in `detail` win, keys
    /// only present here survive.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if the merged object no longer fits
    /// the collection shape (e.g. `"handle": null`). `self` is left untouched
    /// in that case.
    pub fn merge_detail(&mut self, detail: Map<String, Value>) -> Result<(), serde_json::Error> {
        let mut merged = match serde_json::to_value(&*self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(detail);
        *self = serde_json::from_value(Value::Object(merged))?;
        Ok(())
    }
}

/// A storefront blog. `articles` is filled in by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// An article record. After collection it carries `summary` instead of the
/// original rich `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(pub Map<String, Value>);

impl Article {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.0.get("summary").and_then(Value::as_str)
    }
}

/// Everything scraped from one store.
///
/// `articles` is the flattened union of every blog's articles in
/// blog-discovery order, so each article appears twice in the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub products: Vec<Product>,
    pub collections: Vec<Collection>,
    pub blogs: Vec<Blog>,
    pub articles: Vec<Article>,
    pub store_info: StoreInfo,
}

/// `GET /products.json` and `GET /collections/all/products.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductsResponse {
    pub products: Vec<Product>,
}

/// `GET /collections.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionsResponse {
    pub collections: Vec<Collection>,
}

/// `GET /collections/{handle}.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionDetailResponse {
    pub collection: Map<String, Value>,
}

/// `GET /blogs.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct BlogsResponse {
    pub blogs: Vec<Blog>,
}

/// `GET /blogs/{handle}/articles.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct ArticlesResponse {
    pub articles: Vec<Article>,
}
