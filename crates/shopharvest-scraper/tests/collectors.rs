//! Integration tests for the per-entity collectors and their fallbacks.

mod common;

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopharvest_scraper::collectors::{
    collect_articles, collect_blogs, collect_collections, collect_products, collect_store_info,
};
use shopharvest_scraper::{SocialPlatform, StoreInfo};

use common::{test_client, UNREACHABLE_STORE};

fn products_json(ids: &[i64]) -> Value {
    json!({
        "products": ids
            .iter()
            .map(|id| json!({"id": id, "title": format!("Product {id}"), "variants": [{"price": "12.99"}]}))
            .collect::<Vec<_>>()
    })
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn products_come_from_catalog_endpoint_unchanged() {
    let server = MockServer::start().await;
    let body = products_json(&[1, 2, 3]);

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("limit", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let products = collect_products(&test_client(), &server.uri()).await;

    assert_eq!(products.len(), 3);
    let ids: Vec<&Value> = products.iter().map(|p| &p.0["id"]).collect();
    assert_eq!(ids, [&json!(1), &json!(2), &json!(3)]);
    assert_eq!(products[0].0, body["products"][0]);
}

#[tokio::test]
async fn products_fall_back_to_all_items_on_404() {
    let server = MockServer::start().await;
    mount_json(&server, "/collections/all/products.json", products_json(&[7, 8])).await;

    let products = collect_products(&test_client(), &server.uri()).await;

    let ids: Vec<&Value> = products.iter().map(|p| &p.0["id"]).collect();
    assert_eq!(ids, [&json!(7), &json!(8)]);
}

#[tokio::test]
async fn products_fall_back_when_catalog_is_empty_or_malformed() {
    for catalog in [
        ResponseTemplate::new(200).set_body_json(json!({"products": []})),
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products.json"))
            .respond_with(catalog)
            .mount(&server)
            .await;
        mount_json(&server, "/collections/all/products.json", products_json(&[9])).await;

        let products = collect_products(&test_client(), &server.uri()).await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].0["id"], 9);
    }
}

#[tokio::test]
async fn products_are_empty_when_both_endpoints_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/all/products.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let products = collect_products(&test_client(), &server.uri()).await;
    assert!(products.is_empty());
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn one_failed_detail_leaves_only_that_collection_unenriched() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/collections.json",
        json!({"collections": [
            {"id": 1, "handle": "tees", "title": "Tees"},
            {"id": 2, "handle": "hats", "title": "Hats", "sort_order": "manual"},
            {"id": 3, "handle": "mugs", "title": "Mugs"}
        ]}),
    )
    .await;
    mount_json(
        &server,
        "/collections/tees.json",
        json!({"collection": {"title": "All Tees", "products_count": 4}}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/collections/hats.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/collections/mugs.json",
        json!({"collection": {"products_count": 2}}),
    )
    .await;

    let collections = collect_collections(&test_client(), &server.uri()).await;

    assert_eq!(collections.len(), 3);
    assert_eq!(collections[0].title, "All Tees");
    assert_eq!(collections[0].extra["products_count"], 4);
    assert_eq!(
        serde_json::to_value(&collections[1]).unwrap(),
        json!({"id": 2, "handle": "hats", "title": "Hats", "sort_order": "manual"})
    );
    assert_eq!(collections[2].title, "Mugs");
    assert_eq!(collections[2].extra["products_count"], 2);
}

#[tokio::test]
async fn detail_enrichment_keeps_listing_order() {
    let server = MockServer::start().await;
    let handles = ["slow", "medium", "fast"];
    mount_json(
        &server,
        "/collections.json",
        json!({"collections": handles
            .iter()
            .enumerate()
            .map(|(i, h)| json!({"id": i, "handle": h, "title": h}))
            .collect::<Vec<_>>()}),
    )
    .await;
    for (handle, delay_ms) in handles.iter().zip([150u64, 75, 0]) {
        Mock::given(method("GET"))
            .and(path(format!("/collections/{handle}.json")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"collection": {"enriched": handle}}))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&server)
            .await;
    }

    let collections = collect_collections(&test_client(), &server.uri()).await;

    let order: Vec<&str> = collections.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(order, handles);
    for collection in &collections {
        assert_eq!(collection.extra["enriched"], json!(collection.handle));
    }
}

#[tokio::test]
async fn empty_collection_listing_does_not_trigger_html_fallback() {
    let server = MockServer::start().await;
    mount_json(&server, "/collections.json", json!({"collections": []})).await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<a href=\"/collections/x\">X</a>"))
        .expect(0)
        .mount(&server)
        .await;

    let collections = collect_collections(&test_client(), &server.uri()).await;
    assert!(collections.is_empty());
}

#[tokio::test]
async fn collections_page_fallback_dedupes_by_first_occurrence() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/collections",
        r#"<html><body>
            <a href="/collections/all">Everything</a>
            <a href="/collections/tees">Tees</a>
            <a href="/collections/tees/products/basic">Basic tee</a>
            <a href="/collections/hats?sort=price">Hats</a>
            <a href="/collections/tees">T-Shirts</a>
        </body></html>"#,
    )
    .await;

    let base = server.uri();
    let collections = collect_collections(&test_client(), &base).await;

    let summary: Vec<(Value, &str, &str)> = collections
        .iter()
        .map(|c| (c.id.clone(), c.handle.as_str(), c.title.as_str()))
        .collect();
    assert_eq!(
        summary,
        [(json!(1), "tees", "Tees"), (json!(2), "hats", "Hats")]
    );
    assert_eq!(
        collections[1].url.as_deref(),
        Some(format!("{base}/collections/hats").as_str())
    );
}

// ---------------------------------------------------------------------------
// Blogs and articles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blogs_come_from_listing_endpoint() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/blogs.json",
        json!({"blogs": [{"id": 11, "handle": "news", "title": "News", "tags": "a,b"}]}),
    )
    .await;

    let blogs = collect_blogs(&test_client(), &server.uri()).await;

    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs[0].id, json!(11));
    assert_eq!(blogs[0].extra["tags"], "a,b");
    assert!(blogs[0].articles.is_empty());
}

#[tokio::test]
async fn blogs_fall_back_to_homepage_links() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><body><nav>
            <a href="/blogs/news/tagged/launch">Launch posts</a>
            <a href="/blogs/news">News</a>
            <a href="/blogs/news/hello-world">Hello world</a>
            <a href="/blogs/journal">Journal</a>
        </nav></body></html>"#,
    )
    .await;

    let blogs = collect_blogs(&test_client(), &server.uri()).await;

    let handles: Vec<&str> = blogs.iter().map(|b| b.handle.as_str()).collect();
    assert_eq!(handles, ["news", "journal"]);
    assert_eq!(blogs[1].id, json!(2));
}

#[tokio::test]
async fn blogs_are_empty_when_store_is_unreachable() {
    let blogs = collect_blogs(&test_client(), UNREACHABLE_STORE).await;
    assert!(blogs.is_empty());
}

#[tokio::test]
async fn articles_are_summarized_and_content_dropped() {
    let server = MockServer::start().await;
    let paragraph =
        "Hello world, this is a long paragraph exceeding two hundred characters and it keeps going with more words so that the summary has to be cut somewhere well before the end of this sentence, which is quite long indeed.";
    assert!(paragraph.chars().count() > 200);
    mount_json(
        &server,
        "/blogs/news/articles.json",
        json!({"articles": [
            {"id": 1, "title": "Long", "content": format!("<p>{paragraph}</p><p>Next</p>")},
            {"id": 2, "title": "No body"}
        ]}),
    )
    .await;

    let articles = collect_articles(&test_client(), &server.uri(), "news").await;

    assert_eq!(articles.len(), 2);
    let expected = format!("{}...", &paragraph[..200]);
    assert_eq!(articles[0].summary(), Some(expected.as_str()));
    assert!(articles[0].get("content").is_none());
    assert_eq!(articles[1].get("title"), Some(&json!("No body")));
    assert!(articles[1].summary().is_none());
}

#[tokio::test]
async fn articles_are_empty_on_endpoint_failure() {
    let server = MockServer::start().await;
    let articles = collect_articles(&test_client(), &server.uri(), "news").await;
    assert!(articles.is_empty());
}

// ---------------------------------------------------------------------------
// Store info
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_info_reads_homepage() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head>
            <title>Acme Goods | Home</title>
            <link rel="icon" href="/favicon.png">
        </head><body>
            <a href="https://www.facebook.com/mystore">Facebook</a>
            <footer><p>Call 555-201-3344</p><a href="mailto:hi@acme.test">Mail</a></footer>
        </body></html>"#,
    )
    .await;

    let base = server.uri();
    let info = collect_store_info(&test_client(), &base).await;

    assert_eq!(info.name, "Acme Goods");
    assert_eq!(info.favicon, format!("{base}/favicon.png"));
    assert_eq!(info.email, "hi@acme.test");
    assert_eq!(info.phone, "555-201-3344");
    assert_eq!(info.social_links.len(), 1);
    assert_eq!(
        info.social_links[&SocialPlatform::Facebook],
        "https://www.facebook.com/mystore"
    );
}

#[tokio::test]
async fn store_info_defaults_when_homepage_fails() {
    let server = MockServer::start().await;
    let info = collect_store_info(&test_client(), &server.uri()).await;
    assert_eq!(info, StoreInfo::unknown());
}
