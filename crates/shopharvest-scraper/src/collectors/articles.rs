//! Article collector. Rich article bodies are reduced to a short plain-text
//! summary and the markup is dropped.

use serde_json::Value;

use crate::client::{articles_url, StorefrontClient};
use crate::markup::{truncate_chars, HtmlDocument, MarkupExtractor};
use crate::types::{Article, ArticlesResponse};

const SUMMARY_MAX_CHARS: usize = 200;
const SUMMARY_ELLIPSIS: &str = "...";
/// Fields that may carry the rich article body.
const CONTENT_FIELDS: [&str; 2] = ["content", "body_html"];

/// Fetches the articles of one blog and summarizes each one.
///
/// There is no HTML fallback: a failed or malformed response yields an empty
/// list.
pub async fn collect_articles(
    client: &StorefrontClient,
    store_url: &str,
    blog_handle: &str,
) -> Vec<Article> {
    if blog_handle.trim().is_empty() {
        tracing::debug!(store_url, "blog has no handle; skipping articles");
        return Vec::new();
    }

    match client
        .fetch_json::<ArticlesResponse>(&articles_url(store_url, blog_handle))
        .await
    {
        Ok(response) => response
            .articles
            .into_iter()
            .map(summarize_article)
            .collect(),
        Err(e) => {
            tracing::warn!(
                store_url,
                blog = blog_handle,
                error = %e,
                "articles endpoint unavailable"
            );
            Vec::new()
        }
    }
}

/// Replaces the article's rich content with a `summary`.
///
/// The summary is the text of the first non-blank paragraph (or of the whole
/// body when there is none), cut to 200 characters, followed by `...`. The
/// content fields are removed. Articles without content are returned
/// unchanged.
#[must_use]
pub fn summarize_article(mut article: Article) -> Article {
    let content = CONTENT_FIELDS.iter().find_map(|field| {
        article
            .0
            .get(*field)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_owned)
    });
    let Some(content) = content else {
        return article;
    };

    for field in CONTENT_FIELDS {
        article.0.remove(field);
    }
    article
        .0
        .insert("summary".to_owned(), Value::String(summarize_content(&content)));
    article
}

fn summarize_content(content: &str) -> String {
    let doc = HtmlDocument::parse_fragment(content);
    let text = doc
        .select_all("p")
        .into_iter()
        .map(|p| p.text)
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| doc.text());
    format!(
        "{}{SUMMARY_ELLIPSIS}",
        truncate_chars(text.trim(), SUMMARY_MAX_CHARS)
    )
}
