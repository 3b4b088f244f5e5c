//! Anchor scanning shared by the collection and blog HTML fallbacks.

use std::collections::HashSet;

use crate::markup::{absolutize, MarkupExtractor};

/// A de-duplicated `/<marker>/<handle>` link found in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HandleLink {
    pub handle: String,
    pub title: String,
    pub url: String,
}

/// Collects anchors whose path contains `marker` (e.g. `"/collections/"`).
///
/// The handle is the path segment right after `marker`. Anchors are skipped
/// when `keep(path, handle)` rejects them, when they have no visible text, or
/// when their handle was already captured; the first occurrence in document
/// order wins.
pub(crate) fn scan_handle_links<F>(
    doc: &dyn MarkupExtractor,
    store_url: &str,
    marker: &str,
    keep: F,
) -> Vec<HandleLink>
where
    F: Fn(&str, &str) -> bool,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for anchor in doc.select_all("a[href]") {
        let Some(href) = anchor.attr("href") else {
            continue;
        };
        let path = strip_query_and_fragment(href);
        let Some(pos) = path.find(marker) else {
            continue;
        };
        let handle = path[pos + marker.len()..]
            .split('/')
            .next()
            .unwrap_or_default()
            .trim();
        if handle.is_empty() || !keep(path, handle) {
            continue;
        }
        if anchor.text.is_empty() {
            continue;
        }
        if !seen.insert(handle.to_owned()) {
            continue;
        }
        links.push(HandleLink {
            handle: handle.to_owned(),
            title: anchor.text.clone(),
            url: absolutize(store_url, path),
        });
    }

    links
}

fn strip_query_and_fragment(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    href[..end].trim()
}
