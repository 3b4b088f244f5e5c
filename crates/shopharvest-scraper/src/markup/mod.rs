//! Query primitives over HTML markup.
//!
//! Collectors parse pages through the [`MarkupExtractor`] trait so the HTML
//! backend can change without touching collector logic. [`HtmlDocument`] is
//! the `scraper`-backed implementation.
//!
//! `scraper::Html` is not `Send`; documents are built and queried inside
//! synchronous helpers and never held across an `.await`.

mod text;

use std::collections::BTreeMap;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

pub use text::{absolutize, collapse_whitespace, truncate_chars};

/// An owned snapshot of one matched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Concatenated descendant text, whitespace collapsed and trimmed.
    pub text: String,
    pub attrs: BTreeMap<String, String>,
}

impl Element {
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Capability-typed queries used by every HTML fallback path.
///
/// Selector arguments use CSS syntax. An invalid selector behaves like a
/// selector that matches nothing.
pub trait MarkupExtractor {
    /// The markup exactly as it was fetched.
    fn raw(&self) -> &str;

    /// Text of the whole document, whitespace collapsed.
    fn text(&self) -> String;

    /// Trimmed text of the first element matching `selector`; `None` when
    /// nothing matches or the text is blank.
    fn first_text(&self, selector: &str) -> Option<String>;

    /// Value of `attr` on the first matching element that carries a
    /// non-blank value for it.
    fn first_attr(&self, selector: &str, attr: &str) -> Option<String>;

    /// Outer HTML of the first element matching `selector`.
    fn first_html(&self, selector: &str) -> Option<String>;

    /// Every element matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> Vec<Element>;

    /// First match of `pattern` anywhere in the raw markup.
    fn first_regex_match(&self, pattern: &Regex) -> Option<String> {
        pattern.find(self.raw()).map(|m| m.as_str().to_owned())
    }
}

/// [`MarkupExtractor`] backed by the `scraper` crate.
pub struct HtmlDocument {
    raw: String,
    html: Html,
}

impl HtmlDocument {
    /// Parses a complete HTML document.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_owned(),
            html: Html::parse_document(raw),
        }
    }

    /// Parses a markup fragment such as an article body.
    #[must_use]
    pub fn parse_fragment(raw: &str) -> Self {
        Self {
            raw: raw.to_owned(),
            html: Html::parse_fragment(raw),
        }
    }

    fn selector(selector: &str) -> Option<Selector> {
        Selector::parse(selector)
            .map_err(|e| tracing::debug!(selector, error = ?e, "invalid CSS selector"))
            .ok()
    }

    fn matches<'a>(&'a self, selector: &str) -> Vec<ElementRef<'a>> {
        match Self::selector(selector) {
            Some(sel) => self.html.select(&sel).collect(),
            None => Vec::new(),
        }
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

impl MarkupExtractor for HtmlDocument {
    fn raw(&self) -> &str {
        &self.raw
    }

    fn text(&self) -> String {
        collapse_whitespace(&self.html.root_element().text().collect::<String>())
    }

    fn first_text(&self, selector: &str) -> Option<String> {
        self.matches(selector)
            .first()
            .map(element_text)
            .filter(|t| !t.is_empty())
    }

    fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        self.matches(selector).into_iter().find_map(|el| {
            el.value()
                .attr(attr)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        })
    }

    fn first_html(&self, selector: &str) -> Option<String> {
        self.matches(selector).first().map(ElementRef::html)
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        self.matches(selector)
            .iter()
            .map(|el| Element {
                name: el.value().name().to_owned(),
                text: element_text(el),
                attrs: el
                    .value()
                    .attrs()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../markup_test.rs"]
mod tests;
