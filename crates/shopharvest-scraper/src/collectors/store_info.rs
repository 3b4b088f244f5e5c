//! Store identity and contact metadata scraped from the homepage.
//!
//! Every field is extracted independently; a field whose heuristic finds
//! nothing stays empty and never blocks the others.

use std::sync::LazyLock;

use regex::Regex;

use crate::client::{homepage_url, StorefrontClient};
use crate::markup::{absolutize, collapse_whitespace, HtmlDocument, MarkupExtractor};
use crate::types::{SocialPlatform, StoreInfo};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d \t().-]{5,}\d").expect("valid regex"));
static US_ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}(?:-\d{4})?\b").expect("valid regex"));
static CA_POSTAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z]\d[A-Za-z][ -]?\d[A-Za-z]\d\b").expect("valid regex")
});
static SOCIAL_RES: LazyLock<Vec<(SocialPlatform, Regex)>> = LazyLock::new(|| {
    SocialPlatform::ALL
        .iter()
        .map(|&platform| {
            let pattern = match platform {
                SocialPlatform::Tiktok => format!(
                    r"(?i){HOST_BOUNDARY}((?:https?://)?(?:www\.)?tiktok\.com/@[A-Za-z0-9_.-]+)"
                ),
                other => format!(
                    r"(?i){HOST_BOUNDARY}((?:https?://)?(?:www\.|m\.)?{}\.com/[A-Za-z0-9_.@%-]+(?:/[A-Za-z0-9_.@%-]+)*)",
                    other.as_str()
                ),
            };
            (platform, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});

/// A social URL must not continue a longer host name (`notfacebook.com`).
const HOST_BOUNDARY: &str = "(?:^|[^A-Za-z0-9.-])";
/// Digit counts accepted as a phone number (E.164 allows at most 15).
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;
const HEADER_IMAGE_SELECTOR: &str =
    "header img, .header img, #header img, .site-header img, [role=banner] img";
const FOOTER_SELECTOR: &str = "footer, .site-footer, #footer, .footer";
const ADDRESS_SELECTORS: [&str; 5] = [
    "footer address",
    "footer .address",
    "footer [itemprop=address]",
    ".footer address",
    ".site-footer address",
];
/// Characters kept on each side of a postal code when no address block exists.
const ADDRESS_WINDOW_RADIUS: usize = 100;
const ASSET_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"];
/// Share/widget paths that are never a store's own profile.
const NON_PROFILE_SEGMENTS: [&str; 10] = [
    "tr",
    "sharer",
    "sharer.php",
    "share",
    "share.php",
    "intent",
    "pin",
    "embed",
    "plugins",
    "dialog",
];

/// Fetches the homepage and extracts [`StoreInfo`] from it.
///
/// Never fails: when the homepage cannot be fetched the result is
/// [`StoreInfo::unknown`].
pub async fn collect_store_info(client: &StorefrontClient, store_url: &str) -> StoreInfo {
    match client.fetch_text(&homepage_url(store_url)).await {
        Ok(html) => store_info_from_html(&html, store_url),
        Err(e) => {
            tracing::warn!(store_url, error = %e, "homepage unavailable; using default store info");
            StoreInfo::unknown()
        }
    }
}

fn store_info_from_html(html: &str, store_url: &str) -> StoreInfo {
    let doc = HtmlDocument::parse(html);
    parse_store_info(&doc, store_url)
}

/// Extracts [`StoreInfo`] from an already-fetched homepage.
pub fn parse_store_info(doc: &dyn MarkupExtractor, store_url: &str) -> StoreInfo {
    let footer = doc.first_html(FOOTER_SELECTOR);
    StoreInfo {
        name: extract_name(doc).unwrap_or_default(),
        logo: extract_logo(doc, store_url).unwrap_or_default(),
        favicon: doc
            .first_attr(r#"link[rel~="icon"]"#, "href")
            .map(|href| absolutize(store_url, &href))
            .unwrap_or_default(),
        address: extract_address(doc).unwrap_or_default(),
        email: extract_email(doc, footer.as_deref()).unwrap_or_default(),
        phone: extract_phone(doc, footer.as_deref()).unwrap_or_default(),
        social_links: SOCIAL_RES
            .iter()
            .filter_map(|(platform, re)| find_social_link(re, doc.raw()).map(|url| (*platform, url)))
            .collect(),
    }
}

fn extract_name(doc: &dyn MarkupExtractor) -> Option<String> {
    doc.first_text("title")
        .and_then(|title| {
            let name = title.split('|').next().unwrap_or_default().trim().to_owned();
            (!name.is_empty()).then_some(name)
        })
        .or_else(|| doc.first_attr(r#"meta[property="og:site_name"]"#, "content"))
}

fn extract_logo(doc: &dyn MarkupExtractor, store_url: &str) -> Option<String> {
    let src = doc
        .first_attr(r#"meta[property="og:image"]"#, "content")
        .or_else(|| {
            doc.select_all(HEADER_IMAGE_SELECTOR).into_iter().find_map(|img| {
                ["src", "data-src"]
                    .into_iter()
                    .filter_map(|attr| img.attr(attr))
                    .map(str::trim)
                    .find(|v| !v.is_empty())
                    .map(str::to_owned)
            })
        })?;
    Some(absolutize(store_url, &src))
}

fn extract_address(doc: &dyn MarkupExtractor) -> Option<String> {
    if let Some(address) = ADDRESS_SELECTORS
        .iter()
        .find_map(|selector| doc.first_text(selector))
    {
        return Some(address);
    }
    let footer_text = doc.first_text(FOOTER_SELECTOR)?;
    let start = [&*US_ZIP_RE, &*CA_POSTAL_RE]
        .into_iter()
        .filter_map(|re| re.find(&footer_text).map(|m| m.start()))
        .min()?;
    let window = postal_window(&footer_text, start, ADDRESS_WINDOW_RADIUS);
    (!window.is_empty()).then_some(window)
}

/// Text within `radius` characters either side of byte offset `at`.
fn postal_window(text: &str, at: usize, radius: usize) -> String {
    let center = text[..at].chars().count();
    let from = center.saturating_sub(radius);
    let window: String = text.chars().skip(from).take(center - from + radius).collect();
    collapse_whitespace(&window)
}

fn extract_email(doc: &dyn MarkupExtractor, footer: Option<&str>) -> Option<String> {
    footer
        .and_then(first_contact_email)
        .or_else(|| first_contact_email(doc.raw()))
}

fn first_contact_email(haystack: &str) -> Option<String> {
    EMAIL_RE
        .find_iter(haystack)
        .map(|m| m.as_str())
        .find(|candidate| {
            let lower = candidate.to_ascii_lowercase();
            !ASSET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        })
        .map(str::to_owned)
}

fn extract_phone(doc: &dyn MarkupExtractor, footer: Option<&str>) -> Option<String> {
    footer
        .and_then(first_phone)
        .or_else(|| first_phone(doc.raw()))
}

fn first_phone(haystack: &str) -> Option<String> {
    PHONE_RE
        .find_iter(haystack)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            PHONE_DIGITS.contains(&candidate.chars().filter(char::is_ascii_digit).count())
        })
        .map(str::to_owned)
}

fn find_social_link(re: &Regex, raw: &str) -> Option<String> {
    re.captures_iter(raw).find_map(|caps| {
        let found = caps.get(1)?.as_str().trim_end_matches('.');
        let path = found.split_once(".com/").map_or("", |(_, path)| path);
        let first_segment = path.split('/').next().unwrap_or_default();
        if NON_PROFILE_SEGMENTS
            .iter()
            .any(|segment| first_segment.eq_ignore_ascii_case(segment))
        {
            return None;
        }
        let lower = found.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Some(found.to_owned())
        } else {
            Some(format!("https://{found}"))
        }
    })
}

#[cfg(test)]
#[path = "store_info_test.rs"]
mod tests;
