//! Plain-text helpers shared by the collectors.

/// Collapses every run of whitespace to a single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns at most the first `max` characters of `s`, cut on a char boundary.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Resolves a possibly-relative asset reference against the store URL.
///
/// Absolute `http(s)://` values are returned as-is and protocol-relative
/// `//host/...` values get `https:`. Anything else is appended to the store
/// URL without any path normalization (`../` segments are kept verbatim).
#[must_use]
pub fn absolutize(store_url: &str, candidate: &str) -> String {
    let candidate = candidate.trim();
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return candidate.to_owned();
    }
    if let Some(rest) = candidate.strip_prefix("//") {
        return format!("https://{rest}");
    }
    let base = store_url.trim_end_matches('/');
    if candidate.starts_with('/') {
        format!("{base}{candidate}")
    } else {
        format!("{base}/{candidate}")
    }
}
