//! `scrape` command handler.

use std::path::Path;

use shopharvest_core::AppConfig;
use shopharvest_scraper::{ClientConfig, StoreScraper};

/// Adds `https://` when `raw` has no scheme and drops trailing slashes.
pub(crate) fn normalize_store_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };
    with_scheme.trim_end_matches('/').to_owned()
}

/// Runs one scrape and writes the aggregate to `output` or stdout.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the scrape fails as
/// a whole, or the output cannot be written.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    store_url: &str,
    output: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let scraper = StoreScraper::from_config(ClientConfig::from_app_config(config))?;
    let store_url = if store_url.trim().is_empty() {
        String::new()
    } else {
        normalize_store_url(store_url)
    };

    let aggregate = match scraper.scrape(&store_url).await {
        Ok(aggregate) => aggregate,
        Err(e) => {
            tracing::error!(store_url = %store_url, code = e.code(), error = %e, "scrape failed");
            anyhow::bail!("{}: {e}", e.code());
        }
    };

    let json = if pretty {
        serde_json::to_string_pretty(&aggregate)?
    } else {
        serde_json::to_string(&aggregate)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(path = %path.display(), "aggregate written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
