//! Shared helpers for the wiremock-backed integration tests.

#![allow(dead_code)]

use std::time::Duration;

use shopharvest_scraper::{ClientConfig, StorefrontClient};

pub const TEST_USER_AGENT: &str = "shopharvest-test/0.1";

/// Client with a short timeout and room for four in-flight detail fetches.
pub fn test_client() -> StorefrontClient {
    StorefrontClient::new(test_config()).expect("failed to build test client")
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        user_agent: TEST_USER_AGENT.to_string(),
        timeout: Some(Duration::from_secs(5)),
        max_concurrency: 4,
        product_limit: 250,
    }
}

/// A base URL nothing listens on.
pub const UNREACHABLE_STORE: &str = "http://127.0.0.1:1";
