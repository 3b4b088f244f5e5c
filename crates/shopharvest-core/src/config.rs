use std::str::FromStr;

use crate::app_config::{AppConfig, Environment, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("SHOPHARVEST_ENV", "development"))?;
    let log_level = or_default("SHOPHARVEST_LOG_LEVEL", "info");

    let user_agent = or_default("SHOPHARVEST_USER_AGENT", DEFAULT_USER_AGENT);
    if user_agent.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPHARVEST_USER_AGENT".to_string(),
            reason: "must not be blank".to_string(),
        });
    }

    let request_timeout_secs = parse_number::<u64>(
        "SHOPHARVEST_REQUEST_TIMEOUT_SECS",
        &or_default("SHOPHARVEST_REQUEST_TIMEOUT_SECS", "0"),
    )?;

    let max_concurrency = parse_number::<usize>(
        "SHOPHARVEST_MAX_CONCURRENCY",
        &or_default("SHOPHARVEST_MAX_CONCURRENCY", "1"),
    )?;
    if max_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPHARVEST_MAX_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let product_limit = parse_number::<u32>(
        "SHOPHARVEST_PRODUCT_LIMIT",
        &or_default("SHOPHARVEST_PRODUCT_LIMIT", "250"),
    )?;

    Ok(AppConfig {
        env,
        log_level,
        user_agent,
        request_timeout_secs,
        max_concurrency,
        product_limit,
    })
}

fn parse_number<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPHARVEST_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
