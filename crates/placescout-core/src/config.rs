use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::store::default_store_path;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let env = parse_environment(&or_default("PLACESCOUT_ENV", "development"))?;
    let log_level = or_default("PLACESCOUT_LOG_LEVEL", env.default_log_level());
    let places_base_url = or_default(
        "PLACESCOUT_PLACES_BASE_URL",
        "https://places.googleapis.com/v1/places",
    );
    let location_base_url = or_default(
        "PLACESCOUT_LOCATION_BASE_URL",
        "https://countriesnow.space/api/v0.1/countries",
    );
    let request_timeout_secs = parse_u64("PLACESCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PLACESCOUT_USER_AGENT", "placescout/0.1 (business-directory)");
    let page_delay_ms = parse_u64("PLACESCOUT_PAGE_DELAY_MS", "2000")?;
    let catalog_path = PathBuf::from(or_default(
        "PLACESCOUT_CATALOG_PATH",
        "./config/catalog.yaml",
    ));
    let store_path = optional("PLACESCOUT_STORE_PATH")
        .map(PathBuf::from)
        .or_else(default_store_path)
        .ok_or_else(|| ConfigError::MissingEnvVar("PLACESCOUT_STORE_PATH".to_string()))?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLACESCOUT_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        places_base_url,
        location_base_url,
        request_timeout_secs,
        user_agent,
        page_delay_ms,
        catalog_path,
        store_path,
        supabase_url: optional("SUPABASE_URL"),
        supabase_anon_key: optional("SUPABASE_ANON_KEY"),
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLACESCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
