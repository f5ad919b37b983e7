use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Pins the store path so tests never depend on the host's config dir.
fn base_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("PLACESCOUT_STORE_PATH", "/tmp/placescout-test/store.json");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PLACESCOUT_ENV"));
}

#[test]
fn build_app_config_uses_defaults() {
    let map = base_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.places_base_url, "https://places.googleapis.com/v1/places");
    assert_eq!(
        cfg.location_base_url,
        "https://countriesnow.space/api/v0.1/countries"
    );
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "placescout/0.1 (business-directory)");
    assert_eq!(cfg.page_delay_ms, 2000);
    assert_eq!(cfg.catalog_path, PathBuf::from("./config/catalog.yaml"));
    assert_eq!(
        cfg.store_path,
        PathBuf::from("/tmp/placescout-test/store.json")
    );
    assert!(cfg.supabase_url.is_none());
    assert!(cfg.supabase_anon_key.is_none());
}

#[test]
fn production_defaults_to_quieter_logging() {
    let mut map = base_env();
    map.insert("PLACESCOUT_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "warn");
}

#[test]
fn explicit_log_level_wins_in_production() {
    let mut map = base_env();
    map.insert("PLACESCOUT_ENV", "production");
    map.insert("PLACESCOUT_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn page_delay_override() {
    let mut map = base_env();
    map.insert("PLACESCOUT_PAGE_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.page_delay_ms, 0);
}

#[test]
fn page_delay_invalid() {
    let mut map = base_env();
    map.insert("PLACESCOUT_PAGE_DELAY_MS", "two seconds");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACESCOUT_PAGE_DELAY_MS"),
        "expected InvalidEnvVar(PLACESCOUT_PAGE_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = base_env();
    map.insert("PLACESCOUT_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACESCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PLACESCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn supabase_settings_are_read_when_present() {
    let mut map = base_env();
    map.insert("SUPABASE_URL", "https://abc.supabase.co");
    map.insert("SUPABASE_ANON_KEY", "anon-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.supabase_url.as_deref(), Some("https://abc.supabase.co"));
    assert_eq!(cfg.supabase_anon_key.as_deref(), Some("anon-key"));
}

#[test]
fn blank_supabase_settings_are_treated_as_absent() {
    let mut map = base_env();
    map.insert("SUPABASE_URL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.supabase_url.is_none());
}

#[test]
fn debug_output_redacts_anon_key() {
    let mut map = base_env();
    map.insert("SUPABASE_ANON_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
