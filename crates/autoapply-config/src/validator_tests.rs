use super::*;
use crate::schema::ProfileSource;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_bad_browser_endpoint() {
    let mut config = Config::default();
    config.browser.endpoint = "localhost:9222".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
}

#[test]
fn test_validate_zero_timeouts() {
    let mut config = Config::default();
    config.waits.element_timeout_ms = 0;
    config.waits.apply_timeout_ms = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_validate_apply_timeout_longer_than_element_timeout() {
    let mut config = Config::default();
    config.waits.apply_timeout_ms = 10_000;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "waits.apply_timeout_ms"));
}

#[test]
fn test_validate_zero_passes() {
    let mut config = Config::default();
    config.pipeline.max_passes = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "pipeline.max_passes"));
}

#[test]
fn test_validate_many_passes_warning() {
    let mut config = Config::default();
    config.pipeline.max_passes = 10;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_validate_supabase_source_requires_credentials() {
    let mut config = Config::default();
    config.profile.source = ProfileSource::Supabase;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "supabase.url"));
    assert!(result.errors.iter().any(|e| e.path == "supabase.anon_key"));
}

#[test]
fn test_validate_supabase_source_complete() {
    let mut config = Config::default();
    config.profile.source = ProfileSource::SupabaseThenFile;
    config.supabase.url = Some("https://project.supabase.co".to_string());
    config.supabase.anon_key = Some("anon".to_string());
    config.supabase.access_token = Some("jwt".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_supabase_url_scheme() {
    let mut config = Config::default();
    config.profile.source = ProfileSource::Supabase;
    config.supabase.url = Some("project.supabase.co".to_string());
    config.supabase.anon_key = Some("anon".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(result
        .errors
        .iter()
        .any(|e| e.path == "supabase.url" && e.message.contains("http")));
}

#[test]
fn test_validate_invalid_port() {
    let mut config = Config::default();
    config.server.port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "server.port"));
}
