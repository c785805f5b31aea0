use super::*;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.browser.endpoint, "http://localhost:9222");
    assert_eq!(config.waits.element_timeout_ms, 3000);
    assert_eq!(config.waits.apply_timeout_ms, 2000);
    assert_eq!(config.pipeline.max_passes, 1);
    assert_eq!(config.profile.source, ProfileSource::File);
    assert_eq!(config.supabase.table, "user_profiles");
    assert_eq!(config.server.port, 8787);
}

#[test]
fn test_wait_durations() {
    let waits = WaitConfig {
        element_timeout_ms: 1500,
        apply_timeout_ms: 250,
    };
    assert_eq!(waits.element_timeout(), Duration::from_millis(1500));
    assert_eq!(waits.apply_timeout(), Duration::from_millis(250));
}

#[test]
fn test_profile_source_deserialize() {
    let config: ProfileConfig = toml::from_str(r#"source = "supabase_then_file""#).unwrap();
    assert_eq!(config.source, ProfileSource::SupabaseThenFile);
    assert!(config.source.uses_supabase());
    assert_eq!(config.path, "~/.autoapply/profile.json");
}

#[test]
fn test_file_source_does_not_use_supabase() {
    assert!(!ProfileSource::File.uses_supabase());
    assert!(ProfileSource::Supabase.uses_supabase());
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config: Config = toml::from_str(
        r#"
        [waits]
        apply_timeout_ms = 500
        "#,
    )
    .unwrap();
    assert_eq!(config.waits.apply_timeout_ms, 500);
    assert_eq!(config.waits.element_timeout_ms, 3000);
}

#[test]
fn test_supabase_serialize_skips_missing_secrets() {
    let rendered = toml::to_string(&SupabaseConfig::default()).unwrap();
    assert!(!rendered.contains("anon_key"));
    assert!(rendered.contains("user_profiles"));
}
