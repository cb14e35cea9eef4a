//! Configuration tests
//!
//! Round-trip guards: the generated template must parse back into the same
//! effective configuration, so new fields have to be added to `to_toml` too.

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    env_from(&[])
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let loaded = Config::from_sources(parsed.unwrap(), no_env()).unwrap();
    assert_eq!(loaded.bind_addr, config.bind_addr);
    assert_eq!(loaded.ai.model, config.ai.model);
    assert_eq!(loaded.ai.timeout_secs, config.ai.timeout_secs);
    assert_eq!(loaded.opik.project_name, "recode-identity");
    assert_eq!(loaded.opik.workspace, None);
    assert_eq!(loaded.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.bind_addr = "0.0.0.0:9000".parse().unwrap();
    config.ai.evaluate = true;
    config.ai.timeout_secs = 5;
    config.opik.workspace = Some("team".to_string());
    config.opik.enabled = false;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let loaded = Config::from_sources(parsed, no_env()).unwrap();

    assert_eq!(loaded.bind_addr.port(), 9000);
    assert!(loaded.ai.evaluate);
    assert_eq!(loaded.ai.timeout_secs, 5);
    assert_eq!(loaded.opik.workspace.as_deref(), Some("team"));
    assert!(!loaded.opik.enabled);
    assert!(loaded.logging.file_enabled);
    assert_eq!(loaded.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_template_never_contains_keys() {
    let mut config = Config::default();
    config.ai.api_key = Some("gem-secret".to_string());
    config.opik.api_key = Some("opik-secret".to_string());

    let toml_str = config.to_toml();
    assert!(!toml_str.contains("gem-secret"));
    assert!(!toml_str.contains("opik-secret"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
bind_addr = "127.0.0.1:7000"

[opik]
workspace = "from-file"

[logging]
level = "warn"
"#,
    )
    .unwrap();

    let config = Config::from_sources(
        file,
        env_from(&[
            ("RECODE_BIND", "127.0.0.1:7001"),
            ("OPIK_WORKSPACE", "from-env"),
            ("RECODE_LOG", "debug"),
        ]),
    )
    .unwrap();

    assert_eq!(config.bind_addr.port(), 7001);
    assert_eq!(config.opik.workspace.as_deref(), Some("from-env"));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_api_keys_from_env_only() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("API_KEY", "fallback"), ("OPIK_API_KEY", "opik")]),
    )
    .unwrap();
    assert_eq!(config.ai.api_key.as_deref(), Some("fallback"));
    assert!(config.opik.is_configured());

    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")]),
    )
    .unwrap();
    assert_eq!(config.ai.api_key.as_deref(), Some("primary"));
    assert!(!config.opik.is_configured());
}

#[test]
fn test_blank_keys_are_missing() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("GEMINI_API_KEY", "  "), ("OPIK_API_KEY", "")]),
    )
    .unwrap();
    assert!(!config.ai.is_configured());
    assert!(config.opik.api_key.is_none());
}

#[test]
fn test_invalid_bind_is_error() {
    let result = Config::from_sources(FileConfig::default(), env_from(&[("RECODE_BIND", "nope")]));
    assert!(result.is_err());
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
}

#[test]
fn test_key_fingerprint() {
    let fp = key_fingerprint("secret");
    assert_eq!(fp.len(), 8);
    assert_eq!(fp, key_fingerprint("secret"));
    assert_ne!(fp, key_fingerprint("other"));
    // sha256("secret") = 2bb80d53...
    assert_eq!(fp, "2bb80d53");
}
