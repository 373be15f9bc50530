//! Configuration loader tests

use graft_domain::error::Error;
use graft_infrastructure::config::loader::validate_app_config;
use graft_infrastructure::config::{AppConfig, ConfigLoader};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("graft.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn test_explicit_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
json_format = true

[values]
files = ["values.yaml"]
env_prefix = "APP_"

[values.defaults]
mode = "prod"
server = { port = 8080 }
"#,
    );

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
    assert_eq!(config.values.files, vec![PathBuf::from("values.yaml")]);
    assert_eq!(config.values.env_prefix.as_deref(), Some("APP_"));
    assert_eq!(config.values.defaults.get("mode"), Some(&json!("prod")));
    assert_eq!(config.values.defaults.get("server"), Some(&json!({"port": 8080})));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[values]\nfiles = []\n");

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
    assert_eq!(config.logging, AppConfig::default().logging);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new().with_config_path(dir.path().join("absent.toml"));

    let err = loader.load().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(loader.config_path().is_some());
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n");

    let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
    assert!(err.to_string().contains("loud"));
}

#[test]
fn test_empty_env_prefix_is_rejected() {
    let mut config = AppConfig::default();
    config.values.env_prefix = Some(String::new());

    assert!(matches!(
        validate_app_config(&config),
        Err(Error::Configuration { .. })
    ));
    assert!(validate_app_config(&AppConfig::default()).is_ok());
}

#[test]
fn test_malformed_toml_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging\nlevel = ");

    let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let mut config = AppConfig::default();
    config.logging.level = "warn".to_string();
    config.values.files.push(PathBuf::from("a.json"));
    config.values.defaults.insert("k".to_string(), json!("v"));

    let loader = ConfigLoader::new();
    loader.save_to_file(&config, &path).unwrap();
    let reloaded = ConfigLoader::new().with_config_path(&path).load().unwrap();
    assert_eq!(reloaded, config);
}

/// Environment variables override the file
///
/// Run with: `cargo test -p graft-infrastructure config_tests -- --test-threads=1 --ignored`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"debug\"\n");

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        std::env::set_var("GRAFTCFGTEST__LOGGING__LEVEL", "error");
    }
    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("GRAFTCFGTEST")
        .load()
        .unwrap();
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        std::env::remove_var("GRAFTCFGTEST__LOGGING__LEVEL");
    }

    assert_eq!(config.logging.level, "error");
}
