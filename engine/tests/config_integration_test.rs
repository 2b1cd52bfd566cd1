//! Integration tests for configuration management
//!
//! These tests verify that the Config struct can be loaded from disk,
//! validated, and combined with command-line overrides.

use organizer_engine::config::{Config, Overrides};
use organizer_sdk::errors::EngineError;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_toml_parsing() {
    let toml_content = r#"
[core]
log_level = "debug"
data_dir = "/srv/inventory"

[paths]
projects_file = "scan/projects.json"
proposal_file = "/tmp/proposal.md"

[classifier]
base_url = "http://localhost:8080/v1beta"
model = "gemini-1.5-pro"
batch_size = 10
timeout_secs = 60
temperature = 0.4
api_key_env = "MY_GEMINI_KEY"
"#;

    let config = Config::from_toml_str(toml_content).expect("valid config should parse");

    assert_eq!(config.core.log_level, "debug");
    assert_eq!(config.classifier.model, "gemini-1.5-pro");
    assert_eq!(config.classifier.batch_size, 10);
    assert_eq!(config.classifier.timeout_secs, 60);
    assert_eq!(config.classifier.api_key_env, "MY_GEMINI_KEY");
    // Unset fields keep their defaults
    assert_eq!(config.classifier.top_k, 40);
    assert_eq!(config.classifier.max_output_tokens, 2048);

    assert_eq!(
        config.projects_file(),
        PathBuf::from("/srv/inventory/scan/projects.json")
    );
    assert_eq!(config.proposal_file(), PathBuf::from("/tmp/proposal.md"));
    assert_eq!(
        config.sync_file(),
        PathBuf::from("/srv/inventory/notes_sync_data.json")
    );
}

#[test]
fn test_minimal_config_with_defaults() {
    let config = Config::from_toml_str("").expect("empty config should use defaults");

    assert_eq!(config.core.log_level, "info");
    assert_eq!(config.classifier.batch_size, 5);
    assert_eq!(config.classifier.timeout_secs, 30);
    assert_eq!(config.paths.projects_file, PathBuf::from("projects.json"));

    // ~ is expanded
    assert!(!config.core.data_dir.to_string_lossy().starts_with('~'));
    assert!(config.core.data_dir.ends_with(".project_data"));
}

#[test]
fn test_invalid_log_level_detection() {
    let result = Config::from_toml_str("[core]\nlog_level = \"verbose\"\n");

    match result {
        Err(EngineError::Config(msg)) => assert!(msg.contains("Invalid log level")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_invalid_classifier_settings() {
    assert!(Config::from_toml_str("[classifier]\nbatch_size = 0\n").is_err());
    assert!(Config::from_toml_str("[classifier]\ntimeout_secs = 0\n").is_err());
    assert!(Config::from_toml_str("[classifier]\ntop_p = 1.5\n").is_err());
    assert!(Config::from_toml_str("[classifier]\napi_key_env = \"  \"\n").is_err());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let result = Config::from_toml_str("[core\nlog_level = ");
    assert!(matches!(result, Err(EngineError::Config(_))));
}

#[test]
fn test_load_from_file_with_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("organizer.toml");
    std::fs::write(
        &path,
        "[core]\nlog_level = \"warn\"\n\n[classifier]\nmodel = \"gemini-1.5-pro\"\nbatch_size = 8\n",
    )
    .unwrap();

    let overrides = Overrides {
        log_level: Some("trace".to_string()),
        data_dir: Some(dir.path().to_path_buf()),
        model: None,
        batch_size: Some(2),
    };

    let config = Config::load_with(Some(&path), &overrides).unwrap();

    assert_eq!(config.core.log_level, "trace");
    assert_eq!(config.core.data_dir, dir.path());
    assert_eq!(config.classifier.model, "gemini-1.5-pro");
    assert_eq!(config.classifier.batch_size, 2);
    assert_eq!(config.projects_file(), dir.path().join("projects.json"));
}

#[test]
fn test_overrides_are_validated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("organizer.toml");
    std::fs::write(&path, "").unwrap();

    let overrides = Overrides {
        batch_size: Some(0),
        ..Default::default()
    };

    assert!(Config::load_with(Some(&path), &overrides).is_err());
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load(Some(&dir.path().join("absent.toml")));

    match result {
        Err(EngineError::Config(msg)) => assert!(msg.contains("Failed to read config file")),
        other => panic!("expected config error, got {:?}", other),
    }
}
