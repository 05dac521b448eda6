//! Tests for TOML config loading, creation, and path resolution.

use super::template::default_config_toml;
use super::*;
use crate::schema::KickstreamConfig;
use kickstream_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_kickstream_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[connection]
server_url = "ws://127.0.0.1:9000"
reconnect_delay_secs = 2

[hearts]
capacity = 50
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.connection.server_url, "ws://127.0.0.1:9000");
    assert_eq!(config.connection.reconnect_delay_secs, 2);
    assert_eq!(config.hearts.capacity, 50);
    // Defaults preserved
    assert_eq!(config.connection.connect_timeout_secs, 15);
    assert_eq!(config.gifts.rose_aliases[0], "Rose");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[hearts]
capacity = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.hearts.capacity, 100);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kickstream").join("config.toml");

    assert!(create_default_config(&path).unwrap());
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.connection.server_url, "ws://localhost:8080");
    assert_eq!(config.hearts.capacity, 100);
}

#[test]
fn create_default_config_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[hearts]\ncapacity = 7\n").unwrap();

    assert!(!create_default_config(&path).unwrap());
    let config = load_from_path(&path).unwrap();
    assert_eq!(config.hearts.capacity, 7);
}

#[test]
fn default_config_toml_is_valid() {
    let config: KickstreamConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("kickstream"));
        assert!(path_str.ends_with("config.toml"));
    }
}
