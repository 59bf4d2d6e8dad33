//! Tests for configuration file loading
//!
//! Each test writes its own file under a fresh temporary directory.

use fyyur_common::config::{Overrides, ServerConfig, TomlConfig};
use fyyur_common::Error;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist.toml");

    let config = TomlConfig::load_or_default(Some(&missing)).unwrap();

    assert!(config.port.is_none());
    assert!(config.database_path.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_explicit_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        "database_path = \"/var/lib/fyyur/fyyur.db\"\nport = 5050\n\n[logging]\nlevel = \"warn\"\n",
    )
    .unwrap();

    let config = TomlConfig::load_or_default(Some(&path)).unwrap();
    let resolved = ServerConfig::resolve(Overrides::default(), config);

    assert_eq!(resolved.port, 5050);
    assert_eq!(resolved.database_path, PathBuf::from("/var/lib/fyyur/fyyur.db"));
    assert_eq!(resolved.log_level, "warn");
}

#[test]
fn test_malformed_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = [").unwrap();

    let result = TomlConfig::load_or_default(Some(&path));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_cli_log_level_overrides_file() {
    let file = TomlConfig::from_toml_str("[logging]\nlevel = \"warn\"").unwrap();
    let overrides = Overrides {
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    assert_eq!(ServerConfig::resolve(overrides, file).log_level, "debug");
}
