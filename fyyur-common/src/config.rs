//! Configuration loading
//!
//! Bootstrap settings are resolved in priority order:
//! 1. Command-line argument or environment variable (supplied as [`Overrides`])
//! 2. TOML config file
//! 3. OS-dependent compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address (local access only)
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Bootstrap configuration loaded from TOML file
///
/// Every key is optional. A missing key falls back to the compiled default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Address to bind the HTTP listener to
    #[serde(default)]
    pub bind_address: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the configuration file if present
    ///
    /// A missing file is not an error: defaults are used and a message is logged.
    /// A file that exists but does not parse is reported as [`Error::Config`].
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        match path {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            Some(path) => {
                if explicit_path.is_some() {
                    warn!("Config file not found: {} (using defaults)", path.display());
                } else {
                    info!("No config file at {} (using defaults)", path.display());
                }
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine config directory (using defaults)");
                Ok(Self::default())
            }
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
}

impl ServerConfig {
    /// Merge overrides, file configuration and compiled defaults
    pub fn resolve(overrides: Overrides, file: TomlConfig) -> Self {
        Self {
            bind_address: overrides
                .bind_address
                .or(file.bind_address)
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or_else(default_database_path),
            log_level: overrides.log_level.unwrap_or(file.logging.level),
        }
    }

    /// Socket address string for the HTTP listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Default configuration file path for the platform
///
/// `~/.config/fyyur/config.toml` on Linux, the platform config dir elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"))
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur").join("fyyur.db"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data/fyyur.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.database_path.is_none());
        assert!(config.port.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_toml_parses() {
        let config = TomlConfig::from_toml_str(
            r#"
            database_path = "/srv/fyyur/fyyur.db"
            port = 8080
            bind_address = "0.0.0.0"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/srv/fyyur/fyyur.db")));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("port = \"not a number\"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_overrides_take_priority_over_file() {
        let file = TomlConfig {
            database_path: Some(PathBuf::from("/from/file.db")),
            port: Some(7000),
            bind_address: Some("10.0.0.1".to_string()),
            logging: LoggingConfig::default(),
        };
        let overrides = Overrides {
            port: Some(9000),
            database_path: Some(PathBuf::from("/from/cli.db")),
            ..Default::default()
        };

        let config = ServerConfig::resolve(overrides, file);
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/from/cli.db"));
        assert_eq!(config.bind_address, "10.0.0.1");
        assert_eq!(config.listen_address(), "10.0.0.1:9000");
    }

    #[test]
    fn test_compiled_defaults() {
        let config = ServerConfig::resolve(Overrides::default(), TomlConfig::default());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.log_level, "info");
        assert!(config.database_path.ends_with("fyyur.db"));
    }
}
