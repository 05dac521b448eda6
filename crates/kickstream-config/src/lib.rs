//! kickstream configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kickstream_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{KickstreamConfig, LogLevel, CONFIG_SCHEMA_VERSION};

use kickstream_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<KickstreamConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path. A missing file is an error here;
/// only the default location is created on demand.
pub fn load_config_from(path: &Path) -> Result<KickstreamConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &KickstreamConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = KickstreamConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"connection\""));
        assert!(json.contains("\"gifts\""));
        assert!(json.contains("\"hearts\""));
        assert!(json.contains("\"dispatch\""));
        assert!(json.contains("\"simulation\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = KickstreamConfig::default();
        let json = config_to_json(&config);
        let parsed: KickstreamConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.connection.server_url, "ws://localhost:8080");
        assert_eq!(parsed.hearts.capacity, 100);
    }

    #[test]
    fn load_config_from_missing_path_errors() {
        let result = load_config_from(Path::new("/tmp/kickstream_missing_config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
