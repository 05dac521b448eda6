//! Core TOML config loading: read from path or platform default.

use crate::schema::KickstreamConfig;
use crate::validation;
use kickstream_common::ConfigError;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::template::default_config_toml;

/// Directory name under the platform config dir.
const APP_DIR: &str = "kickstream";
const CONFIG_FILE: &str = "config.toml";

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. If the parsed config fails
/// validation, a warning is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<KickstreamConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: KickstreamConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(KickstreamConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/kickstream/config.toml`
/// On macOS: `~/Library/Application Support/kickstream/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<KickstreamConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(KickstreamConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// `<platform config dir>/kickstream/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Write the commented default config to `path`, creating parent
/// directories. An existing file is never overwritten; returns whether a
/// file was written.
pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
    let write_error = |e: std::io::Error| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("config already exists at {}, leaving it", path.display());
            return Ok(false);
        }
        Err(e) => return Err(write_error(e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(write_error)?;

    info!("created default config at {}", path.display());
    Ok(true)
}
