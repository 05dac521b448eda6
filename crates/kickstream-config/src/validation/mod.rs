//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod connection;
mod gifts;
mod helpers;
mod misc;


use crate::schema::KickstreamConfig;
use kickstream_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &KickstreamConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    connection::validate_connection(&mut errors, config);
    gifts::validate_gifts(&mut errors, config);
    gifts::validate_hearts(&mut errors, config);
    misc::validate_dispatch(&mut errors, config);
    misc::validate_simulation(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
