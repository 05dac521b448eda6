//! Turns the loaded config plus CLI overrides into session settings.

use std::time::Duration;

use kickstream_common::KickstreamError;
use kickstream_config::{validation, KickstreamConfig, LogLevel};
use kickstream_live::{ConnectionConfig, SessionConfig};

use crate::cli::{Args, LevelArg};

/// Load the config file named on the command line, or the default one.
pub fn load(args: &Args) -> Result<KickstreamConfig, KickstreamError> {
    let mut config = match &args.config {
        Some(path) => kickstream_config::load_config_from(path)?,
        None => kickstream_config::load_config()?,
    };
    apply_overrides(&mut config, args)?;
    Ok(config)
}

/// Apply CLI overrides and re-validate.
pub fn apply_overrides(config: &mut KickstreamConfig, args: &Args) -> Result<(), KickstreamError> {
    if let Some(url) = &args.url {
        config.connection.server_url = url.clone();
    }
    if args.test_mode {
        config.simulation.test_mode = true;
    }
    validation::validate(config)?;
    Ok(())
}

pub fn session_config(config: &KickstreamConfig) -> SessionConfig {
    SessionConfig {
        connection: ConnectionConfig {
            server_url: config.connection.server_url.clone(),
            reconnect_delay: Duration::from_secs(u64::from(config.connection.reconnect_delay_secs)),
            connect_timeout: Duration::from_secs(u64::from(config.connection.connect_timeout_secs)),
            max_reconnect_attempts: config.connection.max_reconnect_attempts,
        },
        rose_aliases: config.gifts.rose_aliases.clone(),
        perfume_aliases: config.gifts.perfume_aliases.clone(),
        heart_capacity: config.hearts.capacity as usize,
        pacing_delay: Duration::from_secs_f64(config.dispatch.pacing_delay_secs),
        test_mode: config.simulation.test_mode,
    }
}

/// Interval between dispatch ticks.
pub fn tick_period(config: &KickstreamConfig) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(config.dispatch.tick_rate_hz.max(1)))
}

/// Filter used when `RUST_LOG` is unset: the CLI level if given, otherwise
/// the configured level, applied to this workspace's crates.
pub fn log_directive(cli_level: Option<LevelArg>, config_level: LogLevel) -> String {
    let level = cli_level.map(LogLevel::from).unwrap_or(config_level).as_directive();
    format!("kickstream_app={level},kickstream_live={level},kickstream_config={level}")
}
