//! Dispatch pacing, simulation, and logging settings.

use serde::{Deserialize, Serialize};

/// Combo queue pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Minimum wait between two combo actions, in seconds (valid range: 0-60).
    pub pacing_delay_secs: f64,
    /// Consumer ticks per second (valid range: 1-240).
    pub tick_rate_hz: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            pacing_delay_secs: 3.0,
            tick_rate_hz: 60,
        }
    }
}

/// Local testing aids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Enables the direct like/gift simulators.
    pub test_mode: bool,
    /// How long the console gameplay stand-in reports a combo action as
    /// resolving, in seconds (valid range: 0-60).
    pub combo_resolve_secs: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            test_mode: false,
            combo_resolve_secs: 2.5,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The `tracing` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
