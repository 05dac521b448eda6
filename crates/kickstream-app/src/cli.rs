use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use kickstream_config::LogLevel;

/// kickstream: turns live-stream likes and gifts into paced gameplay actions.
#[derive(Parser, Debug)]
#[command(name = "kickstream", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Feed server URL override (ws:// or wss://).
    #[arg(long)]
    pub url: Option<String>,

    /// Log level override.
    #[arg(long, value_enum)]
    pub log_level: Option<LevelArg>,

    /// Seed for heart winner draws, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable the like/rose/perfume console simulators.
    #[arg(long)]
    pub test_mode: bool,
}

/// Accepted values of `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Debug,
    Info,
    #[value(alias = "warning")]
    Warn,
    Error,
}

impl From<LevelArg> for LogLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Debug => LogLevel::Debug,
            LevelArg::Info => LogLevel::Info,
            LevelArg::Warn => LogLevel::Warning,
            LevelArg::Error => LogLevel::Error,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
