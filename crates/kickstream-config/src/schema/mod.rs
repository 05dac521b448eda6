//! Configuration schema types for kickstream.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod connection;
mod gifts;
mod system;

pub use connection::*;
pub use gifts::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Every option has a default; only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct KickstreamConfig {
    pub connection: ConnectionConfig,
    pub gifts: GiftsConfig,
    pub hearts: HeartsConfig,
    pub dispatch: DispatchConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}
