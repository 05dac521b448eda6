//! Capabilities consumed from the gameplay layer.

use std::str::FromStr;

use kickstream_common::{GameplayError, KickstreamError};

/// Actions the live feed can trigger in the game.
///
/// Calls are fire-and-forget from the feed's point of view; an error only
/// means the action could not run and is logged by the caller.
pub trait GameplayActions: Send + Sync {
    /// Run the power action with `combo_count` simultaneous effects.
    fn activate_combo_action(&self, combo_count: u32) -> Result<(), GameplayError>;

    /// Spawn the squad of helpers.
    fn activate_squad_spawn_action(&self) -> Result<(), GameplayError>;

    /// Whether a combo action is still playing out. Polled once per tick.
    fn is_combo_action_resolving(&self) -> bool;
}

/// Operator commands that trigger a gameplay action directly, bypassing
/// the combo queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualCommand {
    Combo,
    SquadSpawn,
}

impl FromStr for ManualCommand {
    type Err = KickstreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combo" | "super_kick" | "superkick" | "kick" => Ok(ManualCommand::Combo),
            "squad" | "squad_spawn" | "spawn" => Ok(ManualCommand::SquadSpawn),
            other => Err(KickstreamError::UnknownCommand(other.to_string())),
        }
    }
}
