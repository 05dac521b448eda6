//! Console stand-in for the game: logs each action and reports a combo as
//! resolving for a fixed time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use kickstream_common::GameplayError;
use kickstream_live::GameplayActions;

pub struct ConsoleGameplay {
    started: Instant,
    resolve_for: Duration,
    /// Milliseconds since `started` at which the current combo ends.
    busy_until_ms: AtomicU64,
    combos: AtomicU64,
    squads: AtomicU64,
}

impl ConsoleGameplay {
    pub fn new(resolve_for: Duration) -> Self {
        Self {
            started: Instant::now(),
            resolve_for,
            busy_until_ms: AtomicU64::new(0),
            combos: AtomicU64::new(0),
            squads: AtomicU64::new(0),
        }
    }

    pub fn combos(&self) -> u64 {
        self.combos.load(Ordering::Relaxed)
    }

    pub fn squads(&self) -> u64 {
        self.squads.load(Ordering::Relaxed)
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl GameplayActions for ConsoleGameplay {
    fn activate_combo_action(&self, combo_count: u32) -> Result<(), GameplayError> {
        let until = self.elapsed_ms() + self.resolve_for.as_millis() as u64;
        self.busy_until_ms.store(until, Ordering::Relaxed);
        let total = self.combos.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(combo_count, total, "COMBO x{combo_count}");
        Ok(())
    }

    fn activate_squad_spawn_action(&self) -> Result<(), GameplayError> {
        let total = self.squads.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(total, "SQUAD SPAWN");
        Ok(())
    }

    fn is_combo_action_resolving(&self) -> bool {
        self.elapsed_ms() < self.busy_until_ms.load(Ordering::Relaxed)
    }
}
