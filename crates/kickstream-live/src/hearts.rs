//! Heart-tap accumulator.
//!
//! Collects one viewer name per like into a fixed number of slots. When the
//! last slot is written, one slot is drawn at random and its viewer becomes
//! a single-shot combo entry; the slots are then cleared in the same call,
//! so no tap is lost or counted twice across the reset.

use std::fmt;

use tracing::{debug, info};

use crate::dispatch::QueueEntry;
use crate::random::RandomSource;

pub struct HeartAccumulator {
    slots: Vec<String>,
    write_index: usize,
    random: Box<dyn RandomSource>,
}

impl HeartAccumulator {
    /// Create an accumulator with `capacity` slots (at least one).
    pub fn new(capacity: usize, random: Box<dyn RandomSource>) -> Self {
        Self {
            slots: vec![String::new(); capacity.max(1)],
            write_index: 0,
            random,
        }
    }

    /// Record one tap. Returns the winning entry when this tap filled the
    /// last slot.
    pub fn add_tap(&mut self, subject: impl Into<String>) -> Option<QueueEntry> {
        let subject = subject.into();
        debug!(
            subject = %subject,
            count = self.write_index + 1,
            capacity = self.capacity(),
            "heart tap"
        );
        self.slots[self.write_index] = subject;
        self.write_index += 1;

        if self.write_index < self.capacity() {
            return None;
        }

        let winner = self.draw_winner();
        self.reset();
        Some(winner)
    }

    /// Taps recorded since the last draw.
    pub fn tap_count(&self) -> usize {
        self.write_index
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Recorded subjects, oldest first.
    pub fn recorded(&self) -> &[String] {
        &self.slots[..self.write_index]
    }

    /// Clear all slots without drawing.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
        self.write_index = 0;
    }

    fn draw_winner(&mut self) -> QueueEntry {
        let index = self.random.pick_index(self.capacity()) % self.capacity();
        let winner = std::mem::take(&mut self.slots[index]);
        info!(subject = %winner, index, "heart threshold reached, winner drawn");
        QueueEntry::new(winner, 1)
    }
}

impl fmt::Debug for HeartAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeartAccumulator")
            .field("capacity", &self.capacity())
            .field("write_index", &self.write_index)
            .finish()
    }
}
