//! Random sources for winner selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
pub trait RandomSource: Send {
    /// Return an index in `0..upper`. Callers never pass zero.
    fn pick_index(&mut self, upper: usize) -> usize;
}

/// `StdRng`-backed source, seeded from the OS or from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible draws, for replaying a session with the same winners.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Replays a fixed list of indices, cycling when exhausted. Each value is
/// reduced modulo `upper`.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<usize>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for FixedSequence {
    fn pick_index(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}
