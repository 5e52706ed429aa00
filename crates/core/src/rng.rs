//! RNG module - seeded random source for spawns
//!
//! Wraps a PCG32 generator so that a seed fully determines a game: food
//! placement, bonus fruit and boost spawns all draw from the same stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::{BoostKind, GRID_SIZE};

/// Seeded game RNG
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: Pcg32,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random value in range [0, max)
    pub fn next_range(&mut self, max: usize) -> usize {
        debug_assert!(max > 0);
        self.inner.random_range(0..max)
    }

    /// Random axis value on the grid
    pub fn next_axis(&mut self) -> i32 {
        self.inner.random_range(0..GRID_SIZE)
    }

    /// Uniformly random boost kind
    pub fn next_boost(&mut self) -> BoostKind {
        BoostKind::ALL[self.next_range(BoostKind::ALL.len())]
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(1)
    }
}
