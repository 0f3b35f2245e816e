//! RNG module - seedable random source for tile spawns
//!
//! Spawning needs two draws: which empty cell receives the tile and whether
//! the tile is a 2 or a 4. Both come from a small LCG so that a seed fully
//! determines a game (tests and replays rely on this).

use crate::types::{SPAWN_FOUR_CHANCE, SPAWN_HIGH, SPAWN_LOW, SPAWN_ODDS_DENOMINATOR};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle with
    /// a short period. `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Returns true with probability `numerator / denominator`
    pub fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        self.next_range(denominator) < numerator
    }

    /// Pick one element uniformly, `None` for an empty slice
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let i = self.next_range(items.len() as u32) as usize;
        items.get(i).copied()
    }

    /// Draw a spawn value: 4 with probability 1/10, otherwise 2
    pub fn spawn_value(&mut self) -> u32 {
        if self.chance(SPAWN_FOUR_CHANCE, SPAWN_ODDS_DENOMINATOR) {
            SPAWN_HIGH
        } else {
            SPAWN_LOW
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
