//! Random number sources for pipe placement
//!
//! The tick takes randomness as a parameter so tests can script exactly
//! where pipes appear.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform integer source with inclusive bounds
pub trait RandomSource {
    /// Value in `[low, high]`; returns `low` when the range is empty
    fn uniform_int(&mut self, low: i32, high: i32) -> i32;
}

/// Seeded PCG generator used by the game binary
#[derive(Debug, Clone)]
pub struct PcgRandom {
    seed: u64,
    rng: Pcg32,
}

impl PcgRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for PcgRandom {
    fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Replays a fixed list of values (cycling), clamped into the requested range
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<i32>,
    next: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values, next: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        let Some(&value) = self.values.get(self.next % self.values.len().max(1)) else {
            return low;
        };
        self.next += 1;
        value.clamp(low, high.max(low))
    }
}
