//! Deterministic RNG for scenario generation.
//!
//! Planning itself is fully deterministic.  Randomness is only used to build
//! stress-test graphs and agent lists, so the same seed must always produce
//! the same scenario.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG used by random graph and scenario builders.
pub struct GraphRng(SmallRng);

impl GraphRng {
    pub fn new(seed: u64) -> Self {
        GraphRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child RNG, e.g. one per generated scenario.
    pub fn child(&mut self, offset: u64) -> GraphRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        GraphRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform index in `0..n`.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
