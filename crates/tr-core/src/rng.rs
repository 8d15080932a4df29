//! Deterministic simulation RNG.
//!
//! Every random draw in the workspace (weather rotation, incident generation,
//! rush-hour congestion) goes through one seeded [`SimRng`] owned by the
//! simulation, so a run is fully reproducible from `SimConfig::seed`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG for network evolution and exogenous events.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `numerator / denominator`.
    ///
    /// Returns `false` when `denominator` is zero; a numerator at or above the
    /// denominator always succeeds.
    #[inline]
    pub fn gen_ratio(&mut self, numerator: u32, denominator: u32) -> bool {
        if denominator == 0 {
            return false;
        }
        self.0.gen_ratio(numerator.min(denominator), denominator)
    }

    /// Choose a random element from a slice; `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
