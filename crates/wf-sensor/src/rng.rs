//! Deterministic RNG for synthetic sensor traces.
//!
//! A trace generated from the same seed is identical across runs, so demo
//! output and tests are reproducible.  Independent noise sources (position
//! jitter, compass noise) take their own child stream so that changing how
//! often one of them is sampled does not shift the other.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct SensorRng(SmallRng);

impl SensorRng {
    pub fn new(seed: u64) -> Self {
        SensorRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent stream for noise source `offset`.
    pub fn child(&mut self, offset: u64) -> SensorRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SensorRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform in `[-amplitude, amplitude]`; zero if `amplitude` is not positive.
    #[inline]
    pub fn symmetric(&mut self, amplitude: f64) -> f64 {
        if amplitude > 0.0 {
            self.0.gen_range(-amplitude..=amplitude)
        } else {
            0.0
        }
    }
}
