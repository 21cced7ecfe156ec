//! Randomness seam for the simulation.
//!
//! Every random decision (spawn ages, courage, encounter rolls, opponent
//! picks, duel outcomes) goes through [`RandomSource`], so a run is fully
//! determined by the source it is handed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Normal draw, Box-Muller over two uniform draws.
    fn next_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_uniform().max(f64::MIN_POSITIVE);
        let u2 = self.next_uniform();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + z * std_dev
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index called with an empty range");
        let scaled = (self.next_uniform() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }
}

/// Seeded ChaCha stream; identical seeds replay identical runs.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::new(42)
    }
}

impl RandomSource for SeededRng {
    fn next_uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Replays a fixed list of uniform draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    /// # Panics
    ///
    /// Panics if `draws` is empty.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "scripted rng needs at least one draw");
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_uniform(&mut self) -> f64 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
