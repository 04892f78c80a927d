//! Injectable randomness
//!
//! The simulation only ever asks for a uniform float in `[0, 1)`. Sessions use
//! a seeded `Pcg32`; tests script exact sequences with `SequenceRandom`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform random numbers in `[0, 1)`
pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Value in `[min, min + span)`
    fn next_span(&mut self, min: f32, span: f32) -> f32 {
        min + self.next_unit() * span
    }

    /// Value in `[-span/2, span/2)`
    fn next_centered(&mut self, span: f32) -> f32 {
        (self.next_unit() - 0.5) * span
    }

    /// True with the given probability
    fn chance(&mut self, probability: f32) -> bool {
        self.next_unit() < probability
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded session RNG
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    /// Values are clamped into `[0, 1)`; an empty list yields 0.0 forever
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// A source that always returns the same value
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// How many values have been drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
