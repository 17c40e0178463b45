//! Seeded linear-congruential PRNG.
//!
//! `state = (state * 9301 + 49297) mod 233280`, output `state / 233280`.
//! The constants are part of the world format: changing them changes every
//! generated world. Every draw consumes one step, so the order in which
//! generation calls into the stream is as significant as the seed.

use crate::constants::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};
use crate::error::MeadowError;

/// Reproducible stream of floats in [0, 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: i64,
}

impl Lcg {
    /// Create a stream starting at `seed`. Negative seeds are allowed and are
    /// folded with Euclidean modulo on the first step.
    pub fn new(seed: i64) -> Self {
        Self { state: seed }
    }

    /// Current raw state (the seed before the first draw).
    pub fn state(&self) -> i64 {
        self.state
    }

    /// Advance one step and return a float in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        // Reducing first keeps the multiply in range for any i64 seed; the
        // result is identical to the unreduced recurrence.
        let reduced = self.state.rem_euclid(LCG_MODULUS);
        self.state = (reduced * LCG_MULTIPLIER + LCG_INCREMENT).rem_euclid(LCG_MODULUS);
        self.state as f64 / LCG_MODULUS as f64
    }

    /// `lo + next() * span`.
    pub fn range(&mut self, lo: f64, span: f64) -> f64 {
        lo + self.next_f64() * span
    }

    /// `floor(next() * n)`, in [0, n).
    pub fn below(&mut self, n: u32) -> u32 {
        (self.next_f64() * n as f64).floor() as u32
    }

    /// One draw compared against `probability`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Pick one entry of a non-empty palette with a single draw.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = self.below(items.len() as u32) as usize;
        &items[idx]
    }
}

/// Parse a world seed given as text (CLI flag, config override).
pub fn parse_seed(text: &str) -> Result<u32, MeadowError> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| MeadowError::InvalidSeed(text.to_string()))
}
