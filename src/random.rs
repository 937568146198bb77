//! Random sources for generation.
//!
//! The generator never reaches for a global RNG. Every stage takes a
//! [`RandomSource`], so a run is a pure function of its parameters and the
//! sequence of draws it is handed.

use rand::Rng;
use sha2::{Digest, Sha256};

/// A source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when it runs out.
///
/// Values are clamped into `[0, 1)` so a hand-written sequence cannot push
/// the generator outside its contract. An empty sequence always yields `0.0`.
#[derive(Debug, Clone)]
pub struct Replay {
    values: Vec<f64>,
    cursor: usize,
}

impl Replay {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for Replay {
    fn uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        clamp_unit(value)
    }
}

/// Adapts a closure returning uniform floats into a [`RandomSource`].
pub struct FromFn<F>(pub F);

impl<F: FnMut() -> f64> RandomSource for FromFn<F> {
    fn uniform(&mut self) -> f64 {
        clamp_unit((self.0)())
    }
}

/// Largest `f64` strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, BELOW_ONE)
    }
}

/// Derive a stable 64-bit seed from an arbitrary label.
///
/// Numeric labels are used as-is so `--seed 42` means seed 42; anything
/// else is hashed.
pub fn seed_from_label(label: &str) -> u64 {
    if let Ok(seed) = label.trim().parse::<u64>() {
        return seed;
    }
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[0..8]);
    u64::from_le_bytes(bytes)
}
