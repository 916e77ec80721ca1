//! Injected randomness
//!
//! The simulation never seeds or owns a generator. Launch direction and bonus
//! rolls draw from whatever `RandomSource` the caller passes into `tick`, so a
//! seeded `Pcg32` gives reproducible rounds and tests can script exact rolls.

use std::collections::VecDeque;

use rand::Rng;

/// Uniform integer draws
pub trait RandomSource {
    /// Uniform value in `0..bound` (`bound` > 0)
    fn below(&mut self, bound: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }
}

/// Replays a fixed list of draws, each reduced modulo the requested bound
///
/// Once the list is exhausted every draw returns 0.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    values: VecDeque<u32>,
}

impl FixedSequence {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for FixedSequence {
    fn below(&mut self, bound: u32) -> u32 {
        self.values.pop_front().map_or(0, |v| v % bound)
    }
}
