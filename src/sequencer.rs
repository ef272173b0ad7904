//! Unbiased random ordering
//!
//! Every place that needs a random order (game pools, anagram tiles) goes
//! through the Fisher–Yates shuffle here. The random source is injected so
//! tests and replays can supply fixed draws.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Result type for operations that draw randomness
pub type SequencerResult<T> = Result<T, RandomSourceError>;

/// Faults reported by a random source
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RandomSourceError {
    #[error("Random draw {0} is outside [0, 1)")]
    OutOfRange(f64),

    #[error("Random source exhausted")]
    Exhausted,
}

/// A source of uniform draws in [0, 1)
pub trait RandomSource {
    fn next_unit(&mut self) -> SequencerResult<f64>;
}

/// Adapter for any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    /// Thread-local generator, seeded from the OS
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible generator for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> SequencerResult<f64> {
        Ok(self.0.random::<f64>())
    }
}

/// Replays a fixed list of draws, then reports `Exhausted`
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<f64>,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Number of draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> SequencerResult<f64> {
        self.draws.pop_front().ok_or(RandomSourceError::Exhausted)
    }
}

/// Draw an index uniformly from `0..bound`.
///
/// `bound` must be non-zero. Draws outside [0, 1) (including NaN) are
/// rejected instead of being clamped into range.
pub(crate) fn draw_index<S>(source: &mut S, bound: usize) -> SequencerResult<usize>
where
    S: RandomSource + ?Sized,
{
    let unit = source.next_unit()?;
    if !(0.0..1.0).contains(&unit) {
        return Err(RandomSourceError::OutOfRange(unit));
    }
    let index = (unit * bound as f64).floor() as usize;
    // Float rounding can land on `bound` for draws a hair below 1.0
    Ok(index.min(bound - 1))
}

/// Fisher–Yates shuffle of `items` in place.
///
/// Walks `i` from the last index down to 1 and swaps it with a uniform
/// `j` in `0..=i`, so each of the n! orderings is equally likely. Slices of
/// length 0 or 1 are left alone without drawing.
pub fn shuffle_in_place<T, S>(items: &mut [T], source: &mut S) -> SequencerResult<()>
where
    S: RandomSource + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = draw_index(source, i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}

/// Return a shuffled copy of `items`, leaving the input untouched
pub fn shuffle<T, S>(items: &[T], source: &mut S) -> SequencerResult<Vec<T>>
where
    T: Clone,
    S: RandomSource + ?Sized,
{
    let mut shuffled = items.to_vec();
    shuffle_in_place(&mut shuffled, source)?;
    Ok(shuffled)
}
