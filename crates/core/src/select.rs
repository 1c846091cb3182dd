//! Order randomization for question selection.
//!
//! All helpers are pure with respect to their input slices: they clone into a
//! fresh `Vec` and never reorder the caller's data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Question;

/// Returns a uniformly random permutation of `items` (Fisher–Yates).
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Draws `min(count, items.len())` elements without replacement.
///
/// Asking for more than is available is not an error; the result is simply a
/// full shuffled copy.
pub fn sample_with<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut out = shuffle_with(items, rng);
    out.truncate(count);
    out
}

/// Owns the random source used to build a session.
#[derive(Debug, Clone)]
pub struct Selector {
    rng: StdRng,
}

impl Selector {
    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic selector for tests and reproducible runs.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        shuffle_with(items, &mut self.rng)
    }

    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        sample_with(items, count, &mut self.rng)
    }

    /// Returns a copy of `question` with its options reordered.
    ///
    /// Options move as whole values, so `is_correct` and `reason` stay with
    /// their text and the correct index is recomputed from the new order.
    pub fn shuffle_options(&mut self, question: &Question) -> Question {
        Question {
            options: self.shuffle(&question.options),
            ..question.clone()
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::from_os()
    }
}
