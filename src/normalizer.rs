//! Question normalization
//!
//! This module prepares the authored question list for presentation:
//! every question gets a stable non-empty name, and the presentation
//! order is fixed once at trial start (identity or a uniform shuffle).

use rand::seq::SliceRandom;
use tracing::debug;

use crate::types::Question;

/// Uniform shuffle of an index sequence.
///
/// The engine only ever needs one randomization primitive; hosts that
/// replay trials or test deterministically supply their own implementation.
pub trait Randomizer {
    /// Shuffle `indices` in place, uniformly
    fn shuffle(&mut self, indices: &mut [usize]);
}

/// Default randomizer backed by the thread-local RNG
pub struct ThreadRngRandomizer;

impl Randomizer for ThreadRngRandomizer {
    fn shuffle(&mut self, indices: &mut [usize]) {
        indices.shuffle(&mut rand::thread_rng());
    }
}

/// Assigns names and presentation order before any rendering
pub struct QuestionNormalizer;

impl QuestionNormalizer {
    /// Fill in auto-generated names for questions that have none.
    ///
    /// Generated names are `q<N>`, 1-based in original order, zero-padded
    /// to the digit width of the question count (`q01`..`q10` for ten
    /// questions). Pre-named questions are left untouched.
    pub fn normalize_names(questions: &mut [Question]) {
        let width = digit_width(questions.len());
        for (idx, question) in questions.iter_mut().enumerate() {
            if question.name.is_empty() {
                question.name = format!("q{:0width$}", idx + 1, width = width);
            }
        }
        let names: Vec<&str> = questions.iter().map(|q| q.name.as_str()).collect();
        debug!("normalized question names: {names:?}");
    }

    /// Compute the presentation order: identity, or a uniform permutation
    /// from the supplied randomizer when `randomize` is set.
    pub fn presentation_order(
        count: usize,
        randomize: bool,
        randomizer: &mut dyn Randomizer,
    ) -> Vec<usize> {
        let mut order: Vec<usize> = (0..count).collect();
        if randomize {
            randomizer.shuffle(&mut order);
        }
        order
    }
}

/// Number of decimal digits in `count` (1 for zero)
fn digit_width(count: usize) -> usize {
    let mut width = 1;
    let mut rest = count / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}
