//! Scale mapping
//!
//! This module converts a selected option position into the response value
//! reported to the host. Values are `1..=k` by default or `0..k` when the
//! trial is configured zero-indexed, optionally reversed per question.

use serde::{Deserialize, Serialize};

use crate::types::Question;

/// Position-to-value table for one question's labels.
///
/// The table is a bijection from label position to response value,
/// computed once before the question is first displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleMap {
    values: Vec<u32>,
}

impl ScaleMap {
    /// Build the table for a question with `label_count` options.
    ///
    /// `zero_indexed` selects `0..k` instead of `1..=k`; `reverse` flips
    /// the sequence. Zero labels yield an empty table.
    pub fn for_question(label_count: usize, zero_indexed: bool, reverse: bool) -> Self {
        let offset = if zero_indexed { 0 } else { 1 };
        let mut values: Vec<u32> = (0..label_count).map(|pos| (pos + offset) as u32).collect();
        if reverse {
            values.reverse();
        }
        Self { values }
    }

    /// Response value for a label position, if the position exists
    pub fn value_at(&self, pos: usize) -> Option<u32> {
        self.values.get(pos).copied()
    }

    /// The full value sequence, in label order
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Computes the scale tables for a whole trial up front
pub struct ScaleMapper;

impl ScaleMapper {
    /// One table per question, indexed by original question position
    pub fn map_all(questions: &[Question], zero_indexed: bool) -> Vec<ScaleMap> {
        questions
            .iter()
            .map(|q| ScaleMap::for_question(q.labels.len(), zero_indexed, q.reverse))
            .collect()
    }
}
