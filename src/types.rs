//! Core types for the Synheart Survey engine
//!
//! This module defines the data structures that flow through a survey trial:
//! the input configuration, the per-page interaction records, and the final
//! result handed back to the host runner.

use serde::{Deserialize, Serialize};

/// A single likert question shown on its own page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Question text shown at the top of the page
    pub prompt: String,
    /// Ordered scale labels, one per response option
    pub labels: Vec<String>,
    /// Declarative required flag from the authoring format.
    ///
    /// Carried on the wire for compatibility, but advancement is gated on
    /// "at least one selection" for every question regardless of this flag.
    #[serde(default)]
    pub required: bool,
    /// Stable identifier used to key the response; auto-generated when empty
    #[serde(default)]
    pub name: String,
    /// Reverse the response-value mapping for this question
    #[serde(default)]
    pub reverse: bool,
}

impl Question {
    /// Create a question with default flags and an auto-generated name
    pub fn new(prompt: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            labels,
            required: false,
            name: String::new(),
            reverse: false,
        }
    }
}

/// Trial configuration supplied by the host runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Questions to present, one per page, in authored order
    pub questions: Vec<Question>,
    /// Shuffle presentation order at trial start
    #[serde(default)]
    pub randomize_question_order: bool,
    /// Permit navigating back to earlier pages
    #[serde(default = "default_allow_backward")]
    pub allow_backward: bool,
    /// Map option positions to 0..k-1 instead of 1..k
    #[serde(default)]
    pub zero_indexed: bool,
    /// Label used in the progress line ("<page_label> 2 of 5")
    #[serde(default = "default_page_label")]
    pub page_label: String,
    /// Caption for the back control
    #[serde(default = "default_button_label_previous")]
    pub button_label_previous: String,
    /// Caption for the forward control
    #[serde(default = "default_button_label_next")]
    pub button_label_next: String,
    /// Advance automatically shortly after a selection is made
    #[serde(default)]
    pub autoadvance: bool,
}

impl SurveyConfig {
    /// Create a configuration with default options for the given questions
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            randomize_question_order: false,
            allow_backward: default_allow_backward(),
            zero_indexed: false,
            page_label: default_page_label(),
            button_label_previous: default_button_label_previous(),
            button_label_next: default_button_label_next(),
            autoadvance: false,
        }
    }
}

fn default_allow_backward() -> bool {
    true
}

fn default_page_label() -> String {
    "Question".to_string()
}

fn default_button_label_previous() -> String {
    "Previous".to_string()
}

fn default_button_label_next() -> String {
    "Next".to_string()
}

/// A single in-page interaction, timestamped relative to page activation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Target identifier: question name plus option position ("mood_2")
    pub target: String,
    /// Milliseconds since the page became active
    pub rt: u64,
}

/// One entry in the view history, appended when a page is left
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageVisit {
    /// Presentation index of the page that was left
    pub page_index: usize,
    /// Milliseconds the page was active before the transition
    pub viewing_time: u64,
    /// Interactions that occurred while the page was active, in order
    pub events: Vec<InteractionEvent>,
}

/// Final response for one question, reported at completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    /// Question name (authored or auto-generated)
    pub name: String,
    /// Position of the question in presentation order
    pub item_pos: usize,
    /// Selected label position (0-based index into the labels)
    pub resp_pos: usize,
    /// Mapped response value after indexing and reversal
    pub resp: u32,
}

/// The single record handed to the host runner when the trial completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResult {
    /// One response per answered question, in presentation order
    pub responses: Vec<QuestionResponse>,
    /// Append-only log of page visits, in transition order
    pub view_history: Vec<PageVisit>,
    /// Total elapsed milliseconds from trial start to completion
    pub rt: u64,
}
