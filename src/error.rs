//! Error types for Synheart Survey

use thiserror::Error;

/// Errors that can occur while building a survey trial
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Survey has no questions")]
    EmptyQuestions,

    #[error("Question '{0}' has no response labels")]
    NoLabels(String),

    #[error("Duplicate question name: {0}")]
    DuplicateName(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
