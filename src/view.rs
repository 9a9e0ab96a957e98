//! Render adapter surface
//!
//! The engine produces no markup. This module defines the data-only
//! projection of the active page that an external renderer draws from,
//! and the terminal marker that tells the host the trial is over.

use serde::{Deserialize, Serialize};

use crate::types::{Question, SurveyConfig};

/// What the renderer should show right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewState {
    /// A page is active
    Page(PageSnapshot),
    /// The sequence has ended; the view should be cleared
    Finished,
}

/// Everything needed to draw the active page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Presentation position of the page, 0-based
    pub page_index: usize,
    /// Total number of pages
    pub page_count: usize,
    /// Name of the question on this page (key for selection commands)
    pub name: String,
    /// Question text
    pub prompt: String,
    /// Scale labels in display order
    pub labels: Vec<String>,
    /// Currently selected label position, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
    /// Progress line, e.g. "Question 2 of 5"
    pub progress: String,
    /// Whether the back control is operable on this page
    pub back_enabled: bool,
    /// Caption for the back control
    pub previous_label: String,
    /// Caption for the forward control
    pub next_label: String,
}

impl PageSnapshot {
    /// Project the active page into its renderable form
    pub fn compose(
        question: &Question,
        page_index: usize,
        page_count: usize,
        selected: Option<usize>,
        config: &SurveyConfig,
    ) -> Self {
        Self {
            page_index,
            page_count,
            name: question.name.clone(),
            prompt: question.prompt.clone(),
            labels: question.labels.clone(),
            selected,
            progress: format!("{} {} of {}", config.page_label, page_index + 1, page_count),
            back_enabled: config.allow_backward && page_index > 0,
            previous_label: config.button_label_previous.clone(),
            next_label: config.button_label_next.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> SurveyConfig {
        SurveyConfig::new(vec![Question::new(
            "How rested do you feel?",
            vec!["Not at all".to_string(), "Fully".to_string()],
        )])
    }

    #[test]
    fn test_progress_line() {
        let config = make_config();
        let snapshot = PageSnapshot::compose(&config.questions[0], 1, 5, None, &config);
        assert_eq!(snapshot.progress, "Question 2 of 5");
    }

    #[test]
    fn test_progress_uses_configured_page_label() {
        let mut config = make_config();
        config.page_label = "Item".to_string();
        let snapshot = PageSnapshot::compose(&config.questions[0], 0, 3, None, &config);
        assert_eq!(snapshot.progress, "Item 1 of 3");
    }

    #[test]
    fn test_back_disabled_on_first_page() {
        let config = make_config();
        let first = PageSnapshot::compose(&config.questions[0], 0, 3, None, &config);
        let later = PageSnapshot::compose(&config.questions[0], 2, 3, None, &config);
        assert!(!first.back_enabled);
        assert!(later.back_enabled);
    }

    #[test]
    fn test_back_disabled_when_backward_disallowed() {
        let mut config = make_config();
        config.allow_backward = false;
        let snapshot = PageSnapshot::compose(&config.questions[0], 2, 3, None, &config);
        assert!(!snapshot.back_enabled);
    }

    #[test]
    fn test_view_state_serialization_is_tagged() {
        let config = make_config();
        let snapshot = PageSnapshot::compose(&config.questions[0], 0, 1, Some(1), &config);

        let page_json = serde_json::to_value(&ViewState::Page(snapshot)).unwrap();
        assert_eq!(page_json["status"], "page");
        assert_eq!(page_json["selected"], 1);

        let finished_json = serde_json::to_value(&ViewState::Finished).unwrap();
        assert_eq!(finished_json["status"], "finished");
    }
}
