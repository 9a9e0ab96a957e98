//! Result assembly
//!
//! This module builds the single record handed to the host when the trial
//! completes: final responses mapped through the scale tables, the full
//! view history, and the total elapsed time.

use crate::scale::ScaleMap;
use crate::types::{PageVisit, Question, QuestionResponse, SurveyResult};

/// Builds the final record once the last page has been left
pub struct ResultAssembler;

impl ResultAssembler {
    /// Assemble the completion record.
    ///
    /// `selections` and `scales` are indexed by original question position;
    /// `order` maps presentation position to original position. Responses
    /// are emitted in presentation order, one per question that holds a
    /// selection; unanswered questions are absent.
    pub fn assemble(
        questions: &[Question],
        order: &[usize],
        selections: &[Option<usize>],
        scales: &[ScaleMap],
        view_history: Vec<PageVisit>,
        rt: u64,
    ) -> SurveyResult {
        let mut responses = Vec::with_capacity(order.len());
        for (item_pos, &original) in order.iter().enumerate() {
            let Some(resp_pos) = selections[original] else {
                continue;
            };
            let Some(resp) = scales[original].value_at(resp_pos) else {
                continue;
            };
            responses.push(QuestionResponse {
                name: questions[original].name.clone(),
                item_pos,
                resp_pos,
                resp,
            });
        }

        SurveyResult {
            responses,
            view_history,
            rt,
        }
    }
}
