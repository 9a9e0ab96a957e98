//! Trial controller
//!
//! One `SurveyController` owns everything a running trial needs: the
//! validated configuration, the page navigator, the interaction recorder,
//! per-question selection state, and the auto-advance deadline. Host
//! events arrive as commands; every command applies synchronously and
//! returns a typed outcome, with refused commands reported as no-ops.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembler::ResultAssembler;
use crate::clock::{Clock, SystemClock};
use crate::error::SurveyError;
use crate::navigator::{BlockReason, PageNavigator, Transition};
use crate::normalizer::{QuestionNormalizer, Randomizer, ThreadRngRandomizer};
use crate::recorder::InteractionRecorder;
use crate::scale::{ScaleMap, ScaleMapper};
use crate::types::{SurveyConfig, SurveyResult};
use crate::view::{PageSnapshot, ViewState};

/// Delay between a selection and a scheduled auto-advance, in milliseconds.
///
/// Long enough for the renderer to show the selection before the page flips.
pub const AUTO_ADVANCE_DELAY_MS: u64 = 500;

/// Why a command was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The trial has already completed
    TrialComplete,
    /// The active page has no selection yet
    NoSelection,
    /// Backward navigation is disabled for this trial
    BackwardDisallowed,
    /// Already on the first page
    AtFirstPage,
    /// The named question is not on the active page
    InactiveQuestion,
    /// The option position is outside the question's labels
    OptionOutOfRange,
}

/// Outcome of a controller command.
///
/// `Finished` carries the assembled result and is produced exactly once
/// per trial; everything after it is `Ignored(TrialComplete)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The selection was recorded on the active page
    Recorded,
    /// Moved forward; `page` is the new presentation index
    Advanced { page: usize },
    /// Moved backward; `page` is the new presentation index
    Retreated { page: usize },
    /// The trial completed and produced its result
    Finished(SurveyResult),
    /// The command was a no-op
    Ignored(IgnoreReason),
}

/// Controller for one questionnaire trial
pub struct SurveyController {
    config: SurveyConfig,
    /// Presentation position -> original question position
    order: Vec<usize>,
    /// Scale tables, by original question position
    scales: Vec<ScaleMap>,
    /// Selected option per question, by original question position
    selections: Vec<Option<usize>>,
    navigator: PageNavigator,
    recorder: InteractionRecorder,
    clock: Box<dyn Clock>,
    trial_start_ms: u64,
    pending_advance_at: Option<u64>,
}

impl SurveyController {
    /// Start a trial with the real clock and thread-local randomness
    pub fn new(config: SurveyConfig) -> Result<Self, SurveyError> {
        let mut randomizer = ThreadRngRandomizer;
        Self::with_services(config, Box::new(SystemClock::new()), &mut randomizer)
    }

    /// Start a trial with injected clock and randomizer.
    ///
    /// Validates the configuration, normalizes question names, and fixes
    /// the presentation order and scale tables for the trial's lifetime.
    pub fn with_services(
        mut config: SurveyConfig,
        clock: Box<dyn Clock>,
        randomizer: &mut dyn Randomizer,
    ) -> Result<Self, SurveyError> {
        if config.questions.is_empty() {
            return Err(SurveyError::EmptyQuestions);
        }
        QuestionNormalizer::normalize_names(&mut config.questions);

        let mut seen = HashSet::new();
        for question in &config.questions {
            if question.labels.is_empty() {
                return Err(SurveyError::NoLabels(question.name.clone()));
            }
            if !seen.insert(question.name.as_str()) {
                return Err(SurveyError::DuplicateName(question.name.clone()));
            }
        }

        let question_count = config.questions.len();
        let order = QuestionNormalizer::presentation_order(
            question_count,
            config.randomize_question_order,
            randomizer,
        );
        let scales = ScaleMapper::map_all(&config.questions, config.zero_indexed);
        let trial_start_ms = clock.now_ms();
        debug!("survey trial started: {question_count} questions");

        Ok(Self {
            navigator: PageNavigator::new(question_count, config.allow_backward),
            recorder: InteractionRecorder::new(trial_start_ms),
            selections: vec![None; question_count],
            pending_advance_at: None,
            order,
            scales,
            config,
            clock,
            trial_start_ms,
        })
    }

    /// Record a selection on the active page.
    ///
    /// `name` must match the active page's question; `option_pos` must be
    /// a valid label position. Under auto-advance, a recorded selection
    /// (re)schedules the advance deadline.
    pub fn on_select(&mut self, name: &str, option_pos: usize) -> Outcome {
        let Some(page) = self.navigator.current_page() else {
            return Outcome::Ignored(IgnoreReason::TrialComplete);
        };
        let original = self.order[page];
        let question = &self.config.questions[original];
        if question.name != name {
            return Outcome::Ignored(IgnoreReason::InactiveQuestion);
        }
        if option_pos >= question.labels.len() {
            return Outcome::Ignored(IgnoreReason::OptionOutOfRange);
        }

        self.selections[original] = Some(option_pos);
        let now = self.clock.now_ms();
        self.recorder.record_selection(name, option_pos, now);
        if self.config.autoadvance {
            self.pending_advance_at = Some(now + AUTO_ADVANCE_DELAY_MS);
        }
        Outcome::Recorded
    }

    /// Request a forward transition
    pub fn on_advance_requested(&mut self) -> Outcome {
        self.apply_advance()
    }

    /// Request a backward transition
    pub fn on_retreat_requested(&mut self) -> Outcome {
        match self.navigator.retreat() {
            Transition::Blocked(reason) => Outcome::Ignored(block_to_ignore(reason)),
            Transition::Moved { from, to } => {
                self.pending_advance_at = None;
                self.recorder.flush_page(from, self.clock.now_ms());
                Outcome::Retreated { page: to }
            }
            Transition::Finished { .. } => Outcome::Ignored(IgnoreReason::TrialComplete),
        }
    }

    /// Fire a due auto-advance, if one is pending.
    ///
    /// Returns `None` when no deadline is pending or it has not elapsed.
    pub fn tick(&mut self) -> Option<Outcome> {
        let due = self.pending_advance_at?;
        if self.clock.now_ms() < due {
            return None;
        }
        self.pending_advance_at = None;
        Some(self.apply_advance())
    }

    /// Deadline of the scheduled auto-advance, for hosts planning wakeups
    pub fn pending_advance_at(&self) -> Option<u64> {
        self.pending_advance_at
    }

    /// Current renderable state of the trial
    pub fn view_state(&self) -> ViewState {
        match self.navigator.current_page() {
            None => ViewState::Finished,
            Some(page) => {
                let original = self.order[page];
                ViewState::Page(PageSnapshot::compose(
                    &self.config.questions[original],
                    page,
                    self.order.len(),
                    self.selections[original],
                    &self.config,
                ))
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.navigator.is_done()
    }

    /// Presentation index of the active page, or `None` once done
    pub fn current_page(&self) -> Option<usize> {
        self.navigator.current_page()
    }

    pub fn question_count(&self) -> usize {
        self.order.len()
    }

    /// Presentation order as a map from presentation to original position
    pub fn presentation_order(&self) -> &[usize] {
        &self.order
    }

    fn apply_advance(&mut self) -> Outcome {
        let Some(page) = self.navigator.current_page() else {
            return Outcome::Ignored(IgnoreReason::TrialComplete);
        };
        let has_selection = self.selections[self.order[page]].is_some();

        match self.navigator.advance(has_selection) {
            Transition::Blocked(reason) => Outcome::Ignored(block_to_ignore(reason)),
            Transition::Moved { from, to } => {
                self.pending_advance_at = None;
                self.recorder.flush_page(from, self.clock.now_ms());
                Outcome::Advanced { page: to }
            }
            Transition::Finished { from } => {
                self.pending_advance_at = None;
                let now = self.clock.now_ms();
                self.recorder.flush_page(from, now);
                let result = ResultAssembler::assemble(
                    &self.config.questions,
                    &self.order,
                    &self.selections,
                    &self.scales,
                    self.recorder.take_history(),
                    now.saturating_sub(self.trial_start_ms),
                );
                debug!(
                    "survey trial complete: {} responses in {} ms",
                    result.responses.len(),
                    result.rt
                );
                Outcome::Finished(result)
            }
        }
    }
}

fn block_to_ignore(reason: BlockReason) -> IgnoreReason {
    match reason {
        BlockReason::NoSelection => IgnoreReason::NoSelection,
        BlockReason::BackwardDisallowed => IgnoreReason::BackwardDisallowed,
        BlockReason::AtFirstPage => IgnoreReason::AtFirstPage,
        BlockReason::AlreadyDone => IgnoreReason::TrialComplete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::{InteractionEvent, PageVisit, Question, QuestionResponse};
    use pretty_assertions::assert_eq;

    struct ReversingRandomizer;

    impl Randomizer for ReversingRandomizer {
        fn shuffle(&mut self, indices: &mut [usize]) {
            indices.reverse();
        }
    }

    fn make_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                Question::new(
                    format!("Prompt {i}"),
                    vec![
                        "Strongly disagree".to_string(),
                        "Disagree".to_string(),
                        "Agree".to_string(),
                        "Strongly agree".to_string(),
                    ],
                )
            })
            .collect()
    }

    fn make_controller(config: SurveyConfig) -> (SurveyController, ManualClock) {
        let clock = ManualClock::new();
        let mut randomizer = ThreadRngRandomizer;
        let controller =
            SurveyController::with_services(config, Box::new(clock.clone()), &mut randomizer)
                .unwrap();
        (controller, clock)
    }

    fn active_name(controller: &SurveyController) -> String {
        match controller.view_state() {
            ViewState::Page(snapshot) => snapshot.name,
            ViewState::Finished => panic!("trial already finished"),
        }
    }

    #[test]
    fn test_rejects_empty_question_list() {
        let config = SurveyConfig::new(vec![]);
        let err = SurveyController::new(config).err().unwrap();
        assert!(matches!(err, SurveyError::EmptyQuestions));
    }

    #[test]
    fn test_rejects_question_without_labels() {
        let mut questions = make_questions(2);
        questions[1].labels.clear();
        let err = SurveyController::new(SurveyConfig::new(questions))
            .err()
            .unwrap();
        assert!(matches!(err, SurveyError::NoLabels(name) if name == "q2"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut questions = make_questions(2);
        questions[0].name = "mood".to_string();
        questions[1].name = "mood".to_string();
        let err = SurveyController::new(SurveyConfig::new(questions))
            .err()
            .unwrap();
        assert!(matches!(err, SurveyError::DuplicateName(name) if name == "mood"));
    }

    #[test]
    fn test_rejects_collision_with_generated_name() {
        let mut questions = make_questions(2);
        questions[0].name = "q2".to_string();
        // The unnamed second question is auto-named "q2" by position.
        let err = SurveyController::new(SurveyConfig::new(questions))
            .err()
            .unwrap();
        assert!(matches!(err, SurveyError::DuplicateName(name) if name == "q2"));
    }

    #[test]
    fn test_advance_blocked_without_selection() {
        let (mut controller, _clock) = make_controller(SurveyConfig::new(make_questions(3)));

        let outcome = controller.on_advance_requested();
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::NoSelection));
        assert_eq!(controller.current_page(), Some(0));
    }

    #[test]
    fn test_advance_gate_is_unconditional() {
        // The gate applies even though the question is not declared required.
        let mut questions = make_questions(1);
        questions[0].required = false;
        let (mut controller, _clock) = make_controller(SurveyConfig::new(questions));

        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Ignored(IgnoreReason::NoSelection)
        );
    }

    #[test]
    fn test_select_then_advance() {
        let (mut controller, _clock) = make_controller(SurveyConfig::new(make_questions(2)));

        assert_eq!(controller.on_select("q1", 1), Outcome::Recorded);
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Advanced { page: 1 }
        );
    }

    #[test]
    fn test_select_inactive_question_ignored() {
        let (mut controller, _clock) = make_controller(SurveyConfig::new(make_questions(2)));

        assert_eq!(
            controller.on_select("q2", 0),
            Outcome::Ignored(IgnoreReason::InactiveQuestion)
        );
        assert_eq!(
            controller.on_select("unknown", 0),
            Outcome::Ignored(IgnoreReason::InactiveQuestion)
        );
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Ignored(IgnoreReason::NoSelection)
        );
    }

    #[test]
    fn test_select_out_of_range_option_ignored() {
        let (mut controller, _clock) = make_controller(SurveyConfig::new(make_questions(1)));

        assert_eq!(
            controller.on_select("q1", 4),
            Outcome::Ignored(IgnoreReason::OptionOutOfRange)
        );
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Ignored(IgnoreReason::NoSelection)
        );
    }

    #[test]
    fn test_full_forward_trial() {
        let mut config = SurveyConfig::new(make_questions(3));
        config.allow_backward = false;
        let (mut controller, clock) = make_controller(config);

        clock.set(800);
        assert_eq!(controller.on_select("q1", 2), Outcome::Recorded);
        clock.set(1200);
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Advanced { page: 1 }
        );

        clock.set(1500);
        assert_eq!(controller.on_select("q2", 0), Outcome::Recorded);
        clock.set(2000);
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Advanced { page: 2 }
        );

        clock.set(2600);
        assert_eq!(controller.on_select("q3", 3), Outcome::Recorded);
        clock.set(3000);
        let outcome = controller.on_advance_requested();

        let expected = SurveyResult {
            responses: vec![
                QuestionResponse {
                    name: "q1".to_string(),
                    item_pos: 0,
                    resp_pos: 2,
                    resp: 3,
                },
                QuestionResponse {
                    name: "q2".to_string(),
                    item_pos: 1,
                    resp_pos: 0,
                    resp: 1,
                },
                QuestionResponse {
                    name: "q3".to_string(),
                    item_pos: 2,
                    resp_pos: 3,
                    resp: 4,
                },
            ],
            view_history: vec![
                PageVisit {
                    page_index: 0,
                    viewing_time: 1200,
                    events: vec![InteractionEvent {
                        target: "q1_2".to_string(),
                        rt: 800,
                    }],
                },
                PageVisit {
                    page_index: 1,
                    viewing_time: 800,
                    events: vec![InteractionEvent {
                        target: "q2_0".to_string(),
                        rt: 300,
                    }],
                },
                PageVisit {
                    page_index: 2,
                    viewing_time: 1000,
                    events: vec![InteractionEvent {
                        target: "q3_3".to_string(),
                        rt: 600,
                    }],
                },
            ],
            rt: 3000,
        };
        assert_eq!(outcome, Outcome::Finished(expected));

        assert!(controller.is_done());
        assert_eq!(controller.view_state(), ViewState::Finished);
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Ignored(IgnoreReason::TrialComplete)
        );
    }

    #[test]
    fn test_durations_sum_to_total_rt() {
        let (mut controller, clock) = make_controller(SurveyConfig::new(make_questions(3)));

        let mut finished = None;
        for (select_at, advance_at) in [(350, 900), (1000, 1750), (2100, 2483)] {
            clock.set(select_at);
            let name = active_name(&controller);
            controller.on_select(&name, 0);
            clock.set(advance_at);
            finished = Some(controller.on_advance_requested());
        }

        let Some(Outcome::Finished(result)) = finished else {
            panic!("trial did not finish");
        };
        let total: u64 = result.view_history.iter().map(|v| v.viewing_time).sum();
        assert_eq!(total, result.rt);
        assert_eq!(result.rt, 2483);
    }

    #[test]
    fn test_backward_navigation_and_revisit() {
        let (mut controller, clock) = make_controller(SurveyConfig::new(make_questions(2)));

        clock.set(500);
        controller.on_select("q1", 1);
        clock.set(700);
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Advanced { page: 1 }
        );

        clock.set(900);
        assert_eq!(
            controller.on_retreat_requested(),
            Outcome::Retreated { page: 0 }
        );

        // The earlier selection survives the revisit.
        let ViewState::Page(snapshot) = controller.view_state() else {
            panic!("expected an active page");
        };
        assert_eq!(snapshot.selected, Some(1));

        clock.set(1000);
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Advanced { page: 1 }
        );

        clock.set(1400);
        controller.on_select("q2", 0);
        clock.set(1500);
        let Outcome::Finished(result) = controller.on_advance_requested() else {
            panic!("expected the trial to finish");
        };

        let pages: Vec<usize> = result.view_history.iter().map(|v| v.page_index).collect();
        assert_eq!(pages, vec![0, 1, 0, 1]);
        let durations: Vec<u64> = result
            .view_history
            .iter()
            .map(|v| v.viewing_time)
            .collect();
        assert_eq!(durations, vec![700, 200, 100, 500]);
        assert_eq!(result.rt, 1500);

        assert_eq!(result.responses.len(), 2);
        assert_eq!(result.responses[0].name, "q1");
        assert_eq!(result.responses[0].resp, 2);
        assert_eq!(result.responses[1].name, "q2");
        assert_eq!(result.responses[1].resp, 1);
    }

    #[test]
    fn test_retreat_ignored_on_first_page() {
        let (mut controller, clock) = make_controller(SurveyConfig::new(make_questions(1)));

        assert_eq!(
            controller.on_retreat_requested(),
            Outcome::Ignored(IgnoreReason::AtFirstPage)
        );

        clock.set(100);
        controller.on_select("q1", 0);
        clock.set(200);
        let Outcome::Finished(result) = controller.on_advance_requested() else {
            panic!("expected the trial to finish");
        };
        // The blocked retreat produced no history entry.
        assert_eq!(result.view_history.len(), 1);
    }

    #[test]
    fn test_retreat_ignored_when_backward_disallowed() {
        let mut config = SurveyConfig::new(make_questions(2));
        config.allow_backward = false;
        let (mut controller, _clock) = make_controller(config);

        controller.on_select("q1", 0);
        controller.on_advance_requested();
        assert_eq!(
            controller.on_retreat_requested(),
            Outcome::Ignored(IgnoreReason::BackwardDisallowed)
        );
        assert_eq!(controller.current_page(), Some(1));
    }

    #[test]
    fn test_commands_after_done_are_ignored() {
        let (mut controller, _clock) = make_controller(SurveyConfig::new(make_questions(1)));

        controller.on_select("q1", 0);
        assert!(matches!(
            controller.on_advance_requested(),
            Outcome::Finished(_)
        ));

        assert_eq!(
            controller.on_select("q1", 0),
            Outcome::Ignored(IgnoreReason::TrialComplete)
        );
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Ignored(IgnoreReason::TrialComplete)
        );
        assert_eq!(
            controller.on_retreat_requested(),
            Outcome::Ignored(IgnoreReason::TrialComplete)
        );
        assert_eq!(controller.tick(), None);
    }

    #[test]
    fn test_randomized_two_question_trial() {
        let mut config = SurveyConfig::new(make_questions(2));
        config.randomize_question_order = true;
        let clock = ManualClock::new();
        let mut randomizer = ReversingRandomizer;
        let mut controller =
            SurveyController::with_services(config, Box::new(clock.clone()), &mut randomizer)
                .unwrap();

        assert_eq!(controller.presentation_order(), &[1, 0]);
        assert_eq!(active_name(&controller), "q2");

        clock.set(300);
        assert_eq!(controller.on_select("q2", 3), Outcome::Recorded);
        clock.set(400);
        controller.on_advance_requested();

        assert_eq!(active_name(&controller), "q1");
        clock.set(600);
        assert_eq!(controller.on_select("q1", 0), Outcome::Recorded);
        clock.set(700);
        let Outcome::Finished(result) = controller.on_advance_requested() else {
            panic!("expected the trial to finish");
        };

        // Responses are in presentation order with matching item_pos.
        assert_eq!(result.responses[0].name, "q2");
        assert_eq!(result.responses[0].item_pos, 0);
        assert_eq!(result.responses[0].resp_pos, 3);
        assert_eq!(result.responses[1].name, "q1");
        assert_eq!(result.responses[1].item_pos, 1);
        assert_eq!(result.responses[1].resp_pos, 0);
    }

    #[test]
    fn test_autoadvance_fires_at_deadline() {
        let mut config = SurveyConfig::new(make_questions(2));
        config.autoadvance = true;
        let (mut controller, clock) = make_controller(config);

        clock.set(300);
        assert_eq!(controller.on_select("q1", 1), Outcome::Recorded);
        assert_eq!(controller.pending_advance_at(), Some(300 + AUTO_ADVANCE_DELAY_MS));

        assert_eq!(controller.tick(), None);
        clock.set(799);
        assert_eq!(controller.tick(), None);

        clock.set(800);
        assert_eq!(controller.tick(), Some(Outcome::Advanced { page: 1 }));
        assert_eq!(controller.tick(), None);
    }

    #[test]
    fn test_autoadvance_event_recorded_before_flush() {
        let mut config = SurveyConfig::new(make_questions(1));
        config.autoadvance = true;
        let (mut controller, clock) = make_controller(config);

        clock.set(250);
        controller.on_select("q1", 2);
        clock.set(750);
        let Some(Outcome::Finished(result)) = controller.tick() else {
            panic!("expected the auto-advance to finish the trial");
        };

        assert_eq!(result.view_history.len(), 1);
        assert_eq!(
            result.view_history[0].events,
            vec![InteractionEvent {
                target: "q1_2".to_string(),
                rt: 250,
            }]
        );
    }

    #[test]
    fn test_autoadvance_rearms_on_reselect() {
        let mut config = SurveyConfig::new(make_questions(2));
        config.autoadvance = true;
        let (mut controller, clock) = make_controller(config);

        clock.set(300);
        controller.on_select("q1", 0);
        clock.set(600);
        controller.on_select("q1", 2);

        clock.set(800);
        assert_eq!(controller.tick(), None);
        clock.set(1100);
        assert_eq!(controller.tick(), Some(Outcome::Advanced { page: 1 }));
    }

    #[test]
    fn test_autoadvance_cancelled_by_explicit_navigation() {
        let mut config = SurveyConfig::new(make_questions(3));
        config.autoadvance = true;
        let (mut controller, clock) = make_controller(config);

        clock.set(300);
        controller.on_select("q1", 0);
        clock.set(400);
        assert_eq!(
            controller.on_advance_requested(),
            Outcome::Advanced { page: 1 }
        );
        clock.set(1000);
        assert_eq!(controller.tick(), None);

        // A retreat cancels the deadline too.
        clock.set(1100);
        controller.on_select("q2", 1);
        clock.set(1200);
        assert_eq!(
            controller.on_retreat_requested(),
            Outcome::Retreated { page: 0 }
        );
        clock.set(2000);
        assert_eq!(controller.tick(), None);
    }

    #[test]
    fn test_autoadvance_never_fires_after_done() {
        let mut config = SurveyConfig::new(make_questions(1));
        config.autoadvance = true;
        let (mut controller, clock) = make_controller(config);

        clock.set(100);
        controller.on_select("q1", 0);
        clock.set(200);
        assert!(matches!(
            controller.on_advance_requested(),
            Outcome::Finished(_)
        ));

        clock.set(700);
        assert_eq!(controller.tick(), None);
    }

    #[test]
    fn test_view_state_tracks_selection_and_progress() {
        let (mut controller, _clock) = make_controller(SurveyConfig::new(make_questions(3)));

        let ViewState::Page(snapshot) = controller.view_state() else {
            panic!("expected an active page");
        };
        assert_eq!(snapshot.name, "q1");
        assert_eq!(snapshot.progress, "Question 1 of 3");
        assert_eq!(snapshot.selected, None);
        assert!(!snapshot.back_enabled);

        controller.on_select("q1", 1);
        let ViewState::Page(snapshot) = controller.view_state() else {
            panic!("expected an active page");
        };
        assert_eq!(snapshot.selected, Some(1));

        controller.on_advance_requested();
        let ViewState::Page(snapshot) = controller.view_state() else {
            panic!("expected an active page");
        };
        assert_eq!(snapshot.progress, "Question 2 of 3");
        assert!(snapshot.back_enabled);
    }

    #[test]
    fn test_outcome_serialization() {
        let advanced = serde_json::to_value(Outcome::Advanced { page: 1 }).unwrap();
        assert_eq!(advanced["outcome"], "advanced");
        assert_eq!(advanced["detail"]["page"], 1);

        let ignored = serde_json::to_value(Outcome::Ignored(IgnoreReason::NoSelection)).unwrap();
        assert_eq!(ignored["outcome"], "ignored");
        assert_eq!(ignored["detail"], "no_selection");

        let finished = serde_json::to_value(Outcome::Finished(SurveyResult {
            responses: vec![],
            view_history: vec![],
            rt: 42,
        }))
        .unwrap();
        assert_eq!(finished["outcome"], "finished");
        assert_eq!(finished["detail"]["rt"], 42);
    }
}
