//! Interaction recording
//!
//! This module captures selection events and page durations. Events are
//! buffered per page with timestamps relative to page activation, then
//! flushed into the append-only view history when the page is left.

use crate::types::{InteractionEvent, PageVisit};

/// Per-trial recorder of in-page events and page visit durations
pub struct InteractionRecorder {
    history: Vec<PageVisit>,
    buffer: Vec<InteractionEvent>,
    page_started_ms: u64,
}

impl InteractionRecorder {
    /// Start recording; the first page's reference time is the trial start
    pub fn new(trial_start_ms: u64) -> Self {
        Self {
            history: Vec::new(),
            buffer: Vec::new(),
            page_started_ms: trial_start_ms,
        }
    }

    /// Buffer a selection on the active page.
    ///
    /// The event timestamp is relative to when the page became active,
    /// not to trial start.
    pub fn record_selection(&mut self, name: &str, option_pos: usize, now_ms: u64) {
        self.buffer.push(InteractionEvent {
            target: format!("{name}_{option_pos}"),
            rt: now_ms.saturating_sub(self.page_started_ms),
        });
    }

    /// Close out the page being left: append a history entry with its
    /// duration and buffered events, and restart the reference time.
    pub fn flush_page(&mut self, page_index: usize, now_ms: u64) {
        self.history.push(PageVisit {
            page_index,
            viewing_time: now_ms.saturating_sub(self.page_started_ms),
            events: std::mem::take(&mut self.buffer),
        });
        self.page_started_ms = now_ms;
    }

    /// History so far, in transition order
    pub fn history(&self) -> &[PageVisit] {
        &self.history
    }

    /// Events buffered on the active page, in arrival order
    pub fn buffered(&self) -> &[InteractionEvent] {
        &self.buffer
    }

    /// Hand off the accumulated history at completion
    pub fn take_history(&mut self) -> Vec<PageVisit> {
        std::mem::take(&mut self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_rt_is_relative_to_page_activation() {
        let mut recorder = InteractionRecorder::new(1000);
        recorder.record_selection("q1", 2, 1800);

        assert_eq!(recorder.buffered().len(), 1);
        assert_eq!(recorder.buffered()[0].target, "q1_2");
        assert_eq!(recorder.buffered()[0].rt, 800);
    }

    #[test]
    fn test_flush_appends_entry_and_resets_reference() {
        let mut recorder = InteractionRecorder::new(0);
        recorder.record_selection("q1", 0, 400);
        recorder.flush_page(0, 1000);

        // Next page's events are timed from the transition instant.
        recorder.record_selection("q2", 1, 1300);
        recorder.flush_page(1, 2000);

        let history = recorder.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].page_index, 0);
        assert_eq!(history[0].viewing_time, 1000);
        assert_eq!(history[0].events[0].rt, 400);
        assert_eq!(history[1].page_index, 1);
        assert_eq!(history[1].viewing_time, 1000);
        assert_eq!(history[1].events[0].target, "q2_1");
        assert_eq!(history[1].events[0].rt, 300);
    }

    #[test]
    fn test_flush_drains_buffer() {
        let mut recorder = InteractionRecorder::new(0);
        recorder.record_selection("q1", 0, 100);
        recorder.record_selection("q1", 1, 200);
        recorder.flush_page(0, 500);

        assert!(recorder.buffered().is_empty());
        assert_eq!(recorder.history()[0].events.len(), 2);
    }

    #[test]
    fn test_history_keeps_revisits_in_transition_order() {
        let mut recorder = InteractionRecorder::new(0);
        recorder.flush_page(0, 100);
        recorder.flush_page(1, 200);
        recorder.flush_page(0, 300);

        let pages: Vec<usize> = recorder.history().iter().map(|v| v.page_index).collect();
        assert_eq!(pages, vec![0, 1, 0]);
    }

    #[test]
    fn test_timestamps_saturate_at_zero() {
        let mut recorder = InteractionRecorder::new(500);
        recorder.record_selection("q1", 0, 400);
        recorder.flush_page(0, 300);

        assert_eq!(recorder.history()[0].events[0].rt, 0);
        assert_eq!(recorder.history()[0].viewing_time, 0);
    }

    #[test]
    fn test_events_are_monotonic_within_a_page() {
        let mut recorder = InteractionRecorder::new(0);
        recorder.record_selection("q1", 0, 100);
        recorder.record_selection("q1", 2, 250);
        recorder.record_selection("q1", 1, 600);
        recorder.flush_page(0, 700);

        let rts: Vec<u64> = recorder.history()[0].events.iter().map(|e| e.rt).collect();
        assert_eq!(rts, vec![100, 250, 600]);
        assert!(rts.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_take_history_hands_off_everything() {
        let mut recorder = InteractionRecorder::new(0);
        recorder.flush_page(0, 100);

        let history = recorder.take_history();
        assert_eq!(history.len(), 1);
        assert!(recorder.history().is_empty());
    }
}
