//! Page navigation state machine
//!
//! This module owns which page of the trial is active. Pages advance only
//! when the current page has a selection, retreat only when backward
//! navigation is permitted, and the terminal state accepts nothing further.

use tracing::trace;

/// Position of the trial within the page sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Page `i` is active, for `i` in `0..page_count`
    Page(usize),
    /// The sequence has ended; no page is active
    Done,
}

/// Why a requested transition was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The active page has no selection yet
    NoSelection,
    /// Backward navigation is disabled for this trial
    BackwardDisallowed,
    /// Already on the first page
    AtFirstPage,
    /// The trial has already completed
    AlreadyDone,
}

/// Result of a requested transition.
///
/// Refused transitions report a reason instead of changing state; the
/// navigator never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved between two pages
    Moved { from: usize, to: usize },
    /// Advanced off the last page into the terminal state
    Finished { from: usize },
    /// Nothing changed
    Blocked(BlockReason),
}

/// State machine over `Page(0)..Page(n-1)` plus the terminal `Done`
pub struct PageNavigator {
    page_count: usize,
    allow_backward: bool,
    state: PageState,
}

impl PageNavigator {
    /// Start a trial on the first page
    pub fn new(page_count: usize, allow_backward: bool) -> Self {
        Self {
            page_count,
            allow_backward,
            state: PageState::Page(0),
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Index of the active page, or `None` once done
    pub fn current_page(&self) -> Option<usize> {
        match self.state {
            PageState::Page(i) => Some(i),
            PageState::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == PageState::Done
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Move forward one page, or finish when leaving the last page.
    ///
    /// Gated on the active page holding at least one selection; refused
    /// requests leave the state untouched.
    pub fn advance(&mut self, has_selection: bool) -> Transition {
        let current = match self.state {
            PageState::Page(i) => i,
            PageState::Done => return Transition::Blocked(BlockReason::AlreadyDone),
        };

        if !has_selection {
            return Transition::Blocked(BlockReason::NoSelection);
        }

        if current + 1 >= self.page_count {
            self.state = PageState::Done;
            trace!("page {current} -> done");
            Transition::Finished { from: current }
        } else {
            self.state = PageState::Page(current + 1);
            trace!("page {current} -> page {}", current + 1);
            Transition::Moved {
                from: current,
                to: current + 1,
            }
        }
    }

    /// Move back one page when the trial permits it
    pub fn retreat(&mut self) -> Transition {
        let current = match self.state {
            PageState::Page(i) => i,
            PageState::Done => return Transition::Blocked(BlockReason::AlreadyDone),
        };

        if !self.allow_backward {
            return Transition::Blocked(BlockReason::BackwardDisallowed);
        }
        if current == 0 {
            return Transition::Blocked(BlockReason::AtFirstPage);
        }

        self.state = PageState::Page(current - 1);
        trace!("page {current} -> page {}", current - 1);
        Transition::Moved {
            from: current,
            to: current - 1,
        }
    }
}
