//! Synheart Survey - On-device engine for paged likert questionnaires
//!
//! The engine runs one self-report trial at a time. Questions are named and
//! ordered up front and presented one per page; navigation is gated on the
//! active page holding a selection, and every interaction is timed. When the
//! last page is left, a single result record (responses, view history, total
//! elapsed time) is handed back to the host.
//!
//! ## Modules
//!
//! - **Controller**: per-trial facade turning host events into typed outcomes
//! - **Navigator**: the page state machine with its advance/retreat gates
//! - **Recorder**: per-page interaction events and the append-only view history

pub mod assembler;
pub mod clock;
pub mod controller;
pub mod error;
pub mod navigator;
pub mod normalizer;
pub mod recorder;
pub mod report;
pub mod scale;
pub mod types;
pub mod view;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use controller::{IgnoreReason, Outcome, SurveyController, AUTO_ADVANCE_DELAY_MS};
pub use error::SurveyError;
pub use types::{Question, SurveyConfig, SurveyResult};

// Trial record exports
pub use report::{TrialReport, TRIAL_TYPE};
pub use view::{PageSnapshot, ViewState};

/// Engine version embedded in all trial reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for trial reports
pub const PRODUCER_NAME: &str = "synheart-survey";
