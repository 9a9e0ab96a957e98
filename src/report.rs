//! Trial report envelope
//!
//! This module wraps a finished [`SurveyResult`] in the record shape host
//! runners persist: trial type, engine provenance, a unique trial id, and
//! wall-clock start/completion timestamps.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SurveyError;
use crate::types::SurveyResult;
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Trial type identifier stamped on every report
pub const TRIAL_TYPE: &str = "survey-likert-pages";

/// A finished trial with provenance metadata for persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialReport {
    /// Trial type identifier
    pub trial_type: String,
    /// Name of the producing engine
    pub producer: String,
    /// Engine version that produced this report
    pub engine_version: String,
    /// Unique trial identifier (UUID)
    pub trial_id: String,
    /// Wall-clock trial start (RFC3339)
    pub started_at_utc: String,
    /// Wall-clock trial completion (RFC3339)
    pub completed_at_utc: String,
    /// The assembled survey record
    pub survey: SurveyResult,
}

impl TrialReport {
    /// Wrap a finished result, deriving the start stamp from `rt`
    pub fn from_result(result: SurveyResult) -> Self {
        Self::at_completion(result, Utc::now())
    }

    /// Wrap a finished result with an explicit completion instant
    pub fn at_completion(result: SurveyResult, completed_at: DateTime<Utc>) -> Self {
        let started_at = completed_at - Duration::milliseconds(result.rt as i64);
        Self {
            trial_type: TRIAL_TYPE.to_string(),
            producer: PRODUCER_NAME.to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            trial_id: Uuid::new_v4().to_string(),
            started_at_utc: started_at.to_rfc3339(),
            completed_at_utc: completed_at.to_rfc3339(),
            survey: result,
        }
    }

    /// Serialize the report to pretty JSON
    pub fn to_json(&self) -> Result<String, SurveyError> {
        serde_json::to_string_pretty(self).map_err(SurveyError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(rt: u64) -> SurveyResult {
        SurveyResult {
            responses: vec![],
            view_history: vec![],
            rt,
        }
    }

    #[test]
    fn test_report_stamps_provenance() {
        let report = TrialReport::from_result(make_result(1000));

        assert_eq!(report.trial_type, TRIAL_TYPE);
        assert_eq!(report.producer, PRODUCER_NAME);
        assert_eq!(report.engine_version, ENGINE_VERSION);
        assert!(!report.trial_id.is_empty());
    }

    #[test]
    fn test_start_stamp_derived_from_rt() {
        let completed = Utc::now();
        let report = TrialReport::at_completion(make_result(2500), completed);

        let started: DateTime<Utc> = report.started_at_utc.parse().unwrap();
        assert_eq!((completed - started).num_milliseconds(), 2500);
    }

    #[test]
    fn test_trial_ids_are_unique() {
        let a = TrialReport::from_result(make_result(0));
        let b = TrialReport::from_result(make_result(0));
        assert_ne!(a.trial_id, b.trial_id);
    }

    #[test]
    fn test_report_serializes_with_survey_payload() {
        let report = TrialReport::from_result(make_result(77));
        let json = report.to_json().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("trial_id").is_some());
        assert_eq!(parsed["survey"]["rt"], 77);
    }
}
