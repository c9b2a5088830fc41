// src/wizard/state.rs
use std::fmt;

use crate::types::{AnalysisResult, JobDetails, JobId, ResumeFile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    #[default]
    EnteringJob,
    UploadingResume,
    ViewingResults,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::EnteringJob, Step::UploadingResume, Step::ViewingResults];

    pub fn number(&self) -> u8 {
        match self {
            Self::EnteringJob => 1,
            Self::UploadingResume => 2,
            Self::ViewingResults => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EnteringJob => "Enter Job Details",
            Self::UploadingResume => "Upload Resume",
            Self::ViewingResults => "View Results",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Snapshot of one wizard session.
///
/// `job_id` is set whenever `step` is past `EnteringJob`, and
/// `analysis_result` whenever `step` is `ViewingResults`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub step: Step,
    pub job_id: Option<JobId>,
    pub job_details: JobDetails,
    pub selected_resume: Option<ResumeFile>,
    pub analysis_result: Option<AnalysisResult>,
    /// Job submission in flight.
    pub is_submitting: bool,
    /// Resume analysis in flight.
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// How to fix a rejected input, shown under the banner.
    pub error_hint: Option<String>,
}

impl WizardState {
    pub fn is_busy(&self) -> bool {
        self.is_submitting || self.is_loading
    }

    /// Checks the step/data pairing documented on the type.
    pub fn is_consistent(&self) -> bool {
        match self.step {
            Step::EnteringJob => true,
            Step::UploadingResume => self.job_id.is_some(),
            Step::ViewingResults => self.job_id.is_some() && self.analysis_result.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = WizardState::default();
        assert_eq!(state.step, Step::EnteringJob);
        assert_eq!(state.job_id, None);
        assert_eq!(state.job_details, JobDetails::new("", ""));
        assert!(!state.is_busy());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_step_order_and_labels() {
        assert!(Step::EnteringJob < Step::UploadingResume);
        assert!(Step::UploadingResume < Step::ViewingResults);
        assert_eq!(Step::ViewingResults.number(), 3);
        assert_eq!(Step::UploadingResume.to_string(), "2. Upload Resume");
    }

    #[test]
    fn test_consistency_requires_job_id_on_step_two() {
        let state = WizardState {
            step: Step::UploadingResume,
            ..Default::default()
        };
        assert!(!state.is_consistent());
    }
}
