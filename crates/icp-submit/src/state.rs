use std::fmt;
use std::time::Duration;

use icp_types::{SubmissionMode, ValidationOutcome};
use serde::{Deserialize, Serialize};

use crate::submission::SubmissionRecord;

/// Where a submission is in the validation pipeline.
///
/// `Initial → ModeDispatch → {ValidatingUpload | ValidatingCreate} →
/// Aggregated → {Accepted | Rejected}`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionState {
    Initial,
    ModeDispatch,
    ValidatingUpload,
    ValidatingCreate,
    Aggregated,
    Accepted,
    Rejected,
}

impl SubmissionState {
    /// Returns `true` for `Accepted` and `Rejected`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initial => "initial",
            Self::ModeDispatch => "mode-dispatch",
            Self::ValidatingUpload => "validating-upload",
            Self::ValidatingCreate => "validating-create",
            Self::Aggregated => "aggregated",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// The terminal result of validating one submission.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionOutcome {
    Accepted(SubmissionRecord),
    Rejected(ValidationOutcome),
}

/// Everything the controller reports about one evaluation.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub mode: SubmissionMode,
    pub outcome: SubmissionOutcome,
    /// States visited, in order.
    pub trail: Vec<SubmissionState>,
    /// Total wall-clock time for the evaluation.
    pub elapsed: Duration,
}

impl Evaluation {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, SubmissionOutcome::Accepted(_))
    }

    pub fn record(&self) -> Option<&SubmissionRecord> {
        match &self.outcome {
            SubmissionOutcome::Accepted(record) => Some(record),
            SubmissionOutcome::Rejected(_) => None,
        }
    }

    /// The field errors; empty when accepted.
    pub fn errors(&self) -> ValidationOutcome {
        match &self.outcome {
            SubmissionOutcome::Accepted(_) => ValidationOutcome::new(),
            SubmissionOutcome::Rejected(errors) => errors.clone(),
        }
    }

    /// The state the evaluation ended in.
    pub fn final_state(&self) -> Option<SubmissionState> {
        self.trail.last().copied()
    }
}
