//! AssessmentStatus enum for tracking the lifecycle of a questionnaire session.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a questionnaire session.
///
/// `InProgress` and `AwaitingSubmission` differ only in whether every
/// question has an answer; `Submitting` covers an in-flight resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    #[default]
    InProgress,
    AwaitingSubmission,
    Submitting,
    Completed,
    Failed,
}

impl AssessmentStatus {
    /// Returns true if answers may still be recorded.
    pub fn accepts_answers(&self) -> bool {
        !matches!(self, AssessmentStatus::Completed | AssessmentStatus::Submitting)
    }

    /// Returns true if a submission may be started from this status.
    pub fn can_submit(&self) -> bool {
        matches!(self, AssessmentStatus::AwaitingSubmission | AssessmentStatus::Failed)
    }
}

impl StateMachine for AssessmentStatus {
    fn successors(&self) -> &'static [Self] {
        use AssessmentStatus::*;
        match self {
            InProgress => &[AwaitingSubmission],
            AwaitingSubmission => &[InProgress, Submitting],
            Submitting => &[Completed, Failed],
            Failed => &[Submitting, InProgress, AwaitingSubmission],
            // Leaving Completed requires an explicit reset.
            Completed => &[],
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssessmentStatus::InProgress => "In Progress",
            AssessmentStatus::AwaitingSubmission => "Awaiting Submission",
            AssessmentStatus::Submitting => "Submitting",
            AssessmentStatus::Completed => "Completed",
            AssessmentStatus::Failed => "Failed",
        })
    }
}
