//! Checked transitions for lifecycle enums.

use std::fmt;
use thiserror::Error;

/// A move between two states that the lifecycle does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot move from {from} to {to}")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

/// A status enum whose legal moves are a fixed successor table.
///
/// ```ignore
/// let next = AssessmentStatus::AwaitingSubmission
///     .transition_to(AssessmentStatus::Submitting)?;
/// ```
pub trait StateMachine: Copy + PartialEq + fmt::Debug + 'static {
    /// States reachable from `self` in one step.
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, target: Self) -> bool {
        self.successors().contains(&target)
    }

    fn transition_to(self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: format!("{:?}", self),
                to: format!("{:?}", target),
            })
        }
    }

    /// No outgoing moves.
    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}
