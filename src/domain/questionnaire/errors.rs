//! Questionnaire-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Message shown when a submission is attempted before every question is answered.
pub const INCOMPLETE_MESSAGE: &str = "Please answer all questions before submitting.";

/// Errors raised while collecting answers or gating submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Key does not name a question in the catalogue.
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    /// Value is not acceptable for the question.
    #[error("Invalid answer for '{key}': {reason}")]
    InvalidAnswer { key: String, reason: String },

    /// Submission attempted with unanswered questions.
    #[error("{} ({} unanswered)", INCOMPLETE_MESSAGE, .missing.len())]
    Incomplete { missing: Vec<String> },

    /// Session already holds a result; reset to start again.
    #[error("Assessment already completed; start a new assessment to answer again")]
    AlreadyCompleted,

    /// A submission for this session is still being resolved.
    #[error("Submission already in progress")]
    SubmissionInFlight,
}

impl SessionError {
    pub fn invalid_answer(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SessionError::InvalidAnswer {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::UnknownQuestion(_) => ErrorCode::UnknownQuestion,
            SessionError::InvalidAnswer { .. } => ErrorCode::InvalidAnswer,
            SessionError::Incomplete { .. } => ErrorCode::IncompleteAnswers,
            SessionError::AlreadyCompleted => ErrorCode::AssessmentCompleted,
            SessionError::SubmissionInFlight => ErrorCode::InvalidStateTransition,
        }
    }

    /// True for errors the user fixes by editing answers.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SessionError::UnknownQuestion(_)
                | SessionError::InvalidAnswer { .. }
                | SessionError::Incomplete { .. }
        )
    }
}

impl From<SessionError> for DomainError {
    fn from(err: SessionError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            SessionError::UnknownQuestion(key) | SessionError::InvalidAnswer { key, .. } => {
                domain.with_detail("key", key)
            }
            SessionError::Incomplete { missing } => domain.with_detail("missing", missing.join(",")),
            _ => domain,
        }
    }
}
