//! Error vocabulary shared across layers.
//!
//! `ValidationError` is raised while building value objects. `DomainError`
//! is the code + message + details triple that crosses into the HTTP layer.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A value could not be turned into a domain value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Stable machine-readable error codes, as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Answers
    ValidationFailed,
    UnknownQuestion,
    InvalidAnswer,
    IncompleteAnswers,

    // Session lifecycle
    InvalidStateTransition,
    AssessmentCompleted,

    // Collaborators and storage
    ClassifierUnavailable,
    StoreError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::UnknownQuestion => "UNKNOWN_QUESTION",
            ErrorCode::InvalidAnswer => "INVALID_ANSWER",
            ErrorCode::IncompleteAnswers => "INCOMPLETE_ANSWERS",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::AssessmentCompleted => "ASSESSMENT_COMPLETED",
            ErrorCode::ClassifierUnavailable => "CLASSIFIER_UNAVAILABLE",
            ErrorCode::StoreError => "STORE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coded error with optional key/value context.
///
/// Details are ordered so serialized bodies are stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::new(ErrorCode::ValidationFailed, err.to_string()).with_detail("field", field)
    }
}
