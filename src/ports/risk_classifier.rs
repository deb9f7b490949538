//! Risk Classifier Port - Interface for the remote classification service.
//!
//! The classifier receives the model-scale feature vector in catalogue order
//! and answers with a risk label plus general suggestions. Its failure is
//! fatal to the submission being resolved.

use async_trait::async_trait;

use crate::domain::questionnaire::{ModelFeatures, RiskLabel};

/// Port for the remote risk classifier.
#[async_trait]
pub trait RiskClassifier: Send + Sync {
    /// Classifies one encoded answer set.
    async fn classify(&self, features: &ModelFeatures) -> Result<Classification, ClassifierError>;
}

/// Classifier verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub status: RiskLabel,
    /// General suggestions; absent when the service sent none.
    pub suggestions: Option<String>,
    /// Raw model score (0..=5), when reported.
    pub score: Option<u8>,
    pub explanation: Option<String>,
}

impl Classification {
    pub fn new(status: RiskLabel) -> Self {
        Self {
            status,
            suggestions: None,
            score: None,
            explanation: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: impl Into<String>) -> Self {
        self.suggestions = Some(suggestions.into());
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = Some(score);
        self
    }
}

/// Classifier transport and protocol errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    /// Request timed out.
    #[error("classifier timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Could not reach the service.
    #[error("classifier network error: {0}")]
    Network(String),

    /// Service rejected the request (4xx).
    #[error("classifier rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Service failed (5xx).
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// Response could not be understood.
    #[error("classifier protocol error: {0}")]
    Protocol(String),
}

impl ClassifierError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClassifierError::Timeout { .. }
                | ClassifierError::Network(_)
                | ClassifierError::Unavailable(_)
        )
    }
}
