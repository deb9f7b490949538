//! Insight Generator Port - Interface for the remote narrative service.
//!
//! Produces free-text insights for an encoded answer set and its effective
//! status. Failures here never fail a submission; the resolver substitutes
//! a deterministic sentence instead.

use async_trait::async_trait;

use crate::domain::questionnaire::{ModelFeatures, RiskLabel};

/// Port for the remote insight generator.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(
        &self,
        features: &ModelFeatures,
        status: RiskLabel,
    ) -> Result<String, InsightError>;
}

/// Insight generator errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsightError {
    #[error("insight generator timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("insight generator network error: {0}")]
    Network(String),

    #[error("insight generator returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("insight generator protocol error: {0}")]
    Protocol(String),
}
