//! Report Store Adapter - Persists reports into the per-identity document.
//!
//! Saving without an identity is a no-op that tells the caller to surface
//! the "log in to save" affordance. Loading distinguishes "no assessment
//! yet" (`Ok(None)`) from store failures (`Err`).

use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::foundation::UserId;
use crate::domain::questionnaire::Answers;
use crate::domain::report::{AssessmentRecord, ProfileView, RiskReport};
use crate::ports::{DocumentStore, StoreError};

/// Document field whose presence marks a completed assessment.
const ASSESSMENT_MARKER: &str = "healthTest";

/// Result of a save attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    NotSaved(NotSavedReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotSavedReason {
    /// No identity; results are shown but not persisted.
    LoginRequired,
}

#[derive(Clone)]
pub struct ReportStoreAdapter {
    store: Arc<dyn DocumentStore>,
}

impl ReportStoreAdapter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Merges the report into the identity's document.
    #[instrument(skip(self, report, answers), fields(assessment_id = %report.assessment_id()))]
    pub async fn save(
        &self,
        identity: Option<&UserId>,
        report: &RiskReport,
        answers: &Answers,
    ) -> Result<SaveOutcome, StoreError> {
        let Some(identity) = identity else {
            return Ok(SaveOutcome::NotSaved(NotSavedReason::LoginRequired));
        };

        let fields = AssessmentRecord::from_report(report, answers)
            .to_fields()
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        self.store.merge(identity, fields).await?;
        info!(user_id = %identity, status = %report.status(), "assessment saved");
        Ok(SaveOutcome::Saved)
    }

    /// Loads the identity's latest assessment.
    pub async fn load(&self, identity: &UserId) -> Result<Option<ProfileView>, StoreError> {
        let Some(doc) = self.store.get(identity).await? else {
            return Ok(None);
        };

        if !doc.get(ASSESSMENT_MARKER).is_some_and(|v| !v.is_null()) {
            return Ok(None);
        }

        Ok(Some(ProfileView::from_document(&doc)))
    }
}
