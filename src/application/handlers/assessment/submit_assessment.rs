//! SubmitAssessmentHandler - Command handler for submitting a questionnaire.
//!
//! Gates the submission on the session, resolves the answers snapshot,
//! applies the outcome only if the session has not been reset meanwhile,
//! and finally persists the report for signed-in users. A store failure is
//! reported alongside the report; it never discards a resolved result.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::adapters::store::{NotSavedReason, ReportStoreAdapter, SaveOutcome};
use crate::domain::foundation::UserId;
use crate::domain::questionnaire::{Applied, QuestionnaireSession, SessionError};
use crate::domain::report::RiskReport;
use crate::ports::ClassifierError;

use super::resolve_result::{ResolveError, ResultResolver};

/// Message shown when the classifier could not be reached.
pub const RETRY_MESSAGE: &str =
    "We couldn't analyze your answers right now. Please try again in a moment.";

/// Persistence status reported next to a resolved report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// Visitor without identity; offer to log in.
    LoginRequired,
    /// Store write failed; the report is still valid for display.
    Failed(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub report: RiskReport,
    pub save: SaveStatus,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// Rejected by the session (incomplete, already completed, in flight).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Classifier failed; the session is now `Failed` and may be retried.
    #[error("{}", RETRY_MESSAGE)]
    Classifier(ClassifierError),

    /// The session was reset while the submission was in flight.
    #[error("assessment was restarted before its result arrived")]
    Superseded,
}

pub struct SubmitAssessmentHandler {
    resolver: Arc<ResultResolver>,
    store: ReportStoreAdapter,
}

impl SubmitAssessmentHandler {
    pub fn new(resolver: Arc<ResultResolver>, store: ReportStoreAdapter) -> Self {
        Self { resolver, store }
    }

    /// Submits the session's answers on behalf of `identity`.
    ///
    /// The session lock is not held across the remote calls, so a reset
    /// can happen mid-flight; its result is then dropped as `Superseded`.
    #[instrument(skip(self, session), fields(signed_in = identity.is_some()))]
    pub async fn handle(
        &self,
        session: &Mutex<QuestionnaireSession>,
        identity: Option<&UserId>,
    ) -> Result<SubmitOutcome, SubmitError> {
        let ticket = session.lock().await.begin_submit()?;

        let resolved = self
            .resolver
            .resolve(ticket.assessment_id(), ticket.answers())
            .await;

        let report = match resolved {
            Ok(report) => {
                if session.lock().await.complete(&ticket, report.clone()) == Applied::Stale {
                    info!(generation = ticket.generation(), "dropping result for reset session");
                    return Err(SubmitError::Superseded);
                }
                report
            }
            Err(err) => {
                let applied = session.lock().await.fail(&ticket, RETRY_MESSAGE);
                if applied == Applied::Stale {
                    return Err(SubmitError::Superseded);
                }
                return Err(match err {
                    ResolveError::Classifier(e) => SubmitError::Classifier(e),
                    ResolveError::Incomplete { missing } => {
                        SubmitError::Session(SessionError::Incomplete { missing })
                    }
                });
            }
        };

        let save = match self.store.save(identity, &report, ticket.answers()).await {
            Ok(SaveOutcome::Saved) => SaveStatus::Saved,
            Ok(SaveOutcome::NotSaved(NotSavedReason::LoginRequired)) => SaveStatus::LoginRequired,
            Err(e) => {
                warn!(error = %e, "failed to save assessment");
                SaveStatus::Failed(e.to_string())
            }
        };

        Ok(SubmitOutcome { report, save })
    }
}
