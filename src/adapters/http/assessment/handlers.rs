//! HTTP handlers for assessment endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::error;

use crate::adapters::http::middleware::OptionalIdentity;
use crate::application::handlers::assessment::RETRY_MESSAGE;
use crate::application::{
    LoadProfileHandler, ProfileOutcome, SubmitAssessmentHandler, SubmitError,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::questionnaire::{questions, QuestionnaireSession, SessionError, INCOMPLETE_MESSAGE};

use super::dto::{
    ErrorResponse, ProfileResponse, QuestionCatalogueResponse, SubmitAssessmentRequest,
    SubmitAssessmentResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssessmentAppState {
    pub submit_handler: Arc<SubmitAssessmentHandler>,
    pub profile_handler: Arc<LoadProfileHandler>,
}

impl AssessmentAppState {
    pub fn new(
        submit_handler: Arc<SubmitAssessmentHandler>,
        profile_handler: Arc<LoadProfileHandler>,
    ) -> Self {
        Self {
            submit_handler,
            profile_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/questions - The question catalogue in presentation order
pub async fn list_questions() -> Json<QuestionCatalogueResponse> {
    let questions = questions();
    Json(QuestionCatalogueResponse {
        count: questions.len(),
        questions,
    })
}

/// POST /api/assessments - Submit a complete answer set
pub async fn submit_assessment(
    State(state): State<AssessmentAppState>,
    OptionalIdentity(identity): OptionalIdentity,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Response {
    let mut session = QuestionnaireSession::new();
    for (key, value) in req.answers {
        if let Err(e) = session.answer(&key, value.into_raw()) {
            return session_error(e);
        }
    }
    let session = Mutex::new(session);

    match state.submit_handler.handle(&session, identity.as_ref()).await {
        Ok(outcome) => {
            let response = SubmitAssessmentResponse::new(&outcome.report, outcome.save);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(SubmitError::Session(e)) => session_error(e),
        Err(SubmitError::Classifier(_)) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(ErrorCode::ClassifierUnavailable, RETRY_MESSAGE)),
        )
            .into_response(),
        Err(SubmitError::Superseded) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(
                ErrorCode::InvalidStateTransition,
                "Assessment was restarted before its result arrived",
            )),
        )
            .into_response(),
    }
}

/// GET /api/profile - Latest saved assessment, or demo content for visitors
pub async fn get_profile(
    State(state): State<AssessmentAppState>,
    OptionalIdentity(identity): OptionalIdentity,
) -> Response {
    match state.profile_handler.handle(identity.as_ref()).await {
        Ok(ProfileOutcome::Found(view)) | Ok(ProfileOutcome::Demo(view)) => {
            (StatusCode::OK, Json(ProfileResponse::from(view))).into_response()
        }
        Ok(ProfileOutcome::NoAssessmentYet) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "NO_ASSESSMENT",
                "No assessment yet. Complete the questionnaire to see your results here.",
            )),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to load profile");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    ErrorCode::StoreError,
                    "Failed to load your saved results. Please try again later.",
                )),
            )
                .into_response()
        }
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn session_error(err: SessionError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CONFLICT
    };

    let body = match err {
        SessionError::Incomplete { missing } => {
            ErrorResponse::new(ErrorCode::IncompleteAnswers, INCOMPLETE_MESSAGE)
                .with_details(json!({ "missing": missing }))
        }
        other => ErrorResponse::from(DomainError::from(other)),
    };

    (status, Json(body)).into_response()
}
