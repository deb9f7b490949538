//! Axum router configuration for assessment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_profile, list_questions, submit_assessment, AssessmentAppState};

/// Create the assessment API router.
///
/// # Routes
///
/// - `GET /questions` - Question catalogue
/// - `POST /assessments` - Submit answers (identity optional)
/// - `GET /profile` - Latest saved assessment or demo profile
pub fn assessment_routes() -> Router<AssessmentAppState> {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/assessments", post(submit_assessment))
        .route("/profile", get(get_profile))
}
