//! HTTP adapter for assessment endpoints.
//!
//! Exposes the questionnaire via REST API:
//! - `GET /api/questions` - Question catalogue
//! - `POST /api/assessments` - Submit answers and receive the risk report
//! - `GET /api/profile` - Latest saved assessment (demo content for visitors)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AssessmentAppState;
pub use routes::assessment_routes;
