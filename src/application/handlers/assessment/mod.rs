//! Assessment handlers - resolving, submitting and reading assessments.

mod load_profile;
mod resolve_result;
mod submit_assessment;

pub use load_profile::{LoadProfileHandler, ProfileOutcome};
pub use resolve_result::{
    effective_status, fallback_insights, ResolveError, ResultResolver, DEFAULT_INSIGHTS,
    DEFAULT_SUGGESTIONS,
};
pub use submit_assessment::{
    SaveStatus, SubmitAssessmentHandler, SubmitError, SubmitOutcome, RETRY_MESSAGE,
};
