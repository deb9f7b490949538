//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    LoadProfileHandler, ProfileOutcome, ResultResolver, SaveStatus, SubmitAssessmentHandler,
    SubmitError, SubmitOutcome,
};
