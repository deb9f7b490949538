//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Submission is the only command; the profile read is the only query.

pub mod handlers;

pub use handlers::{
    LoadProfileHandler, ProfileOutcome, ResultResolver, SaveStatus, SubmitAssessmentHandler,
    SubmitError, SubmitOutcome,
};
