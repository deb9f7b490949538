//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `questionnaire` - Question catalogue, answers, encoding, local risk estimate, session
//! - `report` - Risk report, persisted record shape, profile read model

pub mod foundation;
pub mod questionnaire;
pub mod report;
