//! Screentime Check - Caregiver questionnaire for problematic internet use
//!
//! A caregiver answers a fixed catalogue of questions about a child's
//! internet use. Answers are encoded, classified by a remote service,
//! cross-checked against a local estimate that can only escalate risk, and
//! narrated by a remote insight service with a local fallback. Signed-in
//! users get the result merged into their stored profile document.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
