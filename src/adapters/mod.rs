//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `classifier` - Remote risk classifier (HTTP, mock)
//! - `insights` - Remote insight generator (HTTP, mock)
//! - `store` - Per-identity document stores (in-memory, JSON files) and report persistence
//! - `http` - REST API (axum)

pub mod classifier;
pub mod http;
pub mod insights;
pub mod store;

pub use classifier::{HttpClassifierConfig, HttpRiskClassifier, MockRiskClassifier};
pub use insights::{HttpInsightConfig, HttpInsightGenerator, MockInsightGenerator};
pub use store::{FileDocumentStore, InMemoryDocumentStore, ReportStoreAdapter, SaveOutcome};
