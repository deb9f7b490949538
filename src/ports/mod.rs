//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RiskClassifier` - Remote classification service
//! - `InsightGenerator` - Remote insight (narrative) service
//! - `DocumentStore` - Per-identity document store

mod document_store;
mod insight_generator;
mod risk_classifier;

pub use document_store::{Document, DocumentStore, StoreError};
pub use insight_generator::{InsightError, InsightGenerator};
pub use risk_classifier::{Classification, ClassifierError, RiskClassifier};
