//! Risk classifier adapters.

mod http_classifier;
mod mock_classifier;

pub use http_classifier::{HttpClassifierConfig, HttpRiskClassifier};
pub use mock_classifier::MockRiskClassifier;
