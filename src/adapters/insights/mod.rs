//! Insight generator adapters.

mod http_insight_generator;
mod mock_insight_generator;

pub use http_insight_generator::{HttpInsightConfig, HttpInsightGenerator};
pub use mock_insight_generator::MockInsightGenerator;
