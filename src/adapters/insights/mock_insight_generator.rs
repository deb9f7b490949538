//! Mock Insight Generator for testing and local development.

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

use crate::domain::questionnaire::{ModelFeatures, RiskLabel};
use crate::ports::{InsightError, InsightGenerator};

/// Scripted insight generator.
///
/// Falls back to a canned sentence naming the status once the script is
/// exhausted.
#[derive(Debug, Default)]
pub struct MockInsightGenerator {
    responses: Mutex<VecDeque<Result<String, InsightError>>>,
    calls: Mutex<Vec<RiskLabel>>,
}

impl MockInsightGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_insights(mut self, insights: impl Into<String>) -> Self {
        self.responses.get_mut().push_back(Ok(insights.into()));
        self
    }

    pub fn with_error(mut self, error: InsightError) -> Self {
        self.responses.get_mut().push_back(Err(error));
        self
    }

    /// Statuses the generator was asked about, in call order.
    pub async fn requested_statuses(&self) -> Vec<RiskLabel> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl InsightGenerator for MockInsightGenerator {
    async fn generate(
        &self,
        _features: &ModelFeatures,
        status: RiskLabel,
    ) -> Result<String, InsightError> {
        self.calls.lock().await.push(status);

        match self.responses.lock().await.pop_front() {
            Some(scripted) => scripted,
            None => Ok(format!(
                "**Summary**: responses are consistent with {}. *Keep devices out of bedrooms *Agree on screen-free mealtimes",
                status.as_str().to_lowercase()
            )),
        }
    }
}
