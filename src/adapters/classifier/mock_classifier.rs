//! Mock Risk Classifier for testing and local development.
//!
//! Scripted responses are consumed in order. Once the script runs out the
//! mock echoes the local estimate for the submitted features, which keeps
//! a development server usable without the remote service.
//!
//! # Example
//!
//! ```ignore
//! let classifier = MockRiskClassifier::new()
//!     .with_classification(Classification::new(RiskLabel::Low))
//!     .with_error(ClassifierError::Unavailable("down".into()));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::domain::questionnaire::{estimate, ModelFeatures};
use crate::ports::{Classification, ClassifierError, RiskClassifier};

/// Mock classifier with scripted responses and call tracking.
#[derive(Debug, Default)]
pub struct MockRiskClassifier {
    responses: Mutex<VecDeque<Result<Classification, ClassifierError>>>,
    delay: Duration,
    calls: Mutex<Vec<ModelFeatures>>,
}

impl MockRiskClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful classification.
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.responses.get_mut().push_back(Ok(classification));
        self
    }

    /// Queues a failure.
    pub fn with_error(mut self, error: ClassifierError) -> Self {
        self.responses.get_mut().push_back(Err(error));
        self
    }

    /// Simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Features received so far, in call order.
    pub async fn calls(&self) -> Vec<ModelFeatures> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl RiskClassifier for MockRiskClassifier {
    async fn classify(&self, features: &ModelFeatures) -> Result<Classification, ClassifierError> {
        self.calls.lock().await.push(features.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.responses.lock().await.pop_front() {
            Some(scripted) => scripted,
            None => Ok(Classification::new(estimate(features))),
        }
    }
}
