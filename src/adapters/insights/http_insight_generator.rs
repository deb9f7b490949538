//! HTTP Insight Generator - Client for the narrative insight service.
//!
//! ```text
//! POST {base_url}/get_gemini_insights
//! {"answers": {"PCIAT_01": 3, ...}, "healthStatus": "Moderate Risk"}
//!
//! 200 {"insights": "..."}
//! ```
//!
//! Calls are made once; the resolver owns the fallback.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::domain::questionnaire::{ModelFeatures, RiskLabel};
use crate::ports::{InsightError, InsightGenerator};

#[derive(Debug, Clone)]
pub struct HttpInsightConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl HttpInsightConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpInsightGenerator {
    config: HttpInsightConfig,
    client: Client,
}

impl HttpInsightGenerator {
    pub fn new(config: HttpInsightConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/get_gemini_insights",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl InsightGenerator for HttpInsightGenerator {
    #[instrument(skip(self, features), fields(status = %status))]
    async fn generate(
        &self,
        features: &ModelFeatures,
        status: RiskLabel,
    ) -> Result<String, InsightError> {
        let body = InsightRequest::new(features, status);

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InsightError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else {
                InsightError::Network(e.to_string())
            }
        })?;

        let status_code = response.status();
        if !status_code.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status_code.as_u16(),
                message,
            });
        }

        let parsed: InsightResponse = response
            .json()
            .await
            .map_err(|e| InsightError::Protocol(format!("Failed to parse response: {}", e)))?;

        debug!(chars = parsed.insights.len(), "insights received");
        Ok(parsed.insights)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightRequest {
    answers: BTreeMap<String, u8>,
    health_status: String,
}

impl InsightRequest {
    fn new(features: &ModelFeatures, status: RiskLabel) -> Self {
        Self {
            answers: features.to_map(),
            health_status: status.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InsightResponse {
    #[serde(default)]
    insights: String,
}
