//! HTTP Risk Classifier - Client for the deployed classification service.
//!
//! # Wire format
//!
//! ```text
//! POST {base_url}/check_health
//! {"features": [0.0, 2.0, ...]}            (catalogue order, model scale)
//!
//! 200 {"health_score": 3, "health_status": "Moderate Risk",
//!      "score_explanation": "...", "suggestions": "..."}
//! 4xx/5xx {"error": "..."}
//! ```
//!
//! Transient failures (timeouts, connection errors, 5xx) are retried with
//! exponential backoff up to `max_retries` times.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::domain::questionnaire::{ModelFeatures, RiskLabel};
use crate::ports::{Classification, ClassifierError, RiskClassifier};

/// Configuration for the HTTP classifier.
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub timeout: Duration,
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further attempt.
    pub retry_backoff: Duration,
}

impl HttpClassifierConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
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

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}

/// Classifier client over HTTP.
pub struct HttpRiskClassifier {
    config: HttpClassifierConfig,
    client: Client,
}

impl HttpRiskClassifier {
    pub fn new(config: HttpClassifierConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/check_health", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(&self, body: &ClassifyRequest) -> Result<Response, ClassifierError> {
        let mut request = self.client.post(self.endpoint()).json(body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                ClassifierError::Network(format!("Connection failed: {}", e))
            } else {
                ClassifierError::Network(e.to_string())
            }
        })
    }

    async fn parse(&self, response: Response) -> Result<Classification, ClassifierError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            return Err(match status.as_u16() {
                400..=499 => ClassifierError::Rejected {
                    status: status.as_u16(),
                    message,
                },
                500..=599 => {
                    ClassifierError::Unavailable(format!("Server error {}: {}", status, message))
                }
                _ => ClassifierError::Protocol(format!("Unexpected status {}", status)),
            });
        }

        let body: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Protocol(format!("Failed to parse response: {}", e)))?;

        into_classification(body)
    }

    async fn attempt(&self, body: &ClassifyRequest) -> Result<Classification, ClassifierError> {
        let response = self.send(body).await?;
        self.parse(response).await
    }
}

#[async_trait]
impl RiskClassifier for HttpRiskClassifier {
    #[instrument(skip(self, features), fields(features = features.len()))]
    async fn classify(&self, features: &ModelFeatures) -> Result<Classification, ClassifierError> {
        let body = ClassifyRequest::from_features(features);
        let mut retry_count = 0;

        loop {
            match self.attempt(&body).await {
                Ok(classification) => {
                    debug!(status = %classification.status, retry_count, "classifier responded");
                    return Ok(classification);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    let delay = self.config.retry_backoff * (1 << retry_count);
                    warn!(error = %err, retry_count, ?delay, "classifier call failed, retrying");
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ClassifyRequest {
    features: Vec<f64>,
}

impl ClassifyRequest {
    fn from_features(features: &ModelFeatures) -> Self {
        Self {
            features: features.values().into_iter().map(f64::from).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ClassifyResponse {
    health_score: Option<i64>,
    health_status: Option<String>,
    score_explanation: Option<String>,
    suggestions: Option<String>,
    error: Option<String>,
}

fn into_classification(body: ClassifyResponse) -> Result<Classification, ClassifierError> {
    if let Some(error) = body.error {
        return Err(ClassifierError::Protocol(error));
    }

    let score = body
        .health_score
        .and_then(|s| u8::try_from(s).ok())
        .filter(|s| *s <= 5);

    let status = match (body.health_status.as_deref(), score) {
        (Some(label), _) => label
            .parse::<RiskLabel>()
            .map_err(|e| ClassifierError::Protocol(e.to_string()))?,
        (None, Some(score)) => RiskLabel::from_score(score).ok_or_else(|| {
            ClassifierError::Protocol(format!("score {} has no risk label", score))
        })?,
        (None, None) => {
            return Err(ClassifierError::Protocol(
                "response carried neither health_status nor health_score".to_string(),
            ))
        }
    };

    Ok(Classification {
        status,
        suggestions: body.suggestions.filter(|s| !s.trim().is_empty()),
        score,
        explanation: body.score_explanation,
    })
}

/// Extracts `error` from a JSON error body, or falls back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ClassifyResponse>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::encode_for_model;
    use std::collections::BTreeMap;

    fn response(json: &str) -> ClassifyResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn request_carries_full_vector_as_floats() {
        let mut answers = BTreeMap::new();
        answers.insert("PCIAT_01".to_string(), "Often".to_string());
        let body = ClassifyRequest::from_features(&encode_for_model(&answers));

        let json = serde_json::to_value(&body).unwrap();
        let features = json["features"].as_array().unwrap();
        assert_eq!(features.len(), 20);
        assert_eq!(features[0], 3.0);
        assert_eq!(features[1], 0.0);
    }

    #[test]
    fn parses_full_success_body() {
        let c = into_classification(response(
            r#"{"health_score":3,"health_status":"Moderate Risk","score_explanation":"Moderate internet usage","suggestions":"Set limits"}"#,
        ))
        .unwrap();

        assert_eq!(c.status, RiskLabel::Moderate);
        assert_eq!(c.score, Some(3));
        assert_eq!(c.suggestions.as_deref(), Some("Set limits"));
        assert_eq!(c.explanation.as_deref(), Some("Moderate internet usage"));
    }

    #[test]
    fn derives_status_from_score_when_label_missing() {
        let c = into_classification(response(r#"{"health_score":5}"#)).unwrap();
        assert_eq!(c.status, RiskLabel::Severe);
        assert!(c.suggestions.is_none());
    }

    #[test]
    fn blank_suggestions_are_treated_as_absent() {
        let c = into_classification(response(
            r#"{"health_status":"Low Risk","suggestions":"  "}"#,
        ))
        .unwrap();
        assert!(c.suggestions.is_none());
    }

    #[test]
    fn unknown_label_is_protocol_error() {
        let err = into_classification(response(r#"{"health_status":"Purple"}"#)).unwrap_err();
        assert!(matches!(err, ClassifierError::Protocol(_)));
    }

    #[test]
    fn miscased_label_is_protocol_error() {
        let err = into_classification(response(r#"{"health_status":"high risk"}"#)).unwrap_err();
        assert!(matches!(err, ClassifierError::Protocol(_)));
    }

    #[test]
    fn empty_body_is_protocol_error() {
        let err = into_classification(ClassifyResponse::default()).unwrap_err();
        assert!(matches!(err, ClassifierError::Protocol(_)));
    }

    #[test]
    fn error_message_prefers_json_error_field() {
        assert_eq!(
            error_message(r#"{"error":"Expected 20 features, got 3"}"#),
            "Expected 20 features, got 3"
        );
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let classifier =
            HttpRiskClassifier::new(HttpClassifierConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(classifier.endpoint(), "http://localhost:5000/check_health");
    }
}
