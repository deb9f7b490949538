//! Remote collaborator configuration (classifier and insight generator)

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Remote service configuration
///
/// When `classifier_url` is unset the server runs against the in-process
/// mock collaborators, which is only allowed outside production.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the classification service
    pub classifier_url: Option<String>,

    /// Base URL of the insight service; defaults to `classifier_url`
    pub insight_url: Option<String>,

    /// Bearer token sent to both services
    pub api_key: Option<Secret<String>>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Classifier retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Delay before the first classifier retry; doubled on each further one
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl ServicesConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Longest a submission can spend waiting on the collaborators.
    ///
    /// Every classifier attempt may run to the timeout, with the doubling
    /// backoff between attempts, followed by one insight call.
    pub fn worst_case_latency(&self) -> Duration {
        let attempts = self.max_retries.saturating_add(1);
        let backoff_units = (1u32 << self.max_retries.min(16)).saturating_sub(1);
        self.timeout()
            .saturating_mul(attempts)
            .saturating_add(self.retry_backoff().saturating_mul(backoff_units))
            .saturating_add(self.timeout())
    }

    pub fn uses_mocks(&self) -> bool {
        self.classifier_url.as_ref().map_or(true, |u| u.is_empty())
    }

    /// Insight service URL, falling back to the classifier's host
    pub fn insight_base_url(&self) -> Option<&str> {
        self.insight_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.classifier_url.as_deref())
    }

    /// Validate service configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidServiceTimeout);
        }
        if self.max_retries > 5 {
            return Err(ValidationError::TooManyRetries);
        }

        if self.uses_mocks() {
            if *environment == Environment::Production {
                return Err(ValidationError::MissingRequired("SERVICES__CLASSIFIER_URL"));
            }
            return Ok(());
        }

        let production = *environment == Environment::Production;
        check_url("classifier", self.classifier_url.as_deref(), production)?;
        check_url("insights", self.insight_base_url(), production)?;
        Ok(())
    }
}

fn check_url(
    service: &'static str,
    url: Option<&str>,
    require_https: bool,
) -> Result<(), ValidationError> {
    let url = url.ok_or(ValidationError::InvalidServiceUrl(service))?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidServiceUrl(service));
    }
    if require_https && !url.starts_with("https://") {
        return Err(ValidationError::ServiceUrlMustBeHttps(service));
    }
    Ok(())
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            classifier_url: None,
            insight_url: None,
            api_key: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}

fn default_retry_backoff() -> u64 {
    500
}
