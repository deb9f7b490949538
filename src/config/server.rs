//! HTTP listener, logging and CORS settings.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for `request_timeout_secs`.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// `server` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind; must be an IP literal.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive, overridden by `RUST_LOG` when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Whole-request budget; must cover `ServicesConfig::worst_case_latency`.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated list of browser origins allowed to call the API.
    pub cors_origins: Option<String>,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for local runs.
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers.
    Json,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured origins with blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,screentime_check=debug,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    150
}
