//! Typed configuration from the environment.
//!
//! Three sections: `server` (listener, logging, CORS), `services` (remote
//! classifier and insight endpoints) and `store` (profile document backend).
//!
//! # Example
//!
//! ```no_run
//! use screentime_check::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("listening on {}", config.server.socket_addr());
//! ```

mod error;
mod server;
mod services;
mod store;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};
pub use services::ServicesConfig;
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a development
/// server backed by mock collaborators and an in-memory store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote classifier and insight services
    #[serde(default)]
    pub services: ServicesConfig,

    /// Document store backend
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and then `SCREENTIME_CHECK__*` variables.
    ///
    /// Sections nest on `__`:
    /// `SCREENTIME_CHECK__SERVICES__CLASSIFIER_URL` sets
    /// `services.classifier_url`. Values are not validated here; call
    /// [`AppConfig::validate`] once logging is up so failures are reported.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SCREENTIME_CHECK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section, then that the request budget outlasts the
    /// collaborators; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.services.validate(&self.server.environment)?;
        self.store.validate()?;

        let worst_case = self.services.worst_case_latency();
        if self.server.request_timeout() < worst_case {
            let whole = worst_case.as_secs();
            let required_secs = if worst_case.subsec_nanos() > 0 { whole + 1 } else { whole };
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                required_secs,
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SCREENTIME_CHECK__SERVER__PORT",
        "SCREENTIME_CHECK__SERVER__ENVIRONMENT",
        "SCREENTIME_CHECK__SERVER__LOG_FORMAT",
        "SCREENTIME_CHECK__SERVICES__CLASSIFIER_URL",
        "SCREENTIME_CHECK__SERVICES__MAX_RETRIES",
        "SCREENTIME_CHECK__STORE__BACKEND",
        "SCREENTIME_CHECK__STORE__DATA_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn empty_environment_yields_development_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.services.uses_mocks());
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_sections_load_from_double_underscore_vars() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SCREENTIME_CHECK__SERVER__PORT", "3000");
        env::set_var("SCREENTIME_CHECK__SERVER__LOG_FORMAT", "json");
        env::set_var("SCREENTIME_CHECK__SERVICES__CLASSIFIER_URL", "http://localhost:5000");
        env::set_var("SCREENTIME_CHECK__SERVICES__MAX_RETRIES", "1");
        env::set_var("SCREENTIME_CHECK__STORE__BACKEND", "file");
        env::set_var("SCREENTIME_CHECK__STORE__DATA_DIR", "/tmp/screentime");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.services.classifier_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.services.max_retries, 1);
        assert_eq!(config.store.backend, StoreBackend::File);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn request_budget_must_outlast_collaborators() {
        let mut config = AppConfig::default();
        config.services.classifier_url = Some("http://localhost:5000".to_string());
        assert!(config.validate().is_ok());

        config.server.request_timeout_secs = 60;
        assert_eq!(
            config.validate(),
            Err(ValidationError::RequestTimeoutTooShort {
                request_secs: 60,
                required_secs: 122,
            })
        );

        config.server.request_timeout_secs = 122;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn production_without_services_is_invalid() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SCREENTIME_CHECK__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }
}
