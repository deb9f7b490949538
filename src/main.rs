//! Screentime Check server binary.
//!
//! Loads configuration from the environment, initialises logging, wires the
//! collaborators and serves the HTTP API until Ctrl-C / SIGTERM.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use screentime_check::adapters::http::{app_router, AssessmentAppState};
use screentime_check::adapters::{
    FileDocumentStore, HttpClassifierConfig, HttpInsightConfig, HttpInsightGenerator,
    HttpRiskClassifier, InMemoryDocumentStore, MockInsightGenerator, MockRiskClassifier,
    ReportStoreAdapter,
};
use screentime_check::application::{LoadProfileHandler, ResultResolver, SubmitAssessmentHandler};
use screentime_check::config::{AppConfig, LogFormat, ServicesConfig, StoreBackend, StoreConfig};
use screentime_check::ports::{DocumentStore, InsightGenerator, RiskClassifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.server.log_format);
    config.validate()?;

    let (classifier, insights) = collaborators(&config.services)?;
    let store = ReportStoreAdapter::new(document_store(&config.store));

    let resolver = Arc::new(ResultResolver::new(classifier, insights));
    let state = AssessmentAppState::new(
        Arc::new(SubmitAssessmentHandler::new(resolver, store.clone())),
        Arc::new(LoadProfileHandler::new(store)),
    );

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "listening");

    axum::serve(listener, app_router(state, &config.server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn collaborators(
    services: &ServicesConfig,
) -> Result<(Arc<dyn RiskClassifier>, Arc<dyn InsightGenerator>), reqwest::Error> {
    let (Some(classifier_url), Some(insight_url)) =
        (services.classifier_url.as_deref().filter(|u| !u.is_empty()), services.insight_base_url())
    else {
        warn!("no classifier URL configured; using mock collaborators");
        let classifier: Arc<dyn RiskClassifier> = Arc::new(MockRiskClassifier::new());
        let insights: Arc<dyn InsightGenerator> = Arc::new(MockInsightGenerator::new());
        return Ok((classifier, insights));
    };

    let mut classifier_config = HttpClassifierConfig::new(classifier_url)
        .with_timeout(services.timeout())
        .with_max_retries(services.max_retries)
        .with_retry_backoff(services.retry_backoff());
    let mut insight_config = HttpInsightConfig::new(insight_url).with_timeout(services.timeout());
    if let Some(key) = &services.api_key {
        classifier_config = classifier_config.with_api_key(key.clone());
        insight_config = insight_config.with_api_key(key.clone());
    }

    info!(classifier_url, insight_url, "using remote collaborators");
    let classifier: Arc<dyn RiskClassifier> = Arc::new(HttpRiskClassifier::new(classifier_config)?);
    let insights: Arc<dyn InsightGenerator> = Arc::new(HttpInsightGenerator::new(insight_config)?);
    Ok((classifier, insights))
}

fn document_store(store: &StoreConfig) -> Arc<dyn DocumentStore> {
    match (store.backend, &store.data_dir) {
        (StoreBackend::File, Some(dir)) => {
            info!(data_dir = %dir.display(), "using file document store");
            Arc::new(FileDocumentStore::new(dir))
        }
        _ => {
            info!("using in-memory document store");
            Arc::new(InMemoryDocumentStore::new())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
