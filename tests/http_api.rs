//! Integration tests for the HTTP surface.
//!
//! 1. The axum application router, driven in-process with `oneshot`
//! 2. The HTTP classifier and insight clients, pointed at a local stub
//!    service that speaks the deployed wire format

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use screentime_check::adapters::http::{app_router, AssessmentAppState};
use screentime_check::adapters::{
    HttpClassifierConfig, HttpInsightConfig, HttpInsightGenerator, HttpRiskClassifier,
    InMemoryDocumentStore, MockInsightGenerator, MockRiskClassifier, ReportStoreAdapter,
};
use screentime_check::application::{LoadProfileHandler, ResultResolver, SubmitAssessmentHandler};
use screentime_check::config::{AppConfig, ServerConfig};
use screentime_check::domain::questionnaire::{encode_for_model, questions, QuestionKind, RiskLabel};
use screentime_check::ports::{ClassifierError, InsightGenerator, RiskClassifier};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(classifier: MockRiskClassifier) -> Router {
    let store = ReportStoreAdapter::new(Arc::new(InMemoryDocumentStore::new()));
    let resolver = Arc::new(ResultResolver::new(
        Arc::new(classifier),
        Arc::new(MockInsightGenerator::new()),
    ));
    let state = AssessmentAppState::new(
        Arc::new(SubmitAssessmentHandler::new(resolver, store.clone())),
        Arc::new(LoadProfileHandler::new(store)),
    );
    app_router(state, &ServerConfig::default())
}

fn all_answers(frequency: &str, rating: &str) -> Value {
    let answers: serde_json::Map<String, Value> = questions()
        .iter()
        .map(|q| {
            let value = match q.kind {
                QuestionKind::Numeric => json!(6),
                QuestionKind::Choice { options } if options.contains(&frequency) => json!(frequency),
                QuestionKind::Choice { .. } => json!(rating),
            };
            (q.key.to_string(), value)
        })
        .collect();
    json!({ "answers": answers })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).unwrap()
}

// =============================================================================
// Application router
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(app(MockRiskClassifier::new()), get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn questions_are_listed_in_catalogue_order() {
    let (status, body) = send(app(MockRiskClassifier::new()), get("/api/questions", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 20);
    assert_eq!(body["questions"][0]["key"], "PCIAT_01");
    assert_eq!(body["questions"][0]["kind"], "choice");
    assert_eq!(body["questions"][19]["key"], "PCIAT_22");
    assert_eq!(body["questions"][19]["kind"], "numeric");
}

#[tokio::test]
async fn signed_in_submission_is_saved_and_shows_on_profile() {
    let app = app(MockRiskClassifier::new());

    let (status, body) = send(
        app.clone(),
        post_json("/api/assessments", &all_answers("Often", "High"), Some("parent-7")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], true);
    assert_eq!(body["report"]["status"], "Moderate Risk");
    assert_eq!(body["report"]["chart"].as_array().unwrap().len(), 20);

    let (status, profile) = send(app, get("/api/profile", Some("parent-7"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["healthTest"]["status"], "Moderate Risk");
    assert_eq!(profile["isDemo"], false);
}

#[tokio::test]
async fn visitor_submission_is_not_saved() {
    let (status, body) = send(
        app(MockRiskClassifier::new()),
        post_json("/api/assessments", &all_answers("Never", "Low"), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], false);
    assert!(body["message"].as_str().unwrap().contains("Log in"));
    assert_eq!(body["report"]["status"], "Low Risk");
}

#[tokio::test]
async fn incomplete_submission_lists_missing_keys() {
    let mut body = all_answers("Never", "Low");
    body["answers"].as_object_mut().unwrap().remove("PCIAT_05");

    let (status, error) = send(
        app(MockRiskClassifier::new()),
        post_json("/api/assessments", &body, None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INCOMPLETE_ANSWERS");
    assert_eq!(error["message"], "Please answer all questions before submitting.");
    assert_eq!(error["details"]["missing"], json!(["PCIAT_05"]));
}

#[tokio::test]
async fn invalid_label_is_rejected() {
    let mut body = all_answers("Never", "Low");
    body["answers"]["PCIAT_03"] = json!("Constantly");

    let (status, error) = send(
        app(MockRiskClassifier::new()),
        post_json("/api/assessments", &body, None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_ANSWER");
}

#[tokio::test]
async fn oversized_identity_is_rejected_not_treated_as_visitor() {
    let long_user = "u".repeat(129);

    let (status, error) = send(
        app(MockRiskClassifier::new()),
        post_json("/api/assessments", &all_answers("Never", "Low"), Some(&long_user)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_IDENTITY");

    let (status, error) = send(app(MockRiskClassifier::new()), get("/api/profile", Some(&long_user))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_IDENTITY");
}

#[tokio::test]
async fn classifier_outage_is_bad_gateway() {
    let classifier =
        MockRiskClassifier::new().with_error(ClassifierError::Unavailable("503".into()));

    let (status, error) = send(
        app(classifier),
        post_json("/api/assessments", &all_answers("Never", "Low"), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(error["code"], "CLASSIFIER_UNAVAILABLE");
}

#[tokio::test]
async fn profile_without_identity_is_demo() {
    let (status, body) = send(app(MockRiskClassifier::new()), get("/api/profile", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isDemo"], true);
    assert_eq!(body["healthTest"]["status"], "Moderate Risk (Demo)");
    assert_eq!(body["statusTone"], "caution");
}

#[tokio::test]
async fn profile_without_record_is_not_found() {
    let (status, body) = send(
        app(MockRiskClassifier::new()),
        get("/api/profile", Some("new-parent")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_ASSESSMENT");
}

// =============================================================================
// HTTP collaborators against a stub service
// =============================================================================

#[derive(Clone, Default)]
struct StubState {
    classify_calls: Arc<AtomicUsize>,
    /// Number of leading classify calls answered with 503.
    failures: usize,
}

async fn stub_check_health(State(state): State<StubState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let attempt = state.classify_calls.fetch_add(1, Ordering::SeqCst);
    if attempt < state.failures {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "model warming up"})),
        );
    }

    let features = body["features"].as_array().cloned().unwrap_or_default();
    if features.len() != 20 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("Expected 20 features, got {}", features.len())})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "health_score": 4,
            "health_status": "High Risk",
            "score_explanation": "High internet usage",
            "suggestions": "Limit screen time to 1 hour per day"
        })),
    )
}

async fn stub_insights(Json(body): Json<Value>) -> Json<Value> {
    let status = body["healthStatus"].as_str().unwrap_or_default().to_string();
    let answered = body["answers"].as_object().map(|a| a.len()).unwrap_or(0);
    Json(json!({ "insights": format!("{} across {} answers", status, answered) }))
}

async fn spawn_stub(failures: usize) -> (String, StubState) {
    let state = StubState {
        classify_calls: Arc::new(AtomicUsize::new(0)),
        failures,
    };
    let router = Router::new()
        .route("/check_health", post(stub_check_health))
        .route("/get_gemini_insights", post(stub_insights))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

fn sample_features() -> screentime_check::domain::questionnaire::ModelFeatures {
    let mut answers = BTreeMap::new();
    answers.insert("PCIAT_01".to_string(), "Always".to_string());
    encode_for_model(&answers)
}

#[tokio::test]
async fn http_classifier_speaks_wire_format() {
    let (url, state) = spawn_stub(0).await;
    let classifier = HttpRiskClassifier::new(HttpClassifierConfig::new(url)).unwrap();

    let c = classifier.classify(&sample_features()).await.unwrap();

    assert_eq!(c.status, RiskLabel::High);
    assert_eq!(c.score, Some(4));
    assert_eq!(c.suggestions.as_deref(), Some("Limit screen time to 1 hour per day"));
    assert_eq!(state.classify_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn http_classifier_retries_transient_failures() {
    let (url, state) = spawn_stub(2).await;
    let classifier = HttpRiskClassifier::new(
        HttpClassifierConfig::new(url)
            .with_max_retries(2)
            .with_retry_backoff(Duration::from_millis(5)),
    )
    .unwrap();

    let c = classifier.classify(&sample_features()).await.unwrap();

    assert_eq!(c.status, RiskLabel::High);
    assert_eq!(state.classify_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn http_classifier_gives_up_after_max_retries() {
    let (url, state) = spawn_stub(10).await;
    let classifier = HttpRiskClassifier::new(
        HttpClassifierConfig::new(url)
            .with_max_retries(1)
            .with_retry_backoff(Duration::from_millis(5)),
    )
    .unwrap();

    let err = classifier.classify(&sample_features()).await.unwrap_err();

    assert!(matches!(err, ClassifierError::Unavailable(ref m) if m.contains("model warming up")));
    assert_eq!(state.classify_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn http_classifier_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let classifier = HttpRiskClassifier::new(
        HttpClassifierConfig::new(format!("http://{}", addr)).with_max_retries(0),
    )
    .unwrap();

    let err = classifier.classify(&sample_features()).await.unwrap_err();
    assert!(matches!(err, ClassifierError::Network(_)));
}

#[tokio::test]
async fn http_insight_generator_sends_status_and_keyed_answers() {
    let (url, _) = spawn_stub(0).await;
    let generator = HttpInsightGenerator::new(HttpInsightConfig::new(url)).unwrap();

    let insights = generator
        .generate(&sample_features(), RiskLabel::Moderate)
        .await
        .unwrap();

    assert_eq!(insights, "Moderate Risk across 20 answers");
}

async fn slow_insights() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "insights": "too late" }))
}

#[tokio::test]
async fn slow_insight_service_falls_back_within_request_budget() {
    let router = Router::new().route("/get_gemini_insights", post(slow_insights));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Smallest request budget the configuration accepts for a 1s service timeout.
    let mut config = AppConfig::default();
    config.services.classifier_url = Some(url.clone());
    config.services.timeout_secs = 1;
    config.services.max_retries = 0;
    config.server.request_timeout_secs = config.services.worst_case_latency().as_secs();
    config.validate().unwrap();

    let insights = HttpInsightGenerator::new(
        HttpInsightConfig::new(url).with_timeout(config.services.timeout()),
    )
    .unwrap();
    let store = ReportStoreAdapter::new(Arc::new(InMemoryDocumentStore::new()));
    let resolver = Arc::new(ResultResolver::new(
        Arc::new(MockRiskClassifier::new()),
        Arc::new(insights),
    ));
    let state = AssessmentAppState::new(
        Arc::new(SubmitAssessmentHandler::new(resolver, store.clone())),
        Arc::new(LoadProfileHandler::new(store)),
    );
    let app = app_router(state, &config.server);

    let (status, body) = send(
        app,
        post_json("/api/assessments", &all_answers("Never", "Low"), Some("parent-9")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], true);
    assert_eq!(body["report"]["insightSource"], "fallback");
    assert!(body["report"]["insights"].as_str().unwrap().contains("low risk"));
}
