//! HTTP DTOs for assessment endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::SaveStatus;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::questionnaire::{Question, RiskLabel, RiskTone};
use crate::domain::report::{format_insights_for_display, ChartPoint, InsightSource, ProfileView, RiskReport};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// An answer as sent by the client; the hours question may arrive as a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(f64),
}

impl AnswerValue {
    pub fn into_raw(self) -> String {
        match self {
            AnswerValue::Text(s) => s,
            AnswerValue::Number(n) => n.to_string(),
        }
    }
}

/// Request to submit a complete answer set.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub answers: BTreeMap<String, AnswerValue>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct QuestionCatalogueResponse {
    pub count: usize,
    pub questions: &'static [Question],
}

/// Report as shown on the result screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub assessment_id: String,
    pub status: RiskLabel,
    pub status_tone: RiskTone,
    pub suggestions: String,
    pub insights: String,
    /// Insights with markdown emphasis removed and bullets expanded.
    pub insights_display: String,
    pub insight_source: InsightSource,
    pub chart: Vec<ChartPoint>,
    pub created_at: Timestamp,
}

impl From<&RiskReport> for ReportResponse {
    fn from(report: &RiskReport) -> Self {
        Self {
            assessment_id: report.assessment_id().to_string(),
            status: report.status(),
            status_tone: report.status().tone(),
            suggestions: report.suggestions().to_string(),
            insights: report.insights().to_string(),
            insights_display: format_insights_for_display(report.insights()),
            insight_source: report.insight_source(),
            chart: report.chart().to_vec(),
            created_at: *report.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAssessmentResponse {
    pub report: ReportResponse,
    pub saved: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_error: Option<String>,
}

impl SubmitAssessmentResponse {
    pub fn new(report: &RiskReport, save: SaveStatus) -> Self {
        let saved = save.is_saved();
        let (message, save_error) = match save {
            SaveStatus::Saved => ("Your results have been saved to your profile.", None),
            SaveStatus::LoginRequired => ("Log in to save your results to your profile.", None),
            SaveStatus::Failed(e) => (
                "Your results could not be saved. They are shown here but will not appear on your profile.",
                Some(e),
            ),
        };
        Self {
            report: report.into(),
            saved,
            message: message.to_string(),
            save_error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: ProfileView,
    pub status_tone: Option<RiskTone>,
}

impl From<ProfileView> for ProfileResponse {
    fn from(profile: ProfileView) -> Self {
        let status_tone = profile.status_tone();
        Self {
            profile,
            status_tone,
        }
    }
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = (!err.details.is_empty())
            .then(|| serde_json::to_value(&err.details).ok())
            .flatten();
        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}
