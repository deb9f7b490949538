//! The risk report produced by one completed submission.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{AssessmentId, Timestamp};
use crate::domain::questionnaire::{chart_label, DisplayFeatures, RiskLabel};

/// One bar on the results chart, on the display scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Builds chart points from display features in catalogue order.
pub fn chart_from(display: &DisplayFeatures) -> Vec<ChartPoint> {
    display
        .iter()
        .map(|entry| ChartPoint {
            label: chart_label(entry.key),
            value: entry.value,
        })
        .collect()
}

/// Where the report's insight text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    Remote,
    Fallback,
}

/// Intermediate values kept for troubleshooting a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub raw_answers: BTreeMap<String, String>,
    pub formatted_for_model: BTreeMap<String, u8>,
    pub formatted_for_display: BTreeMap<String, f64>,
    pub local_risk_calculation: RiskLabel,
    pub remote_status: RiskLabel,
    pub override_applied: bool,
    /// Classifier's explanation of its score, when one was available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_explanation: Option<String>,
}

/// Inputs for [`RiskReport::assemble`].
#[derive(Debug, Clone)]
pub struct ReportParts {
    pub assessment_id: AssessmentId,
    pub status: RiskLabel,
    pub suggestions: String,
    pub insights: String,
    pub insight_source: InsightSource,
    pub chart: Vec<ChartPoint>,
    pub diagnostics: Diagnostics,
}

/// Authoritative assessment result.
///
/// Immutable once assembled; a new submission produces a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    assessment_id: AssessmentId,
    status: RiskLabel,
    suggestions: String,
    insights: String,
    insight_source: InsightSource,
    chart: Vec<ChartPoint>,
    status_at: Timestamp,
    insights_at: Timestamp,
    created_at: Timestamp,
    diagnostics: Diagnostics,
}

impl RiskReport {
    /// Assembles a report, stamping every part with the current time.
    pub fn assemble(parts: ReportParts) -> Self {
        let now = Timestamp::now();
        Self {
            assessment_id: parts.assessment_id,
            status: parts.status,
            suggestions: parts.suggestions,
            insights: parts.insights,
            insight_source: parts.insight_source,
            chart: parts.chart,
            status_at: now,
            insights_at: now,
            created_at: now,
            diagnostics: parts.diagnostics,
        }
    }

    pub fn assessment_id(&self) -> AssessmentId {
        self.assessment_id
    }

    pub fn status(&self) -> RiskLabel {
        self.status
    }

    pub fn suggestions(&self) -> &str {
        &self.suggestions
    }

    pub fn insights(&self) -> &str {
        &self.insights
    }

    pub fn insight_source(&self) -> InsightSource {
        self.insight_source
    }

    pub fn chart(&self) -> &[ChartPoint] {
        &self.chart
    }

    pub fn status_at(&self) -> &Timestamp {
        &self.status_at
    }

    pub fn insights_at(&self) -> &Timestamp {
        &self.insights_at
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// Turns generator markdown into plain text: bold markers are dropped and
/// `*` bullets become `•` lines.
pub fn format_insights_for_display(text: &str) -> String {
    text.replace("**", "").replace('*', "\n• ")
}
