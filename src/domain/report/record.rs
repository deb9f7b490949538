//! Persisted document shape for one identity's latest assessment.
//!
//! Field names are camelCase to match the documents already held by the
//! store. The record is merged into the identity's document, so top-level
//! fields written by other features survive a save.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::foundation::Timestamp;
use crate::domain::questionnaire::Answers;

use super::risk_report::{Diagnostics, RiskReport};

/// Series name used for the response chart.
pub const CHART_DATASET_LABEL: &str = "Internet Usage Intensity (%)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthTest {
    pub status: String,
    pub suggestions: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightData {
    pub insights: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Everything written for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub health_test: HealthTest,
    #[serde(rename = "geminiData")]
    pub insight_data: InsightData,
    pub graph_data: GraphData,
    pub raw_answers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<Diagnostics>,
    pub last_updated: Timestamp,
}

impl AssessmentRecord {
    pub fn from_report(report: &RiskReport, answers: &Answers) -> Self {
        let (labels, data) = report
            .chart()
            .iter()
            .map(|point| (point.label.clone(), point.value))
            .unzip();

        Self {
            health_test: HealthTest {
                status: report.status().to_string(),
                suggestions: report.suggestions().to_string(),
                timestamp: *report.status_at(),
            },
            insight_data: InsightData {
                insights: report.insights().to_string(),
                timestamp: *report.insights_at(),
            },
            graph_data: GraphData {
                labels,
                datasets: vec![Dataset {
                    label: CHART_DATASET_LABEL.to_string(),
                    data,
                }],
            },
            raw_answers: answers.as_map().clone(),
            debug_info: Some(report.diagnostics().clone()),
            last_updated: *report.created_at(),
        }
    }

    /// Top-level fields to merge into the identity's document.
    pub fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            _ => Err(serde::ser::Error::custom("record did not serialize to an object")),
        }
    }
}
