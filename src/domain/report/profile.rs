//! Read model for the caregiver's profile page.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::foundation::Timestamp;
use crate::domain::questionnaire::{tone_of, RiskTone};

use super::record::{Dataset, GraphData, HealthTest, InsightData};

/// Latest assessment as shown on the profile, or demo content for visitors.
///
/// Each section is optional because documents may predate a section or
/// carry a malformed one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub health_test: Option<HealthTest>,
    #[serde(rename = "geminiData")]
    pub insight_data: Option<InsightData>,
    pub graph_data: Option<GraphData>,
    pub last_updated: Option<Timestamp>,
    pub is_demo: bool,
}

fn section<T: DeserializeOwned>(doc: &Map<String, Value>, field: &str) -> Option<T> {
    let value = doc.get(field)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(field, error = %e, "ignoring malformed profile section");
            None
        }
    }
}

impl ProfileView {
    /// Reads the profile sections out of a stored document.
    pub fn from_document(doc: &Map<String, Value>) -> Self {
        Self {
            health_test: section(doc, "healthTest"),
            insight_data: section(doc, "geminiData"),
            graph_data: section(doc, "graphData"),
            last_updated: section(doc, "lastUpdated"),
            is_demo: false,
        }
    }

    /// Sample content shown to visitors who are not signed in.
    pub fn demo() -> Self {
        let now = Timestamp::now();
        Self {
            health_test: Some(HealthTest {
                status: "Moderate Risk (Demo)".to_string(),
                suggestions: "This is sample data. Log in and complete the assessment to see your actual results.".to_string(),
                timestamp: now,
            }),
            insight_data: Some(InsightData {
                insights: "Sample insights would appear here after completing the assessment when logged in.".to_string(),
                timestamp: now,
            }),
            graph_data: Some(GraphData {
                labels: ["Q1", "Q2", "Q3", "Q4", "Q5"].map(String::from).to_vec(),
                datasets: vec![Dataset {
                    label: "Sample Data".to_string(),
                    data: vec![40.0, 60.0, 30.0, 50.0, 75.0],
                }],
            }),
            last_updated: Some(now),
            is_demo: true,
        }
    }

    /// Colour band for the stored status, if there is one.
    pub fn status_tone(&self) -> Option<RiskTone> {
        self.health_test.as_ref().map(|t| tone_of(&t.status))
    }
}
