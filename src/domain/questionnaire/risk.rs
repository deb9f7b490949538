//! Risk labels and the local risk estimator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::encoder::ModelFeatures;

/// Ordered risk categories, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Low to Moderate Risk")]
    LowToModerate,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Severe Risk")]
    Severe,
}

/// Colour band a label falls into when shown to the caregiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTone {
    Favourable,
    Caution,
    Alert,
}

impl RiskLabel {
    pub const ALL: [RiskLabel; 5] = [
        RiskLabel::Low,
        RiskLabel::LowToModerate,
        RiskLabel::Moderate,
        RiskLabel::High,
        RiskLabel::Severe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low Risk",
            RiskLabel::LowToModerate => "Low to Moderate Risk",
            RiskLabel::Moderate => "Moderate Risk",
            RiskLabel::High => "High Risk",
            RiskLabel::Severe => "Severe Risk",
        }
    }

    /// Maps the classifier's integer score (0..=5) to a label.
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            0 | 1 => Some(RiskLabel::Low),
            2 => Some(RiskLabel::LowToModerate),
            3 => Some(RiskLabel::Moderate),
            4 => Some(RiskLabel::High),
            5 => Some(RiskLabel::Severe),
            _ => None,
        }
    }

    pub fn tone(&self) -> RiskTone {
        tone_of(self.as_str())
    }
}

/// Tone for an arbitrary status string, so stored or demo statuses can be banded too.
pub fn tone_of(status: &str) -> RiskTone {
    if status.contains("Low") {
        RiskTone::Favourable
    } else if status.contains("Moderate") {
        RiskTone::Caution
    } else {
        RiskTone::Alert
    }
}

/// Canonical explanation for a classifier score.
pub fn score_explanation(score: u8) -> &'static str {
    match score {
        0 => "Excellent digital well-being. No signs of internet overuse.",
        1 => "Minor internet dependency. Mostly healthy usage.",
        2 => "Slight concerns over internet use. Some areas need improvement.",
        3 => "Moderate internet dependency. Certain areas of life could be impacted.",
        4 => "High internet dependency. Likely affecting daily activities.",
        5 => "Severe internet dependency. Strongly affecting daily life and well-being.",
        _ => "Unknown dependency level.",
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is not one of the five labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised risk label: {0}")]
pub struct UnknownRiskLabel(pub String);

impl FromStr for RiskLabel {
    type Err = UnknownRiskLabel;

    /// Case-sensitive, like the serde renames; only surrounding whitespace
    /// is forgiven.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RiskLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == trimmed)
            .ok_or_else(|| UnknownRiskLabel(s.to_string()))
    }
}

/// Arithmetic mean of the model-scale values; 0 for an empty vector.
pub fn mean_severity(features: &ModelFeatures) -> f64 {
    if features.is_empty() {
        return 0.0;
    }
    let total: u32 = features.iter().map(|e| u32::from(e.value)).sum();
    f64::from(total) / features.len() as f64
}

/// Local, deterministic risk estimate from model-scale features.
///
/// Never calls a collaborator; the result is only used to escalate a
/// remote "Low Risk" verdict.
pub fn estimate(features: &ModelFeatures) -> RiskLabel {
    let mean = mean_severity(features);
    if mean <= 1.0 {
        RiskLabel::Low
    } else if mean <= 2.0 {
        RiskLabel::LowToModerate
    } else if mean <= 3.0 {
        RiskLabel::Moderate
    } else if mean <= 3.5 {
        RiskLabel::High
    } else {
        RiskLabel::Severe
    }
}
