//! Answer encoding onto the model and display scales.
//!
//! Both encoders are total: every catalogue question yields exactly one
//! entry, in catalogue order, whatever the raw map contains. Missing or
//! unrecognised answers encode to the minimum value.
//!
//! - Model scale: ordinal severity in `0..=4`, the classifier's input.
//! - Display scale: percentage in `0.0..=100.0`, used for charting.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use tracing::debug;

use super::answers::RawAnswers;
use super::question::questions;

/// Highest value on the model scale.
pub const MODEL_SCALE_MAX: u8 = 4;

/// Daily hours treated as 100% on the display scale.
pub const DISPLAY_MAX_HOURS: f64 = 12.0;

/// Categorical label → model severity.
const SEVERITY_TABLE: &[(&str, u8)] = &[
    ("Never", 0),
    ("Rarely", 1),
    ("Sometimes", 2),
    ("Often", 3),
    ("Always", 4),
    ("Low", 0),
    ("Moderate", 2),
    ("High", 4),
];

/// Categorical label → display percentage.
const PERCENT_TABLE: &[(&str, f64)] = &[
    ("Never", 0.0),
    ("Rarely", 25.0),
    ("Sometimes", 50.0),
    ("Often", 75.0),
    ("Always", 100.0),
    ("Low", 0.0),
    ("Moderate", 50.0),
    ("High", 100.0),
];

/// Upper bounds (inclusive) for the hour buckets 0..=3; anything above is 4.
const HOUR_BUCKETS: [f64; 4] = [2.0, 4.0, 6.0, 8.0];

/// One encoded value, tagged with its question key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureEntry<V> {
    pub key: &'static str,
    pub value: V,
}

/// Full-length encoded vector in catalogue order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatures<V> {
    entries: Vec<FeatureEntry<V>>,
}

/// Classifier input: severity per question.
pub type ModelFeatures = EncodedFeatures<u8>;

/// Chart input: percentage per question.
pub type DisplayFeatures = EncodedFeatures<f64>;

impl<V: Copy> EncodedFeatures<V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureEntry<V>> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    /// Values in catalogue order.
    pub fn values(&self) -> Vec<V> {
        self.entries.iter().map(|e| e.value).collect()
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    /// Keyed copy for persistence and diagnostics.
    pub fn to_map(&self) -> BTreeMap<String, V> {
        self.entries
            .iter()
            .map(|e| (e.key.to_string(), e.value))
            .collect()
    }
}

impl<V: Serialize> Serialize for EncodedFeatures<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.key, &entry.value)?;
        }
        map.end()
    }
}

/// A raw value is numeric when it parses as a finite number.
fn parse_hours(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|h| h.is_finite())
}

fn lookup<V: Copy>(table: &[(&str, V)], label: &str) -> Option<V> {
    table.iter().find(|(l, _)| *l == label).map(|(_, v)| *v)
}

/// Buckets daily hours onto the model scale.
pub fn hours_to_severity(hours: f64) -> u8 {
    HOUR_BUCKETS
        .iter()
        .position(|&upper| hours <= upper)
        .map(|idx| idx as u8)
        .unwrap_or(MODEL_SCALE_MAX)
}

/// Scales daily hours against [`DISPLAY_MAX_HOURS`], clamped to `0..=100`.
pub fn hours_to_percent(hours: f64) -> f64 {
    (hours / DISPLAY_MAX_HOURS * 100.0).clamp(0.0, 100.0)
}

/// Model-scale value for a single raw answer.
pub fn severity_of(key: &str, raw: Option<&str>) -> u8 {
    let Some(raw) = raw else { return 0 };
    if let Some(hours) = parse_hours(raw) {
        return hours_to_severity(hours);
    }
    lookup(SEVERITY_TABLE, raw.trim()).unwrap_or_else(|| {
        debug!(key, label = raw, "unmapped answer label encoded as 0");
        0
    })
}

/// Display-scale value for a single raw answer.
pub fn percent_of(key: &str, raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    if let Some(hours) = parse_hours(raw) {
        return hours_to_percent(hours);
    }
    lookup(PERCENT_TABLE, raw.trim()).unwrap_or_else(|| {
        debug!(key, label = raw, "unmapped answer label encoded as 0%");
        0.0
    })
}

fn encode_with<A, V>(answers: &A, encode: impl Fn(&str, Option<&str>) -> V) -> EncodedFeatures<V>
where
    A: RawAnswers + ?Sized,
{
    let entries = questions()
        .iter()
        .map(|q| FeatureEntry {
            key: q.key,
            value: encode(q.key, answers.raw_value(q.key)),
        })
        .collect();
    EncodedFeatures { entries }
}

/// Encodes answers onto the model (severity) scale.
pub fn encode_for_model<A: RawAnswers + ?Sized>(answers: &A) -> ModelFeatures {
    encode_with(answers, severity_of)
}

/// Encodes answers onto the display (percentage) scale.
pub fn encode_for_display<A: RawAnswers + ?Sized>(answers: &A) -> DisplayFeatures {
    encode_with(answers, percent_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::question::question_count;
    use proptest::prelude::*;

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_answers_encode_to_full_zero_vectors() {
        let empty: BTreeMap<String, String> = BTreeMap::new();
        let model = encode_for_model(&empty);
        let display = encode_for_display(&empty);

        assert_eq!(model.len(), question_count());
        assert_eq!(display.len(), question_count());
        assert!(model.values().iter().all(|&v| v == 0));
        assert!(display.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn output_follows_catalogue_order() {
        let answers = raw(&[("PCIAT_22", "3"), ("PCIAT_01", "Often")]);
        let keys: Vec<_> = encode_for_model(&answers).keys().collect();
        let expected: Vec<_> = questions().iter().map(|q| q.key).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn categorical_labels_use_severity_table() {
        assert_eq!(severity_of("k", Some("Never")), 0);
        assert_eq!(severity_of("k", Some("Rarely")), 1);
        assert_eq!(severity_of("k", Some("Sometimes")), 2);
        assert_eq!(severity_of("k", Some("Often")), 3);
        assert_eq!(severity_of("k", Some("Always")), 4);
        assert_eq!(severity_of("k", Some("Low")), 0);
        assert_eq!(severity_of("k", Some("Moderate")), 2);
        assert_eq!(severity_of("k", Some("High")), 4);
    }

    #[test]
    fn categorical_labels_use_percent_table() {
        assert_eq!(percent_of("k", Some("Rarely")), 25.0);
        assert_eq!(percent_of("k", Some("Often")), 75.0);
        assert_eq!(percent_of("k", Some("Moderate")), 50.0);
        assert_eq!(percent_of("k", Some("High")), 100.0);
    }

    #[test]
    fn unknown_labels_encode_to_zero() {
        assert_eq!(severity_of("k", Some("Occasionally")), 0);
        assert_eq!(percent_of("k", Some("Occasionally")), 0.0);
        assert_eq!(severity_of("k", Some("")), 0);
    }

    #[test]
    fn hour_buckets_match_thresholds() {
        assert_eq!(hours_to_severity(0.0), 0);
        assert_eq!(hours_to_severity(2.0), 0);
        assert_eq!(hours_to_severity(2.5), 1);
        assert_eq!(hours_to_severity(4.0), 1);
        assert_eq!(hours_to_severity(6.0), 2);
        assert_eq!(hours_to_severity(8.0), 3);
        assert_eq!(hours_to_severity(8.01), 4);
        assert_eq!(hours_to_severity(10.0), 4);
    }

    #[test]
    fn hours_scale_against_twelve_and_clamp() {
        assert_eq!(hours_to_percent(6.0), 50.0);
        assert_eq!(hours_to_percent(12.0), 100.0);
        assert_eq!(hours_to_percent(20.0), 100.0);
        assert_eq!(hours_to_percent(-3.0), 0.0);
    }

    #[test]
    fn hours_answer_is_bucketed_and_scaled() {
        let answers = raw(&[("PCIAT_22", "10")]);
        assert_eq!(encode_for_model(&answers).get("PCIAT_22"), Some(4));
        let pct = encode_for_display(&answers).get("PCIAT_22").unwrap();
        assert!((pct - 83.333).abs() < 0.01);
    }

    #[test]
    fn keys_outside_catalogue_are_ignored() {
        let answers = raw(&[("PCIAT_08", "Always"), ("PCIAT_01", "Always")]);
        let model = encode_for_model(&answers);
        assert_eq!(model.len(), question_count());
        assert_eq!(model.get("PCIAT_08"), None);
        assert_eq!(model.get("PCIAT_01"), Some(4));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let answers = raw(&[("PCIAT_01", "Often")]);
        let json = serde_json::to_string(&encode_for_model(&answers)).unwrap();
        assert!(json.starts_with(r#"{"PCIAT_01":3,"PCIAT_02":0"#));
    }

    fn answer_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
        let keys: Vec<String> = questions()
            .iter()
            .map(|q| q.key.to_string())
            .chain(["PCIAT_99".to_string()])
            .collect();
        let values = prop_oneof![
            Just("Never".to_string()),
            Just("Always".to_string()),
            Just("Moderate".to_string()),
            Just("bogus".to_string()),
            (0.0f64..30.0).prop_map(|h| format!("{:.2}", h)),
        ];
        prop::collection::btree_map(prop::sample::select(keys), values, 0..25)
    }

    proptest! {
        #[test]
        fn encoders_are_total_and_bounded(answers in answer_strategy()) {
            let model = encode_for_model(&answers);
            let display = encode_for_display(&answers);
            prop_assert_eq!(model.len(), question_count());
            prop_assert_eq!(display.len(), question_count());
            prop_assert!(model.values().iter().all(|&v| v <= MODEL_SCALE_MAX));
            prop_assert!(display.values().iter().all(|&v| (0.0..=100.0).contains(&v)));
        }

        #[test]
        fn encoding_is_idempotent(answers in answer_strategy()) {
            prop_assert_eq!(encode_for_model(&answers), encode_for_model(&answers));
            prop_assert_eq!(encode_for_display(&answers), encode_for_display(&answers));
        }

        #[test]
        fn more_hours_never_lower_the_encoding(a in 0.0f64..48.0, b in 0.0f64..48.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(hours_to_severity(lo) <= hours_to_severity(hi));
            prop_assert!(hours_to_percent(lo) <= hours_to_percent(hi));
        }
    }
}
