//! Raw answers collected during a questionnaire session.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::errors::SessionError;
use super::question::{find_question, questions, QuestionKind};

/// Read access to raw answer values by question key.
///
/// The encoder works against this trait so it stays total over any map,
/// including data that never passed through [`Answers`] validation.
pub trait RawAnswers {
    fn raw_value(&self, key: &str) -> Option<&str>;
}

impl RawAnswers for BTreeMap<String, String> {
    fn raw_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl RawAnswers for HashMap<String, String> {
    fn raw_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Validated mapping from question key to raw value.
///
/// # Invariants
///
/// - every key names a catalogue question
/// - choice answers are one of that question's options
/// - numeric answers parse as a finite, non-negative number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Answers(BTreeMap<String, String>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or re-records) the answer for `key`.
    ///
    /// Returns the previous value when the key was already answered.
    pub fn record(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>, SessionError> {
        let value = value.into();
        let value = value.trim();
        Self::validate(key, value)?;
        Ok(self.0.insert(key.to_string(), value.to_string()))
    }

    fn validate(key: &str, value: &str) -> Result<(), SessionError> {
        let question =
            find_question(key).ok_or_else(|| SessionError::UnknownQuestion(key.to_string()))?;

        if value.is_empty() {
            return Err(SessionError::invalid_answer(key, "answer cannot be empty"));
        }

        match question.kind {
            QuestionKind::Choice { options } => {
                if !options.contains(&value) {
                    return Err(SessionError::invalid_answer(
                        key,
                        format!("'{}' is not one of: {}", value, options.join(", ")),
                    ));
                }
            }
            QuestionKind::Numeric => match value.parse::<f64>() {
                Ok(hours) if hours.is_finite() && hours >= 0.0 => {}
                _ => {
                    return Err(SessionError::invalid_answer(
                        key,
                        "expected a non-negative number of hours",
                    ))
                }
            },
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True once every catalogue question has an answer.
    pub fn is_complete(&self) -> bool {
        questions().iter().all(|q| self.0.contains_key(q.key))
    }

    /// Unanswered keys in catalogue order.
    pub fn missing_keys(&self) -> Vec<String> {
        questions()
            .iter()
            .filter(|q| !self.0.contains_key(q.key))
            .map(|q| q.key.to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl RawAnswers for Answers {
    fn raw_value(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl TryFrom<BTreeMap<String, String>> for Answers {
    type Error = SessionError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut answers = Answers::new();
        for (key, value) in raw {
            answers.record(&key, value)?;
        }
        Ok(answers)
    }
}

impl From<Answers> for BTreeMap<String, String> {
    fn from(answers: Answers) -> Self {
        answers.0
    }
}
