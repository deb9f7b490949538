//! The fixed question catalogue.
//!
//! Questions are static data defined once for the whole process. The
//! catalogue order is significant: encoded feature vectors, classifier
//! requests and chart series all follow it.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Options offered for the five-point frequency questions.
pub const FREQUENCY_OPTIONS: &[&str] = &["Never", "Rarely", "Sometimes", "Often", "Always"];

/// Options offered for the overall dependency rating.
pub const RATING_OPTIONS: &[&str] = &["Low", "Moderate", "High"];

/// Prefix carried by every question key; stripped for chart labels.
pub const KEY_PREFIX: &str = "PCIAT_";

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QuestionKind {
    /// One label from a fixed, ordered option list.
    Choice { options: &'static [&'static str] },
    /// A non-negative number (hours per day).
    Numeric,
}

/// Immutable question definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    const fn frequency(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt,
            kind: QuestionKind::Choice {
                options: FREQUENCY_OPTIONS,
            },
        }
    }

    /// Options for choice questions; `None` for numeric ones.
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            QuestionKind::Choice { options } => Some(options),
            QuestionKind::Numeric => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, QuestionKind::Numeric)
    }

    /// Label used on the results chart (`PCIAT_05` renders as `Q05`).
    pub fn chart_label(&self) -> String {
        chart_label(self.key)
    }
}

/// Every question, in presentation order.
pub const QUESTIONS: [Question; 20] = [
    Question::frequency(
        "PCIAT_01",
        "How often does your child find themselves unable to control their internet usage?",
    ),
    Question::frequency(
        "PCIAT_02",
        "Does your child spend more time online than originally intended?",
    ),
    Question::frequency(
        "PCIAT_03",
        "Do others complain about the amount of time your child spends online?",
    ),
    Question::frequency(
        "PCIAT_04",
        "Does your child neglect their personal responsibilities due to internet use?",
    ),
    Question::frequency(
        "PCIAT_05",
        "How often does your child feel anxious or restless when unable to use the internet?",
    ),
    Question::frequency(
        "PCIAT_06",
        "Does your child try to reduce their internet usage but fail?",
    ),
    Question::frequency(
        "PCIAT_07",
        "Does your child feel depressed or moody when offline?",
    ),
    Question::frequency(
        "PCIAT_09",
        "Does your child feel guilty about the amount of time they spend online?",
    ),
    Question::frequency(
        "PCIAT_10",
        "Has your child's internet usage negatively impacted their sleep quality?",
    ),
    Question::frequency(
        "PCIAT_11",
        "Does your child avoid social activities because of internet use?",
    ),
    Question::frequency(
        "PCIAT_13",
        "Does your child use the internet to escape from negative feelings or problems?",
    ),
    Question::frequency(
        "PCIAT_14",
        "Does your child experience stress or anxiety when thinking about reducing internet use?",
    ),
    Question::frequency(
        "PCIAT_15",
        "Does your child frequently think about when they'll go online next?",
    ),
    Question::frequency(
        "PCIAT_16",
        "Does your child find themselves lying to others about their internet use?",
    ),
    Question::frequency(
        "PCIAT_17",
        "Does your child lose track of time while browsing the internet?",
    ),
    Question::frequency(
        "PCIAT_18",
        "Does your child prioritize internet activities over other important tasks?",
    ),
    Question::frequency(
        "PCIAT_19",
        "Does your child feel withdrawal symptoms when unable to access the internet?",
    ),
    Question::frequency(
        "PCIAT_20",
        "Does your child experience physical discomfort (e.g., eye strain, headaches) from excessive internet use?",
    ),
    Question {
        key: "PCIAT_Total",
        prompt: "Overall, how would you rate your child's internet dependency?",
        kind: QuestionKind::Choice {
            options: RATING_OPTIONS,
        },
    },
    Question {
        key: "PCIAT_22",
        prompt: "How many hours per day does your child spend on the internet?",
        kind: QuestionKind::Numeric,
    },
];

static POSITIONS: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    QUESTIONS
        .iter()
        .enumerate()
        .map(|(idx, q)| (q.key, idx))
        .collect()
});

/// The catalogue as a slice.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

/// Number of questions in the catalogue.
pub fn question_count() -> usize {
    QUESTIONS.len()
}

/// Looks up a question by key.
pub fn find_question(key: &str) -> Option<&'static Question> {
    POSITIONS.get(key).map(|&idx| &QUESTIONS[idx])
}

/// Position of a key in catalogue order.
pub fn position_of(key: &str) -> Option<usize> {
    POSITIONS.get(key).copied()
}

/// Display label for a key: the internal prefix is replaced with `Q`.
pub fn chart_label(key: &str) -> String {
    match key.strip_prefix(KEY_PREFIX) {
        Some(rest) => format!("Q{}", rest),
        None => key.to_string(),
    }
}
