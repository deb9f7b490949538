//! Questionnaire domain module.
//!
//! The fixed question catalogue, answer collection, encoding of answers onto
//! the model and display scales, and the local risk estimator.

mod answers;
mod encoder;
mod errors;
mod question;
mod risk;
mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use answers::{Answers, RawAnswers};
pub use encoder::{
    encode_for_display, encode_for_model, hours_to_percent, hours_to_severity, percent_of,
    severity_of, DisplayFeatures, EncodedFeatures, FeatureEntry, ModelFeatures,
    DISPLAY_MAX_HOURS, MODEL_SCALE_MAX,
};
pub use errors::{SessionError, INCOMPLETE_MESSAGE};
pub use question::{
    chart_label, find_question, position_of, question_count, questions, Question, QuestionKind,
    FREQUENCY_OPTIONS, KEY_PREFIX, QUESTIONS, RATING_OPTIONS,
};
pub use risk::{
    estimate, mean_severity, score_explanation, tone_of, RiskLabel, RiskTone, UnknownRiskLabel,
};
pub use session::{Applied, QuestionnaireSession, SubmissionTicket};
