//! Shared fixtures for unit tests.

use crate::domain::foundation::AssessmentId;
use crate::domain::report::{chart_from, Diagnostics, InsightSource, ReportParts, RiskReport};

use super::{encode_for_display, encode_for_model, questions, Answers, QuestionKind, RiskLabel};

/// Overall-rating option matching a frequency label's severity band.
pub(crate) fn rating_for(label: &str) -> &'static str {
    match label {
        "Sometimes" => "Moderate",
        "Often" | "Always" => "High",
        _ => "Low",
    }
}

/// Answers every question: frequency questions with `label`, the overall
/// rating with the matching band, and the hours question with `hours`.
pub(crate) fn complete_answers(label: &str, hours: &str) -> Answers {
    let mut answers = Answers::new();
    for q in questions() {
        let value = match q.kind {
            QuestionKind::Numeric => hours,
            QuestionKind::Choice { options } if options.contains(&label) => label,
            QuestionKind::Choice { .. } => rating_for(label),
        };
        answers.record(q.key, value).unwrap();
    }
    answers
}

pub(crate) fn sample_report() -> RiskReport {
    let answers = complete_answers("Sometimes", "5");
    let model = encode_for_model(&answers);
    let display = encode_for_display(&answers);
    RiskReport::assemble(ReportParts {
        assessment_id: AssessmentId::new(),
        status: RiskLabel::Moderate,
        suggestions: "Take regular breaks.".to_string(),
        insights: "Insightful text.".to_string(),
        insight_source: InsightSource::Remote,
        chart: chart_from(&display),
        diagnostics: Diagnostics {
            raw_answers: answers.as_map().clone(),
            formatted_for_model: model.to_map(),
            formatted_for_display: display.to_map(),
            local_risk_calculation: RiskLabel::LowToModerate,
            remote_status: RiskLabel::Moderate,
            override_applied: false,
            score_explanation: None,
        },
    })
}
