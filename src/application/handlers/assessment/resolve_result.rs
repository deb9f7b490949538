//! ResultResolver - Turns a complete answer set into a risk report.
//!
//! Sequence: encode → local estimate → remote classifier → override →
//! remote insights (with local fallback) → assemble. The insight call needs
//! the effective status, so the two remote calls are never issued in
//! parallel.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::foundation::AssessmentId;
use crate::domain::questionnaire::{
    encode_for_display, encode_for_model, estimate, score_explanation, Answers, RiskLabel,
};
use crate::domain::report::{chart_from, Diagnostics, InsightSource, ReportParts, RiskReport};
use crate::ports::{ClassifierError, InsightGenerator, RiskClassifier};

/// Used when the classifier sends no suggestions.
pub const DEFAULT_SUGGESTIONS: &str = "We recommend establishing healthy online boundaries.";

/// Used when the insight generator answers with empty text.
pub const DEFAULT_INSIGHTS: &str =
    "Based on the assessment, we recommend monitoring internet usage patterns.";

/// Errors that abort a resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("answers are incomplete ({} missing)", .missing.len())]
    Incomplete { missing: Vec<String> },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Effective status after the safety-net override.
///
/// The local estimate only replaces a remote "Low Risk"; it never lowers
/// a remote verdict. Returns whether the override fired.
pub fn effective_status(remote: RiskLabel, local: RiskLabel) -> (RiskLabel, bool) {
    if remote == RiskLabel::Low && local != RiskLabel::Low {
        (local, true)
    } else {
        (remote, false)
    }
}

/// Deterministic insight text used when the generator fails.
pub fn fallback_insights(status: RiskLabel) -> String {
    format!(
        "Based on the assessment, your child shows {} signs of internet dependency. \
         We recommend establishing healthy online boundaries and screen-free times.",
        status.as_str().to_lowercase()
    )
}

pub struct ResultResolver {
    classifier: Arc<dyn RiskClassifier>,
    insights: Arc<dyn InsightGenerator>,
}

impl ResultResolver {
    pub fn new(classifier: Arc<dyn RiskClassifier>, insights: Arc<dyn InsightGenerator>) -> Self {
        Self {
            classifier,
            insights,
        }
    }

    #[instrument(skip(self, answers), fields(assessment_id = %assessment_id))]
    pub async fn resolve(
        &self,
        assessment_id: AssessmentId,
        answers: &Answers,
    ) -> Result<RiskReport, ResolveError> {
        if !answers.is_complete() {
            return Err(ResolveError::Incomplete {
                missing: answers.missing_keys(),
            });
        }

        let model = encode_for_model(answers);
        let display = encode_for_display(answers);
        let local = estimate(&model);
        debug!(local = %local, "local estimate computed");

        let classification = self.classifier.classify(&model).await.map_err(|e| {
            warn!(error = %e, "classifier failed; submission aborted");
            ResolveError::from(e)
        })?;

        let (status, override_applied) = effective_status(classification.status, local);
        let explanation = classification
            .explanation
            .or_else(|| classification.score.map(|s| score_explanation(s).to_string()));
        if override_applied {
            info!(remote = %classification.status, local = %local, "remote low verdict escalated by local estimate");
        }

        let (insights, insight_source) = match self.insights.generate(&model, status).await {
            Ok(text) if !text.trim().is_empty() => (text, InsightSource::Remote),
            Ok(_) => (DEFAULT_INSIGHTS.to_string(), InsightSource::Fallback),
            Err(e) => {
                warn!(error = %e, "insight generator failed; using fallback text");
                (fallback_insights(status), InsightSource::Fallback)
            }
        };

        let report = RiskReport::assemble(ReportParts {
            assessment_id,
            status,
            suggestions: classification
                .suggestions
                .unwrap_or_else(|| DEFAULT_SUGGESTIONS.to_string()),
            insights,
            insight_source,
            chart: chart_from(&display),
            diagnostics: Diagnostics {
                raw_answers: answers.as_map().clone(),
                formatted_for_model: model.to_map(),
                formatted_for_display: display.to_map(),
                local_risk_calculation: local,
                remote_status: classification.status,
                override_applied,
                score_explanation: explanation,
            },
        });

        info!(status = %report.status(), ?insight_source, "assessment resolved");
        Ok(report)
    }
}
