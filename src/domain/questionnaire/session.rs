//! Questionnaire session aggregate.
//!
//! Tracks the caregiver's position in the catalogue, the answers recorded so
//! far, and the outcome of the latest submission.
//!
//! # Stale results
//!
//! Every [`QuestionnaireSession::reset`] bumps a generation counter. A
//! submission carries the generation it started under in its
//! [`SubmissionTicket`]; results delivered for an older generation are
//! dropped rather than applied to the fresh session.

use crate::domain::foundation::{AssessmentId, AssessmentStatus, StateMachine, Timestamp};
use crate::domain::report::RiskReport;

use super::answers::Answers;
use super::errors::SessionError;
use super::question::{question_count, questions, Question};

/// Proof that a submission was started, tied to one session generation.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    assessment_id: AssessmentId,
    generation: u64,
    answers: Answers,
}

impl SubmissionTicket {
    pub fn assessment_id(&self) -> AssessmentId {
        self.assessment_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Snapshot of the answers at the moment of submission.
    pub fn answers(&self) -> &Answers {
        &self.answers
    }
}

/// Whether a delivered result was applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The session was reset after the submission started.
    Stale,
}

/// Questionnaire session - one caregiver working through the catalogue.
///
/// # Invariants
///
/// - `current_index` is always within `0..question_count()`
/// - `report` is `Some` only in `Completed`
/// - `failure` is `Some` only in `Failed`
#[derive(Debug, Clone)]
pub struct QuestionnaireSession {
    id: AssessmentId,
    current_index: usize,
    answers: Answers,
    status: AssessmentStatus,
    generation: u64,
    report: Option<RiskReport>,
    failure: Option<String>,
    started_at: Timestamp,
}

impl Default for QuestionnaireSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionnaireSession {
    /// Starts a fresh session at the first question.
    pub fn new() -> Self {
        Self {
            id: AssessmentId::new(),
            current_index: 0,
            answers: Answers::new(),
            status: AssessmentStatus::InProgress,
            generation: 0,
            report: None,
            failure: None,
            started_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> AssessmentId {
        self.id
    }

    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &'static Question {
        &questions()[self.current_index]
    }

    /// One-based position and total, e.g. `(3, 20)` for "Question 3 of 20".
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, question_count())
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == question_count()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Result of the last successful submission.
    pub fn report(&self) -> Option<&RiskReport> {
        self.report.as_ref()
    }

    /// User-facing message for the last failed submission.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves to the next question; stays put on the last one.
    pub fn advance(&mut self) -> usize {
        if self.current_index + 1 < question_count() {
            self.current_index += 1;
        }
        self.current_index
    }

    /// Moves to the previous question; stays put on the first one.
    pub fn retreat(&mut self) -> usize {
        self.current_index = self.current_index.saturating_sub(1);
        self.current_index
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records or replaces the answer for `key`. Does not move the cursor.
    ///
    /// While a submission is in flight the edit is recorded but the status
    /// stays `Submitting`; the ticket's snapshot decides the result, and the
    /// edit is there for a resubmission if that one fails.
    ///
    /// # Errors
    ///
    /// - `AlreadyCompleted` once a result has been delivered
    /// - `UnknownQuestion` / `InvalidAnswer` when validation fails
    pub fn answer(&mut self, key: &str, value: impl Into<String>) -> Result<(), SessionError> {
        if self.status == AssessmentStatus::Completed {
            return Err(SessionError::AlreadyCompleted);
        }

        self.answers.record(key, value)?;
        if self.status == AssessmentStatus::Submitting {
            return Ok(());
        }
        self.failure = None;
        self.status = if self.answers.is_complete() {
            AssessmentStatus::AwaitingSubmission
        } else {
            AssessmentStatus::InProgress
        };
        Ok(())
    }

    /// Starts a submission.
    ///
    /// An incomplete answer set is rejected with a validation error and the
    /// status is left unchanged.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, SessionError> {
        match self.status {
            AssessmentStatus::Completed => return Err(SessionError::AlreadyCompleted),
            AssessmentStatus::Submitting => return Err(SessionError::SubmissionInFlight),
            _ => {}
        }

        if !self.answers.is_complete() {
            return Err(SessionError::Incomplete {
                missing: self.answers.missing_keys(),
            });
        }

        self.status = self
            .status
            .transition_to(AssessmentStatus::Submitting)
            .map_err(|_| SessionError::SubmissionInFlight)?;
        self.failure = None;

        Ok(SubmissionTicket {
            assessment_id: self.id,
            generation: self.generation,
            answers: self.answers.clone(),
        })
    }

    /// Applies a resolved report for `ticket`.
    pub fn complete(&mut self, ticket: &SubmissionTicket, report: RiskReport) -> Applied {
        if !self.accepts(ticket) {
            return Applied::Stale;
        }
        self.status = AssessmentStatus::Completed;
        self.report = Some(report);
        Applied::Applied
    }

    /// Records a failed submission for `ticket`; the user may retry manually.
    pub fn fail(&mut self, ticket: &SubmissionTicket, message: impl Into<String>) -> Applied {
        if !self.accepts(ticket) {
            return Applied::Stale;
        }
        self.status = AssessmentStatus::Failed;
        self.failure = Some(message.into());
        Applied::Applied
    }

    /// "Start new assessment": clears answers and result, back to question one.
    pub fn reset(&mut self) {
        self.id = AssessmentId::new();
        self.generation += 1;
        self.current_index = 0;
        self.answers = Answers::new();
        self.status = AssessmentStatus::InProgress;
        self.report = None;
        self.failure = None;
        self.started_at = Timestamp::now();
    }

    fn accepts(&self, ticket: &SubmissionTicket) -> bool {
        ticket.generation == self.generation && self.status == AssessmentStatus::Submitting
    }
}
