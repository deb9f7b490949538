//! Primitives shared by the questionnaire and report modules: ids,
//! timestamps, the session lifecycle and the error vocabulary.

mod assessment_status;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use assessment_status::AssessmentStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AssessmentId, UserId, MAX_USER_ID_LEN};
pub use state_machine::{StateMachine, TransitionError};
pub use timestamp::Timestamp;
