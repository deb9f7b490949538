//! Identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Longest identity accepted from upstream.
pub const MAX_USER_ID_LEN: usize = 128;

/// One questionnaire run. A reset issues a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(Uuid);

impl AssessmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AssessmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Caregiver identity as issued by the upstream identity provider.
///
/// Stored records are keyed by this value. Surrounding whitespace is
/// trimmed; blank or oversized values are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        if id.len() > MAX_USER_ID_LEN {
            return Err(ValidationError::invalid_format(
                "user_id",
                format!("longer than {} bytes", MAX_USER_ID_LEN),
            ));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessment_id_parses_its_own_display() {
        let id = AssessmentId::new();
        assert_eq!(id.to_string().parse::<AssessmentId>().unwrap(), id);
        assert!("not-a-uuid".parse::<AssessmentId>().is_err());
    }

    #[test]
    fn user_id_is_trimmed() {
        assert_eq!(UserId::new("  uid-9 ").unwrap().as_str(), "uid-9");
    }

    #[test]
    fn user_id_rejects_blank_and_oversized() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
        assert!(UserId::new("x".repeat(MAX_USER_ID_LEN + 1)).is_err());
        assert!(UserId::new("x".repeat(MAX_USER_ID_LEN)).is_ok());
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let id = UserId::new("uid-123").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"uid-123\"");
    }
}
