//! Identity extraction.
//!
//! Authentication happens upstream (gateway or identity provider); by the
//! time a request reaches this service the authenticated identity, if any,
//! is carried in the `x-user-id` header.
//!
//! # Example
//!
//! ```ignore
//! async fn my_handler(OptionalIdentity(user): OptionalIdentity) -> impl IntoResponse {
//!     match user {
//!         Some(id) => format!("Hello, {}!", id),
//!         None => "Hello, guest!".to_string(),
//!     }
//! }
//! ```

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{UserId, MAX_USER_ID_LEN};

/// Header carrying the upstream-authenticated identity.
pub const IDENTITY_HEADER: &str = "x-user-id";

/// Extractor for an optional identity.
///
/// A missing or blank header means the caller is a visitor. A header that
/// is present but unusable (not UTF-8, or longer than [`MAX_USER_ID_LEN`])
/// is rejected rather than downgraded to a visitor.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<UserId>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(IDENTITY_HEADER) else {
            return Ok(OptionalIdentity(None));
        };
        let value = raw.to_str().map_err(|_| IdentityRejection::NotUtf8)?;
        if value.trim().is_empty() {
            return Ok(OptionalIdentity(None));
        }
        UserId::new(value)
            .map(|id| OptionalIdentity(Some(id)))
            .map_err(|_| IdentityRejection::TooLong)
    }
}

/// Rejection for an identity header that cannot name a caregiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRejection {
    NotUtf8,
    TooLong,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let message = match self {
            IdentityRejection::NotUtf8 => "Identity header is not valid UTF-8".to_string(),
            IdentityRejection::TooLong => {
                format!("Identity header exceeds {} bytes", MAX_USER_ID_LEN)
            }
        };

        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "code": "INVALID_IDENTITY",
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    async fn extract_value(header: Option<HeaderValue>) -> Result<Option<UserId>, IdentityRejection> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(IDENTITY_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        OptionalIdentity::from_request_parts(&mut parts, &())
            .await
            .map(|identity| identity.0)
    }

    async fn extract(header: Option<&str>) -> Result<Option<UserId>, IdentityRejection> {
        extract_value(header.map(|h| HeaderValue::from_str(h).unwrap())).await
    }

    #[tokio::test]
    async fn reads_identity_header() {
        assert_eq!(
            extract(Some("parent-1")).await,
            Ok(Some(UserId::new("parent-1").unwrap()))
        );
    }

    #[tokio::test]
    async fn missing_or_blank_header_is_visitor() {
        assert_eq!(extract(None).await, Ok(None));
        assert_eq!(extract(Some("   ")).await, Ok(None));
    }

    #[tokio::test]
    async fn oversized_header_is_rejected() {
        let long = "p".repeat(MAX_USER_ID_LEN + 1);
        assert_eq!(extract(Some(&long)).await, Err(IdentityRejection::TooLong));
        assert_eq!(
            IdentityRejection::TooLong.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn non_utf8_header_is_rejected() {
        let opaque = HeaderValue::from_bytes(&[0x70, 0xFF, 0x71]).unwrap();
        assert_eq!(extract_value(Some(opaque)).await, Err(IdentityRejection::NotUtf8));
    }
}
