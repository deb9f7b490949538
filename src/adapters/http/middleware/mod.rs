//! HTTP middleware and extractors.
//!
//! - `OptionalIdentity` - Extractor for the upstream-authenticated identity

mod identity;

pub use identity::{IdentityRejection, OptionalIdentity, IDENTITY_HEADER};
