//! Document Store Port - Interface for the per-identity document store.
//!
//! The store holds one JSON object per identity. Writes merge top-level
//! fields into the existing document (last writer wins per field); fields
//! not named in a write are left untouched.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::foundation::UserId;

/// A stored document: top-level field name to value.
pub type Document = Map<String, Value>;

/// Errors that can occur during document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize document: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize document: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Port for the external key-value document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Merges `fields` into the document for `key`, creating it if absent.
    async fn merge(&self, key: &UserId, fields: Document) -> Result<(), StoreError>;

    /// Loads the document for `key`.
    ///
    /// # Returns
    /// `Ok(None)` when no document exists; errors are reserved for
    /// transport or storage failures.
    async fn get(&self, key: &UserId) -> Result<Option<Document>, StoreError>;
}
