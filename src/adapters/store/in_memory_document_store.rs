//! In-Memory Document Store Adapter
//!
//! Keeps one JSON object per identity in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{Document, DocumentStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<UserId, Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document directly, bypassing merge.
    pub async fn insert(&self, key: UserId, document: Document) {
        self.documents.write().await.insert(key, document);
    }

    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn merge(&self, key: &UserId, fields: Document) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        documents.entry(key.clone()).or_default().extend(fields);
        Ok(())
    }

    async fn get(&self, key: &UserId) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_identity() {
        let store = InMemoryDocumentStore::new();
        let result = store.get(&UserId::new("nobody").unwrap()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn merge_preserves_unrelated_fields() {
        let store = InMemoryDocumentStore::new();
        let user = UserId::new("parent-1").unwrap();

        store
            .merge(&user, fields(json!({"displayName": "Sam", "healthTest": {"status": "old"}})))
            .await
            .unwrap();
        store
            .merge(&user, fields(json!({"healthTest": {"status": "new"}})))
            .await
            .unwrap();

        let doc = store.get(&user).await.unwrap().unwrap();
        assert_eq!(doc["displayName"], "Sam");
        assert_eq!(doc["healthTest"]["status"], "new");
        assert_eq!(store.document_count().await, 1);
    }
}
