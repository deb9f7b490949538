//! File-based Document Store Adapter
//!
//! Stores one JSON document per identity under a base directory. Merges
//! read the current document, overlay the new top-level fields and write
//! the result back through a temporary file.

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::foundation::UserId;
use crate::ports::{Document, DocumentStore, StoreError};

#[derive(Debug)]
pub struct FileDocumentStore {
    base_path: PathBuf,
    /// Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileDocumentStore {
    /// # Example
    /// ```ignore
    /// let store = FileDocumentStore::new("./data/users");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn document_path(&self, key: &UserId) -> PathBuf {
        self.base_path.join(format!("{}.json", file_stem(key)))
    }

    async fn read(&self, path: &Path) -> Result<Option<Document>, StoreError> {
        if !fs::try_exists(path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?
        {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        match serde_json::from_str::<Value>(&contents)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?
        {
            Value::Object(doc) => Ok(Some(doc)),
            _ => Err(StoreError::DeserializationFailed(format!(
                "{} does not hold a JSON object",
                path.display()
            ))),
        }
    }
}

/// Longest stem written verbatim; `.json.tmp` must still fit in a 255-byte name.
const MAX_STEM_LEN: usize = 200;

/// Escaped characters kept in front of the digest for long identities.
const DIGEST_PREFIX_LEN: usize = 64;

/// Identities become file names; anything outside `[A-Za-z0-9_-]` is hex-escaped.
///
/// Escaping can triple the length of non-ASCII identities, so an escaped
/// stem over [`MAX_STEM_LEN`] becomes `<prefix>~<sha256>`. `~` never occurs
/// in an escaped stem, so the two forms cannot collide.
fn file_stem(key: &UserId) -> String {
    let escaped: String = key
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_string()
            } else {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect();

    if escaped.len() <= MAX_STEM_LEN {
        return escaped;
    }
    // Escaped output is ASCII, so any byte index is a char boundary.
    format!(
        "{}~{:x}",
        &escaped[..DIGEST_PREFIX_LEN],
        Sha256::digest(key.as_str().as_bytes())
    )
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn merge(&self, key: &UserId, fields: Document) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        let path = self.document_path(key);
        let mut doc = self.read(&path).await?.unwrap_or_default();
        doc.extend(fields);

        let json = serde_json::to_string_pretty(&Value::Object(doc))
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        debug!(path = %path.display(), "document merged");
        Ok(())
    }

    async fn get(&self, key: &UserId) -> Result<Option<Document>, StoreError> {
        self.read(&self.document_path(key)).await
    }
}
