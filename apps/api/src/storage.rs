//! Blob storage for uploaded files — pluggable, trait-based.
//!
//! `AppState` holds an `Arc<dyn FileStore>`, built at startup. The production
//! backend is S3-compatible object storage (MinIO locally, AWS in
//! production); tests run against `MemoryFileStore`.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use crate::errors::AppError;

/// Existence check, save, and remove for binary blobs addressed by key.
///
/// Implement this to swap storage backends without touching handler code.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, AppError>;
    async fn save(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// S3-backed file store.
pub struct S3FileStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3FileStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl FileStore for S3FileStore {
    async fn exists(&self, key: &str) -> Result<bool, AppError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(AppError::Storage(format!("head {key}: {err}")))
                }
            }
        }
    }

    async fn save(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("put {key}: {e}")))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("delete {key}: {e}")))?;
        Ok(())
    }
}

/// In-memory file store backing unit tests.
#[cfg(test)]
pub struct MemoryFileStore {
    blobs: std::sync::Mutex<std::collections::HashMap<String, Bytes>>,
}

#[cfg(test)]
impl MemoryFileStore {
    pub fn new() -> Self {
        Self {
            blobs: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    pub fn insert(&self, key: &str, bytes: Bytes) {
        self.blobs.lock().unwrap().insert(key.to_string(), bytes);
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.blobs.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
#[async_trait]
impl FileStore for MemoryFileStore {
    async fn exists(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.blobs.lock().unwrap().contains_key(key))
    }

    async fn save(&self, key: &str, bytes: Bytes, _content_type: &str) -> Result<(), AppError> {
        self.blobs.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.blobs
            .lock()
            .unwrap()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| AppError::Storage(format!("remove {key}: no such blob")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_exists() {
        let store = MemoryFileStore::new();
        store
            .save("avatars/a/b.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();
        assert!(store.exists("avatars/a/b.png").await.unwrap());
        assert!(!store.exists("avatars/a/c.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_deletes_blob() {
        let store = MemoryFileStore::new();
        store.insert("k", Bytes::from_static(b"x"));
        store.remove("k").await.unwrap();
        assert!(!store.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_missing_blob_errors() {
        let store = MemoryFileStore::new();
        assert!(store.remove("missing").await.is_err());
    }
}
