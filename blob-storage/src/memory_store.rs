use std::collections::BTreeMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::errors::BlobStoreError;
use crate::store::{check_name, BlobResult, BlobStore};

/// Keeps blobs in process memory. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn exists(&self, name: &str) -> BlobResult<bool> {
        Ok(self.blobs.read().await.contains_key(name))
    }

    async fn list(&self) -> BlobResult<Vec<String>> {
        // BTreeMap keys are already ordered
        Ok(self.blobs.read().await.keys().cloned().collect())
    }

    async fn get(&self, name: &str) -> BlobResult<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| BlobStoreError::NotFound(name.to_string()))
    }

    async fn put(&self, name: &str, data: &[u8]) -> BlobResult<()> {
        check_name(name)?;
        self.blobs.write().await.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn delete(&self, name: &str) -> BlobResult<()> {
        self.blobs
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| BlobStoreError::NotFound(name.to_string()))
    }
}
