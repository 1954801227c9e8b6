use std::sync::Arc;
use async_trait::async_trait;
use crate::errors::BlobStoreError;
use crate::local_store::LocalFileBlobStore;
use crate::memory_store::MemoryBlobStore;
use crate::object_blob_store::ObjectBlobStore;


pub type BlobResult<T> = Result<T, BlobStoreError>;

/// Trait for storing and fetching blobs by name.
///
/// Names are flat: a store never interprets `/` as a directory separator, and
/// every implementation rejects names that [`is_valid_blob_name`] refuses.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Returns whether a blob with this name is currently stored.
    async fn exists(&self, name: &str) -> BlobResult<bool>;

    /// Returns the names of every stored blob, sorted ascending.
    async fn list(&self) -> BlobResult<Vec<String>>;

    /// Retrieves a blob by its name.
    async fn get(&self, name: &str) -> BlobResult<Vec<u8>>;

    /// Stores a blob, replacing any previous content under the same name.
    async fn put(&self, name: &str, data: &[u8]) -> BlobResult<()>;

    async fn delete(&self, name: &str) -> BlobResult<()>;
}

/// A name is valid when it is a single, non-empty path component without
/// control characters.
pub fn is_valid_blob_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control)
}

pub(crate) fn check_name(name: &str) -> BlobResult<()> {
    if is_valid_blob_name(name) {
        Ok(())
    } else {
        Err(BlobStoreError::InvalidName(name.to_string()))
    }
}


#[derive(Debug, Clone)]
pub enum BlobStores {
    Local(LocalFileBlobStore),
    Memory(MemoryBlobStore),
    Object(ObjectBlobStore),
}

impl BlobStores {
    /// Moves the inner store behind a shareable trait object.
    pub fn into_shared(self) -> Arc<dyn BlobStore> {
        match self {
            BlobStores::Local(a) => Arc::new(a),
            BlobStores::Memory(b) => Arc::new(b),
            BlobStores::Object(c) => Arc::new(c),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BlobStores::Local(_) => "local",
            BlobStores::Memory(_) => "memory",
            BlobStores::Object(_) => "object",
        }
    }
}
