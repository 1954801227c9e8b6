use std::io::ErrorKind;
use std::path::PathBuf;
use async_trait::async_trait;
use tokio::fs;
use crate::errors::BlobStoreError;
use crate::store::{check_name, is_valid_blob_name, BlobResult, BlobStore};

/// Stores each blob as a regular file directly under `base_path`.
#[derive(Clone, Debug)]
pub struct LocalFileBlobStore {
    base_path: PathBuf,
}

impl LocalFileBlobStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    /// Creates the base directory if needed and returns a store rooted there.
    pub async fn open(base_path: impl Into<PathBuf>) -> BlobResult<Self> {
        let store = Self::new(base_path);
        fs::create_dir_all(&store.base_path).await?;
        tracing::debug!(path = %store.base_path.display(), "opened local blob store");
        Ok(store)
    }

    fn blob_path(&self, name: &str) -> BlobResult<PathBuf> {
        check_name(name)?;
        Ok(self.base_path.join(name))
    }
}

fn not_found_as(name: &str, err: std::io::Error) -> BlobStoreError {
    if err.kind() == ErrorKind::NotFound {
        BlobStoreError::NotFound(name.to_string())
    } else {
        BlobStoreError::Io(err)
    }
}

#[async_trait]
impl BlobStore for LocalFileBlobStore {
    async fn exists(&self, name: &str) -> BlobResult<bool> {
        // an invalid name can never have been stored
        if !is_valid_blob_name(name) {
            return Ok(false);
        }
        match fs::metadata(self.base_path.join(name)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> BlobResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!(name = ?raw, "skipping non UTF-8 file name"),
            }
        }
        names.sort();
        Ok(names)
    }

    async fn get(&self, name: &str) -> BlobResult<Vec<u8>> {
        let path = self.blob_path(name)?;
        fs::read(path).await.map_err(|e| not_found_as(name, e))
    }

    async fn put(&self, name: &str, data: &[u8]) -> BlobResult<()> {
        let path = self.blob_path(name)?;
        // create or truncate, like OpenOptions::write+create+truncate
        fs::write(path, data).await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> BlobResult<()> {
        let path = self.blob_path(name)?;
        fs::remove_file(path).await.map_err(|e| not_found_as(name, e))
    }
}



#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put() {
        let temp_dir = tempdir().unwrap();
        let blob_store = LocalFileBlobStore::open(temp_dir.path()).await.unwrap();

        let name = "test_blob.txt";
        let data = b"test data";

        blob_store.put(name, data).await.unwrap();

        // Verify the file was created and contains the correct data
        let file_data = std::fs::read(temp_dir.path().join(name)).unwrap();
        assert_eq!(file_data, data);
        assert!(blob_store.exists(name).await.unwrap());
    }

    #[tokio::test]
    async fn test_put_overwrite() {
        let temp_dir = tempdir().unwrap();
        let blob_store = LocalFileBlobStore::open(temp_dir.path()).await.unwrap();

        let name = "test_blob.txt";
        blob_store.put(name, b"a much longer first payload").await.unwrap();
        blob_store.put(name, b"short").await.unwrap();

        // the second write truncates the first
        assert_eq!(blob_store.get(name).await.unwrap(), b"short");
    }

    #[tokio::test]
    async fn test_open_creates_base_dir() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("storage").join("app");
        let blob_store = LocalFileBlobStore::open(&nested).await.unwrap();

        assert!(nested.is_dir());
        assert!(blob_store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_skips_directories_only() {
        let temp_dir = tempdir().unwrap();
        let blob_store = LocalFileBlobStore::open(temp_dir.path()).await.unwrap();

        std::fs::create_dir(temp_dir.path().join("public")).unwrap();
        std::fs::write(temp_dir.path().join(".gitignore"), "*").unwrap();
        blob_store.put("b.txt", b"2").await.unwrap();
        blob_store.put("a.txt", b"1").await.unwrap();

        assert_eq!(blob_store.list().await.unwrap(), vec![".gitignore", "a.txt", "b.txt"]);
        assert!(!blob_store.exists("public").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_blob() {
        let temp_dir = tempdir().unwrap();
        let blob_store = LocalFileBlobStore::open(temp_dir.path()).await.unwrap();

        assert!(!blob_store.exists("nope.txt").await.unwrap());
        assert!(matches!(blob_store.get("nope.txt").await, Err(BlobStoreError::NotFound(_))));
        assert!(matches!(blob_store.delete("nope.txt").await, Err(BlobStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let temp_dir = tempdir().unwrap();
        let blob_store = LocalFileBlobStore::open(temp_dir.path()).await.unwrap();

        blob_store.put("gone.txt", b"bye").await.unwrap();
        blob_store.delete("gone.txt").await.unwrap();

        assert!(!blob_store.exists("gone.txt").await.unwrap());
        assert!(!temp_dir.path().join("gone.txt").exists());
    }

    #[tokio::test]
    async fn test_names_cannot_escape_base_dir() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path().join("app");
        let blob_store = LocalFileBlobStore::open(&base).await.unwrap();

        let res = blob_store.put("../escaped.txt", b"x").await;
        assert!(matches!(res, Err(BlobStoreError::InvalidName(_))));
        assert!(!temp_dir.path().join("escaped.txt").exists());
        assert!(!blob_store.exists("../escaped.txt").await.unwrap());
    }
}
