use std::sync::Arc;
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::{Path, PathPart};
use object_store::{ObjectStore, PutPayload};
use crate::errors::BlobStoreError;
use crate::store::{check_name, is_valid_blob_name, BlobResult, BlobStore};

/// Connection settings for an S3-compatible bucket (AWS, MinIO, Tigris...).
///
/// Credentials are picked up from the usual `AWS_*` environment variables.
#[derive(Clone, Debug)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint, e.g. `http://minio:9000`. Plain HTTP is allowed when set.
    pub endpoint: Option<String>,
    pub prefix: Option<String>,
}

/// A `BlobStore` backed by any `object_store` implementation.
///
/// Blobs live directly under `prefix`; nested keys are never listed.
#[derive(Clone, Debug)]
pub struct ObjectBlobStore {
    inner: Arc<dyn ObjectStore>,
    prefix: Option<Path>,
}

impl ObjectBlobStore {
    pub fn new(inner: Arc<dyn ObjectStore>, prefix: Option<&str>) -> Self {
        Self {
            inner,
            prefix: prefix.filter(|p| !p.is_empty()).map(Path::from),
        }
    }

    /// An ephemeral object store, handy for tests.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()), None)
    }

    pub fn s3(settings: &S3Settings) -> BlobResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&settings.bucket)
            .with_region(&settings.region);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }
        let s3 = builder.build()?;
        tracing::info!(bucket = %settings.bucket, endpoint = ?settings.endpoint, "configured S3 blob store");
        Ok(Self::new(Arc::new(s3), settings.prefix.as_deref()))
    }

    /// Keys hold the name verbatim (no percent-encoding) so `list` returns it unchanged.
    fn key(&self, name: &str) -> BlobResult<Path> {
        check_name(name)?;
        let part = PathPart::parse(name).map_err(|_| BlobStoreError::InvalidName(name.to_string()))?;
        Ok(match &self.prefix {
            Some(prefix) => prefix.child(part),
            None => Path::from_iter([part]),
        })
    }
}

fn not_found_as(name: &str, err: object_store::Error) -> BlobStoreError {
    match err {
        object_store::Error::NotFound { .. } => BlobStoreError::NotFound(name.to_string()),
        other => BlobStoreError::ObjectStore(other),
    }
}

#[async_trait]
impl BlobStore for ObjectBlobStore {
    async fn exists(&self, name: &str) -> BlobResult<bool> {
        if !is_valid_blob_name(name) {
            return Ok(false);
        }
        let key = self.key(name)?;
        match self.inner.head(&key).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> BlobResult<Vec<String>> {
        let listing = self.inner.list_with_delimiter(self.prefix.as_ref()).await?;
        let mut names: Vec<String> = listing
            .objects
            .iter()
            .filter_map(|meta| meta.location.filename().map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn get(&self, name: &str) -> BlobResult<Vec<u8>> {
        let key = self.key(name)?;
        let result = self.inner.get(&key).await.map_err(|e| not_found_as(name, e))?;
        let bytes = result.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn put(&self, name: &str, data: &[u8]) -> BlobResult<()> {
        let key = self.key(name)?;
        self.inner.put(&key, PutPayload::from(data.to_vec())).await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> BlobResult<()> {
        // object stores treat deleting a missing key as success
        if !self.exists(name).await? {
            return Err(BlobStoreError::NotFound(name.to_string()));
        }
        let key = self.key(name)?;
        self.inner.delete(&key).await?;
        Ok(())
    }
}
