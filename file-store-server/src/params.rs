use std::path::PathBuf;
use std::sync::Arc;
use blob_store::{BlobResult, BlobStore, BlobStores, LocalFileBlobStore, MemoryBlobStore, ObjectBlobStore, S3Settings};
use clap::{Parser, ValueEnum};
use crate::messages::Locale;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// One file per blob under `--data-dir`.
    Local,
    /// Process memory, lost on exit.
    Memory,
    /// An S3-compatible bucket.
    S3,
}

#[derive(Parser, Debug)]
#[clap(name = "file-store-server", about = "HTTP API for a flat directory of text files")]
pub struct Args {
    #[clap(long, env = "FILE_STORE_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    pub http_addr: String,

    #[clap(long, env = "FILE_STORE_BACKEND", value_enum, default_value_t = Backend::Local)]
    pub backend: Backend,

    #[clap(long, env = "FILE_STORE_DATA_DIR", default_value = "storage/app")]
    pub data_dir: PathBuf,

    #[clap(long, env = "FILE_STORE_LOCALE", value_enum, default_value_t = Locale::Es)]
    pub locale: Locale,

    #[clap(long, env = "FILE_STORE_S3_BUCKET", required_if_eq("backend", "s3"))]
    pub s3_bucket: Option<String>,

    #[clap(long, env = "FILE_STORE_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    #[clap(long, env = "FILE_STORE_S3_REGION", default_value = "us-east-1")]
    pub s3_region: String,

    #[clap(long, env = "FILE_STORE_S3_PREFIX")]
    pub s3_prefix: Option<String>,
}

impl Args {
    /// Builds the configured blob store, creating the data directory if needed.
    pub async fn blob_store(&self) -> BlobResult<BlobStores> {
        Ok(match self.backend {
            Backend::Local => BlobStores::Local(LocalFileBlobStore::open(&self.data_dir).await?),
            Backend::Memory => BlobStores::Memory(MemoryBlobStore::new()),
            Backend::S3 => BlobStores::Object(ObjectBlobStore::s3(&S3Settings {
                bucket: self.s3_bucket.clone().unwrap_or_default(),
                region: self.s3_region.clone(),
                endpoint: self.s3_endpoint.clone(),
                prefix: self.s3_prefix.clone(),
            })?),
        })
    }

    pub async fn shared_blob_store(&self) -> BlobResult<Arc<dyn BlobStore>> {
        let stores = self.blob_store().await?;
        tracing::info!(backend = stores.kind(), "blob store ready");
        Ok(stores.into_shared())
    }
}
