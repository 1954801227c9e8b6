use thiserror::Error;


#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid blob name: {0:?}")]
    InvalidName(String),

    #[error("I/O error on local blob storage")]
    Io(#[from] std::io::Error),

    #[error("Object storage request failed")]
    ObjectStore(#[from] object_store::Error),
}
