pub mod errors;
pub mod local_store;
pub mod memory_store;
pub mod object_blob_store;
pub mod store;

pub use errors::BlobStoreError;
pub use local_store::LocalFileBlobStore;
pub use memory_store::MemoryBlobStore;
pub use object_blob_store::{ObjectBlobStore, S3Settings};
pub use store::{is_valid_blob_name, BlobResult, BlobStore, BlobStores};
