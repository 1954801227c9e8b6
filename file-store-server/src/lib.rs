pub mod api;
pub mod errors;
pub mod messages;
pub mod params;
pub mod services;

pub use api::{CreateFileRequest, FileStoreApi, OperationResult, Payload, ResultStatus, UpdateFileRequest};
pub use errors::FileStoreErr;
pub use messages::Locale;
pub use services::files_service::{configure, AppState};
