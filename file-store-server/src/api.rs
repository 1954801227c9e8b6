//! The request handling core: validation and existence checks in front of a
//! [`BlobStore`].
//!
//! Every operation follows the same shape: validate the inputs, check whether
//! the blob exists, then delegate to the store. The existence check and the
//! following write or delete are not atomic; two concurrent creates of the
//! same name can both pass the check.

use std::sync::Arc;
use blob_store::{is_valid_blob_name, BlobStore, BlobStoreError};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;
use crate::errors::FileStoreErr;
use crate::messages::{Locale, Message};

pub type ApiResult = Result<OperationResult, FileStoreErr>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultStatus {
    Ok,
    NotFound,
    Conflict,
    UnprocessableEntity,
    InternalError,
}

impl ResultStatus {
    pub fn code(self) -> u16 {
        match self {
            ResultStatus::Ok => 200,
            ResultStatus::NotFound => 404,
            ResultStatus::Conflict => 409,
            ResultStatus::UnprocessableEntity => 422,
            ResultStatus::InternalError => 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Names(Vec<String>),
    Content(String),
}

/// What an operation answered. Serializes to the `{mensaje, contenido}` envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "contenido", skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(skip)]
    pub status: ResultStatus,
}

/// Body of `POST /files`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateFileRequest {
    #[serde(default, deserialize_with = "falsy_as_absent")]
    #[validate(required)]
    pub(crate) filename: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_absent")]
    #[validate(required)]
    pub(crate) content: Option<String>,
}

impl CreateFileRequest {
    pub fn new(filename: Option<&str>, content: Option<&str>) -> Self {
        Self {
            filename: present(filename.map(str::to_string)),
            content: present(content.map(str::to_string)),
        }
    }
}

/// Body of `PUT|PATCH /files/{filename}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFileRequest {
    #[serde(default, deserialize_with = "falsy_as_absent")]
    #[validate(required)]
    pub(crate) content: Option<String>,
}

impl UpdateFileRequest {
    pub fn new(content: Option<&str>) -> Self {
        Self { content: present(content.map(str::to_string)) }
    }
}

/// `""` and `"0"` are falsy and count as not given.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty() && s != "0")
}

/// Form-style leniency: numbers and `true` are accepted as their text.
/// Falsy values (`null`, `false`, `0`, `0.0`, `""`, `"0"`) read as absent.
fn falsy_as_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("1".to_string())),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(present(Some(s))),
        other => Err(D::Error::custom(format!("expected a string, found {}", other))),
    }
}

/// Stateless request handler over an injected blob store.
#[derive(Clone)]
pub struct FileStoreApi {
    store: Arc<dyn BlobStore>,
    locale: Locale,
}

impl FileStoreApi {
    pub fn new(store: Arc<dyn BlobStore>, locale: Locale) -> Self {
        Self { store, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn reply(&self, status: ResultStatus, message: Message) -> OperationResult {
        OperationResult {
            message: self.locale.text(message).to_string(),
            payload: None,
            status,
        }
    }

    fn reply_with(&self, message: Message, payload: Payload) -> OperationResult {
        OperationResult {
            payload: Some(payload),
            ..self.reply(ResultStatus::Ok, message)
        }
    }

    fn store_err(&self, source: BlobStoreError) -> FileStoreErr {
        FileStoreErr::Store { source, locale: self.locale }
    }

    /// Lists every stored file name.
    pub async fn list(&self) -> ApiResult {
        let names = self.store.list().await.map_err(|e| self.store_err(e))?;
        tracing::debug!(count = names.len(), "listed files");
        Ok(self.reply_with(Message::Listed, Payload::Names(names)))
    }

    /// Creates a new file. Never overwrites an existing one.
    pub async fn create(&self, req: CreateFileRequest) -> ApiResult {
        if req.validate().is_err() {
            return Ok(self.reply(ResultStatus::UnprocessableEntity, Message::MissingCreateParams));
        }
        let filename = req.filename.unwrap_or_default();
        let content = req.content.unwrap_or_default();
        if !is_valid_blob_name(&filename) {
            return Ok(self.reply(ResultStatus::UnprocessableEntity, Message::InvalidFilename));
        }

        if self.store.exists(&filename).await.map_err(|e| self.store_err(e))? {
            return Ok(self.reply(ResultStatus::Conflict, Message::AlreadyExists));
        }

        match self.store.put(&filename, content.as_bytes()).await {
            Ok(()) => {
                tracing::info!(filename = %filename, bytes = content.len(), "file created");
                Ok(self.reply(ResultStatus::Ok, Message::Saved))
            }
            Err(e) => {
                tracing::error!(filename = %filename, "failed to save file: {:?}", e);
                Ok(self.reply(ResultStatus::InternalError, Message::SaveFailed))
            }
        }
    }

    /// Returns the content of a file.
    pub async fn read(&self, filename: &str) -> ApiResult {
        let not_found = || self.reply(ResultStatus::NotFound, Message::NotFound);
        if !self.store.exists(filename).await.map_err(|e| self.store_err(e))? {
            return Ok(not_found());
        }

        match self.store.get(filename).await {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes).into_owned();
                Ok(self.reply_with(Message::ReadOk, Payload::Content(content)))
            }
            // deleted between the check and the read
            Err(BlobStoreError::NotFound(_)) => Ok(not_found()),
            Err(e) => Err(self.store_err(e)),
        }
    }

    /// Overwrites an existing file. Never creates one.
    pub async fn update(&self, filename: &str, req: UpdateFileRequest) -> ApiResult {
        if req.validate().is_err() {
            return Ok(self.reply(ResultStatus::UnprocessableEntity, Message::MissingContent));
        }
        let content = req.content.unwrap_or_default();

        if !self.store.exists(filename).await.map_err(|e| self.store_err(e))? {
            return Ok(self.reply(ResultStatus::NotFound, Message::DoesNotExist));
        }

        match self.store.put(filename, content.as_bytes()).await {
            Ok(()) => {
                tracing::info!(filename = %filename, bytes = content.len(), "file updated");
                Ok(self.reply(ResultStatus::Ok, Message::Updated))
            }
            Err(e) => {
                tracing::error!(filename = %filename, "failed to update file: {:?}", e);
                Ok(self.reply(ResultStatus::InternalError, Message::UpdateFailed))
            }
        }
    }

    /// Deletes an existing file.
    pub async fn destroy(&self, filename: &str) -> ApiResult {
        let does_not_exist = || self.reply(ResultStatus::NotFound, Message::DoesNotExist);
        if !self.store.exists(filename).await.map_err(|e| self.store_err(e))? {
            return Ok(does_not_exist());
        }

        match self.store.delete(filename).await {
            Ok(()) => {
                tracing::info!(filename = %filename, "file deleted");
                Ok(self.reply(ResultStatus::Ok, Message::Deleted))
            }
            Err(BlobStoreError::NotFound(_)) => Ok(does_not_exist()),
            Err(e) => Err(self.store_err(e)),
        }
    }
}
