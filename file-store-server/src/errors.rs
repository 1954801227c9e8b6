use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use blob_store::BlobStoreError;
use serde_json::error::Error as SerdeError;
use thiserror::Error;
use serde::Serialize;
use crate::messages::{Locale, Message};


/// Body of every error response: just the message, no payload.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    mensaje: &'a str,
}

#[derive(Debug, Error)]
pub enum FileStoreErr {
    #[error("Failed to parse JSON request body")]
    Json {
        #[source]
        source: SerdeError,
        locale: Locale,
    },

    #[error("An error occurred when accessing the blob store")]
    Store {
        #[source]
        source: BlobStoreError,
        locale: Locale,
    },
}

impl FileStoreErr {
    fn locale(&self) -> Locale {
        match self {
            FileStoreErr::Json { locale, .. } | FileStoreErr::Store { locale, .. } => *locale,
        }
    }

    fn message(&self) -> Message {
        match self {
            FileStoreErr::Json { .. } => Message::MalformedBody,
            FileStoreErr::Store { .. } => Message::InternalError,
        }
    }
}

impl ResponseError for FileStoreErr {
    fn status_code(&self) -> StatusCode {
        match self {
            FileStoreErr::Json { .. } => StatusCode::BAD_REQUEST,
            FileStoreErr::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            FileStoreErr::Json { source, .. } => tracing::debug!("rejected request body: {}", source),
            FileStoreErr::Store { source, .. } => tracing::error!("blob store failure: {:?}", source),
        }
        // never leak the underlying error to the client
        HttpResponse::build(self.status_code()).json(ErrorBody {
            mensaje: self.locale().text(self.message()),
        })
    }
}
