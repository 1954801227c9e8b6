use actix_web::http::StatusCode;
use actix_web::{delete, get, post, route, web, HttpResponse};
use serde::de::DeserializeOwned;
use crate::api::{ApiResult, CreateFileRequest, FileStoreApi, OperationResult, UpdateFileRequest};
use crate::errors::FileStoreErr;

pub const APP_TYPE_JSON: &str = "application/json";

pub struct AppState {
    pub(crate) api: FileStoreApi,
}

impl AppState {
    pub fn new(api: FileStoreApi) -> Self {
        Self { api }
    }
}

/// Parses a JSON body. An empty body reads as `{}` so that the core answers
/// with its own "missing parameters" result.
fn parse_body<T>(bytes: &web::Bytes, api: &FileStoreApi) -> Result<T, FileStoreErr>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|source| FileStoreErr::Json { source, locale: api.locale() })
}

fn respond(result: ApiResult) -> Result<HttpResponse, FileStoreErr> {
    let result: OperationResult = result?;
    let status = StatusCode::from_u16(result.status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok(HttpResponse::build(status)
        .content_type(APP_TYPE_JSON)
        .json(result))
}

#[get("/files")]
async fn list_files(shared_state: web::Data<AppState>) -> Result<HttpResponse, FileStoreErr> {
    tracing::debug!("GET /files");
    respond(shared_state.api.list().await)
}

#[post("/files")]
async fn create_file(
    request_json_bytes: web::Bytes,
    shared_state: web::Data<AppState>,
) -> Result<HttpResponse, FileStoreErr> {
    let req: CreateFileRequest = parse_body(&request_json_bytes, &shared_state.api)?;
    tracing::debug!(filename = ?req.filename, "POST /files");
    respond(shared_state.api.create(req).await)
}

#[get("/files/{filename}")]
async fn read_file(
    filename: web::Path<String>,
    shared_state: web::Data<AppState>,
) -> Result<HttpResponse, FileStoreErr> {
    tracing::debug!(filename = %filename, "GET /files/{{filename}}");
    respond(shared_state.api.read(&filename).await)
}

#[route("/files/{filename}", method = "PUT", method = "PATCH")]
async fn update_file(
    filename: web::Path<String>,
    request_json_bytes: web::Bytes,
    shared_state: web::Data<AppState>,
) -> Result<HttpResponse, FileStoreErr> {
    let req: UpdateFileRequest = parse_body(&request_json_bytes, &shared_state.api)?;
    tracing::debug!(filename = %filename, "PUT /files/{{filename}}");
    respond(shared_state.api.update(&filename, req).await)
}

#[delete("/files/{filename}")]
async fn destroy_file(
    filename: web::Path<String>,
    shared_state: web::Data<AppState>,
) -> Result<HttpResponse, FileStoreErr> {
    tracing::debug!(filename = %filename, "DELETE /files/{{filename}}");
    respond(shared_state.api.destroy(&filename).await)
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(serde_json::json!({}))
}

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_files)
        .service(create_file)
        .service(read_file)
        .service(update_file)
        .service(destroy_file)
        .service(health);
}
