use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::debug;

use advice_core::{Entry, EntryService, EntryStore, ServiceError};

use crate::error::ApiError;

pub type SharedService<S> = Arc<EntryService<S>>;

/// `GET /entries`
pub async fn list_entries<S: EntryStore>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(service.list().await?))
}

/// `POST /entries`
///
/// The body is taken as untyped JSON so that a missing, non-string or
/// unparseable `text` all produce the same validation error.
pub async fn create_entry<S: EntryStore>(
    State(service): State<SharedService<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(%rejection, "unreadable create payload");
        ApiError(ServiceError::Validation)
    })?;

    let entry = service.create(body.get("text")).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Fallback for every unrouted request.
pub async fn not_found() -> ApiError {
    ApiError(ServiceError::NotFound)
}

/// Fallback for a known path hit with a method it does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError(ServiceError::MethodNotAllowed)
}
