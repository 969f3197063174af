use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use advice_core::ServiceError;

/// A [`ServiceError`] on its way out of the HTTP layer.
///
/// This is the only place service outcomes become status codes, and the
/// body is always `{"error": <public message>}`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ServiceError::Validation => StatusCode::BAD_REQUEST,
            ServiceError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
