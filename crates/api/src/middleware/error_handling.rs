//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies of the form
//! `{"error": "<message>"}` so every endpoint reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use otsched_core::errors::OtError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use otsched_api::middleware::error_handling::AppError;
/// use otsched_core::errors::OtError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(OtError::NotFound("Surgery not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub OtError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            OtError::NotFound(_) => StatusCode::NOT_FOUND,
            OtError::Validation(_) => StatusCode::BAD_REQUEST,
            OtError::Conflict(_) => StatusCode::CONFLICT,
            OtError::Authentication(_) => StatusCode::UNAUTHORIZED,
            OtError::Authorization(_) => StatusCode::FORBIDDEN,
            OtError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OtError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `OtResult` inside handlers.
impl From<OtError> for AppError {
    fn from(err: OtError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(OtError::Database(err))
    }
}

/// Maps an OtError to an HTTP response
pub fn map_error(err: OtError) -> Response {
    AppError(err).into_response()
}
