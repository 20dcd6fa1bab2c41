//! HTTP mapping for the shared error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use pulse_core::error::{ClientCode, Error};

/// Handler-side wrapper so `pulse_core::Error` can become a response.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::Conflict => StatusCode::CONFLICT,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
