use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the tool server itself.
///
/// A failed upstream fetch is not one of these: it is a regular tool result
/// carrying an error payload.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid arguments: {0}")]
    InvalidInput(String),
    #[error("Invalid arguments: {0}")]
    Validation(#[from] core_types::CoreError),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidInput(_) | AppError::Validation(_) => {
                tracing::warn!(error = %self, "Rejected tool arguments.");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::UnknownTool(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Serialization(serde_err) => {
                tracing::error!(error = ?serde_err, "Serialization error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to encode the report".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
