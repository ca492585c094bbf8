use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Failed to serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Task(task_err) => {
                tracing::error!(error = ?task_err, "Render task failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The dashboard could not be rendered".to_string(),
                )
            }
            AppError::Serialize(json_err) => {
                tracing::error!(error = ?json_err, "Serialization error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The dashboard could not be rendered".to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
