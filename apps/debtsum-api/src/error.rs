//! Error types for the debt summarizer API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use debtsum_core::DebtSumError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No `file` field in the multipart body, or a zero-byte upload.
    #[error("no file uploaded")]
    MissingFile,

    /// Extension or content type says this is not a CSV; rejected before the
    /// core ever sees it.
    #[error("invalid file type")]
    UnsupportedFileType,

    /// One or more lines failed validation; carries the raw offending lines.
    #[error("invalid CSV format ({} bad lines)", .0.len())]
    InvalidFormat(Vec<String>),

    /// The persisted upload could not be read back. The cause message is
    /// passed through to the caller for this phase only.
    #[error("error reading the file: {0}")]
    ReadFailure(String),

    #[error("file not found")]
    FileNotFound,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Core(#[from] DebtSumError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingFile => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No file uploaded." }),
            ),
            ApiError::UnsupportedFileType => (
                StatusCode::BAD_REQUEST,
                json!({
                    "status": "error",
                    "message": "Invalid file type. Only CSV files are allowed.",
                }),
            ),
            ApiError::InvalidFormat(lines) => {
                let details: Vec<String> = lines
                    .iter()
                    .map(|line| format!("Invalid line: {}", line))
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid CSV format", "details": details }),
                )
            }
            ApiError::ReadFailure(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Error reading the file", "details": details }),
            ),
            ApiError::FileNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "status": 404, "message": "File not found" }),
            ),
            ApiError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "error", "message": message }),
            ),
            ApiError::Core(e) => {
                tracing::error!("Core error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error" }),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
