//! HTTP handlers for the debt summarizer API
//!
//! Thin glue around `debtsum-core`: extract the upload, persist it, run the
//! validate → aggregate → render pipeline, and hand back download links.

use std::path::{Path as FsPath, PathBuf};

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use debtsum_core::{summarize, validate_lines, write_csv_report, write_pdf_report, DebtSumError};

use crate::error::ApiError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "debtsum-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Success envelope for POST /api/v1/process-file
#[derive(Serialize)]
pub struct ProcessResponse {
    pub status: u16,
    pub message: &'static str,
    #[serde(rename = "csvFile")]
    pub csv_file: String,
    #[serde(rename = "pdfFile")]
    pub pdf_file: String,
}

/// Handler: POST /api/v1/process-file
pub async fn handle_process_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    info!(
        "Processing upload: {} ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );

    if !is_csv_upload(&upload) {
        return Err(ApiError::UnsupportedFileType);
    }

    let upload_path = persist_upload(&state, &upload).await?;

    // Re-read from disk: an I/O failure here is the reading-phase error whose
    // cause message the caller sees verbatim in `details`. Bytes that are not
    // valid UTF-8 are decoded lossily, so a mis-encoded CSV is rejected by
    // the validator as bad lines instead of surfacing as a server error.
    let raw = tokio::fs::read(&upload_path)
        .await
        .map_err(|e| ApiError::ReadFailure(e.to_string()))?;
    let content = String::from_utf8_lossy(&raw).into_owned();

    validate_lines(&content).map_err(|e| match e {
        DebtSumError::InvalidFormat { lines } => ApiError::InvalidFormat(lines),
        other => ApiError::Core(other),
    })?;

    let records = summarize(&content);
    debug!("Aggregated {} summary records", records.len());

    // The renderers have no data dependency on each other; run them
    // together. If one fails, the other's file is not rolled back.
    let csv_task = tokio::task::spawn_blocking({
        let records = records.clone();
        let dir = state.output_dir.clone();
        move || write_csv_report(&records, &dir)
    });
    let pdf_task = tokio::task::spawn_blocking({
        let records = records;
        let dir = state.output_dir.clone();
        move || write_pdf_report(&records, &dir)
    });

    let (csv_result, pdf_result) = tokio::join!(csv_task, pdf_task);
    let csv_path = csv_result.map_err(|e| ApiError::Internal(e.into()))??;
    let pdf_path = pdf_result.map_err(|e| ApiError::Internal(e.into()))??;

    let base_url = request_base_url(&headers);

    Ok(Json(ProcessResponse {
        status: 200,
        message: "File has been processed successfully",
        csv_file: download_link(&base_url, &csv_path),
        pdf_file: download_link(&base_url, &pdf_path),
    }))
}

/// Handler: GET /api/v1/processed/:filename
///
/// Explicit download endpoint with a Content-Disposition attachment header;
/// `/processed_files/` serves the same directory statically.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    // No separators, no parent traversal.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(ApiError::FileNotFound);
    }

    let path = state.output_dir.join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::FileNotFound)?;

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => "text/csv",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// The one upload we care about from the multipart body.
struct Upload {
    filename: String,
    content_type: Option<String>,
    bytes: Bytes,
}

/// Pull the `file` field out of the multipart body. A missing field or a
/// zero-byte upload both count as "no file uploaded".
async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.csv").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ApiError::MissingFile);
        }

        return Ok(Upload {
            filename,
            content_type,
            bytes,
        });
    }

    Err(ApiError::MissingFile)
}

/// Only `.csv` uploads reach the core. Multipart fields are not required to
/// carry a content type; when one is present it must agree.
fn is_csv_upload(upload: &Upload) -> bool {
    let extension_ok = FsPath::new(&upload.filename)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    let content_type_ok = upload
        .content_type
        .as_deref()
        .map(|ct| ct.contains("csv"))
        .unwrap_or(true);

    extension_ok && content_type_ok
}

/// Persist the upload under the uploads directory. The original name is kept
/// for operator convenience, prefixed with a token so same-named uploads
/// never clash.
async fn persist_upload(state: &AppState, upload: &Upload) -> Result<PathBuf, ApiError> {
    tokio::fs::create_dir_all(&state.upload_dir)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    let safe_name = FsPath::new(&upload.filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv");
    let path = state
        .upload_dir
        .join(format!("{}_{}", Uuid::new_v4().simple(), safe_name));

    tokio::fs::write(&path, &upload.bytes)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(path)
}

/// Base URL from the request's Host header, for building download links.
fn request_base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{}", host)
}

fn download_link(base_url: &str, path: &FsPath) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    format!("{}/processed_files/{}", base_url, name)
}
