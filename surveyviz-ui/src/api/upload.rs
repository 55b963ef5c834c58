//! CSV dataset upload
//!
//! POST / takes a multipart form with a `file` field. A valid upload
//! fully replaces the stored dataset and redirects to the report view;
//! every failure is logged and answered with a plain-text 400.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info};

use crate::{db, ingest, AppState};

/// Request bodies are capped at 10 MB
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// POST /
///
/// Accepts the survey CSV, validates it, and replaces all stored rows.
pub async fn upload_dataset(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, UploadError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::BadUpload(format!("malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| UploadError::BadUpload(format!("failed to read upload: {}", e)))?;
            upload = Some((filename, data.to_vec()));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| UploadError::BadUpload("no file field in upload".to_string()))?;

    if !filename.ends_with(".csv") {
        return Err(UploadError::BadUpload(format!(
            "unsupported file type: {}",
            filename
        )));
    }

    let rows = ingest::parse_survey_csv(&data).map_err(|e| {
        error!("Rejected CSV upload {}: {}", filename, e);
        UploadError::BadUpload(e.to_string())
    })?;

    let inserted = db::replace_all(&state.db, &rows).await.map_err(|e| {
        error!("Failed to store uploaded dataset: {}", e);
        UploadError::Storage
    })?;

    info!("Stored {} survey responses from {}", inserted, filename);
    Ok(Redirect::to("/data"))
}

/// Upload errors - every failure is a plain-text 400 for the client
#[derive(Debug)]
pub enum UploadError {
    BadUpload(String),
    Storage,
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let message = match self {
            UploadError::BadUpload(msg) => msg,
            UploadError::Storage => "Failed to process the CSV file.".to_string(),
        };
        (StatusCode::BAD_REQUEST, message).into_response()
    }
}
