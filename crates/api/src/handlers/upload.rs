//! Handler for media uploads.

use std::path::Path;

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use quill_core::upload::{public_url, stored_file_name};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Multipart field that carries the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Relative URL the file is served from.
    pub url: String,
}

/// POST /api/upload
///
/// Stream the `file` field to the upload directory and return its public URL.
/// Other fields are ignored; only the first `file` field is stored.
pub async fn upload_file(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let stored_name =
            stored_file_name(field.file_name(), chrono::Utc::now().timestamp_millis());

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

        let path = state.config.upload_dir.join(&stored_name);
        if let Err(err) = write_field(field, &path).await {
            // Drop partial files; the error is what the client should see.
            let _ = tokio::fs::remove_file(&path).await;
            return Err(err);
        }

        tracing::info!(user_id = auth.user_id, file = %stored_name, "Upload stored");
        return Ok(Json(UploadResponse {
            url: public_url(&stored_name),
        }));
    }

    Err(AppError::BadRequest("No file uploaded".into()))
}

/// Copy a multipart field to `path` chunk by chunk.
async fn write_field(mut field: Field<'_>, path: &Path) -> AppResult<()> {
    let mut file = tokio::fs::File::create(path).await.map_err(|e| {
        AppError::InternalError(format!("Failed to create {}: {e}", path.display()))
    })?;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        file.write_all(&chunk).await.map_err(|e| {
            AppError::InternalError(format!("Failed to write {}: {e}", path.display()))
        })?;
    }

    file.flush().await.map_err(|e| {
        AppError::InternalError(format!("Failed to flush {}: {e}", path.display()))
    })?;
    Ok(())
}

/// Keep the body-limit status; every other stream error is the client's.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
