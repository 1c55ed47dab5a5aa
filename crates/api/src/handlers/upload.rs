//! Handler for `/common/upload`.
//!
//! Files are stored flat in the upload directory under a SHA-256 content
//! name, so uploading the same bytes twice yields the same URL.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use parish_core::upload::{stored_file_name, validate_extension, validate_size};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/v1/common/upload
///
/// Multipart form with a required `file` field. Returns `{ "url": ... }`.
pub async fn upload_file(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let upload = &state.config.upload;
    let ext = validate_extension(&filename)?;
    validate_size(data.len(), upload.max_bytes)?;

    tokio::fs::create_dir_all(&upload.dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let stored = stored_file_name(&data, &ext);
    tokio::fs::write(upload.dir.join(&stored), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::info!(
        file = %stored,
        size = data.len(),
        uploaded_by = user.user_id,
        "File uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: upload.public_url(&stored),
        }),
    ))
}
