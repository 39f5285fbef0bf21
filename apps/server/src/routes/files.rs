// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Upload, listing and download endpoints for IFC files.

use crate::error::ApiError;
use crate::services::has_ifc_extension;
use crate::types::{StoredFile, UploadResponse};
use crate::AppState;
use axum::{
    body::{Body, Bytes},
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};

/// A file field pulled out of a multipart request.
struct Upload {
    original_name: String,
    data: Bytes,
}

/// Extract the `file` field from a multipart request.
async fn extract_file(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == "file" {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            tracing::debug!(original_name = %original_name, size = data.len(), "Extracted file from multipart");
            return Ok(Upload {
                original_name,
                data,
            });
        }
    }

    tracing::warn!("No 'file' field found in multipart request");
    Err(ApiError::MissingFile)
}

/// POST /api/ifc/upload - Store an uploaded IFC file.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = extract_file(&mut multipart).await?;

    if upload.data.is_empty() {
        return Err(ApiError::EmptyFile);
    }

    if !has_ifc_extension(&upload.original_name) {
        tracing::info!(original_name = %upload.original_name, "Rejected non-IFC upload");
        return Err(ApiError::InvalidExtension);
    }

    if upload.data.len() > state.config.max_file_size_bytes() {
        return Err(ApiError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    let saved = state.store.save(&upload.data).await?;

    tracing::info!(
        file_name = %saved.file_name,
        original_name = %upload.original_name,
        size = saved.size,
        "IFC file uploaded"
    );

    Ok(Json(UploadResponse {
        success: true,
        file_name: saved.file_name,
        original_name: upload.original_name,
        size: saved.size,
        upload_path: saved.path.display().to_string(),
        sha256: saved.sha256,
    }))
}

/// GET /api/ifc/files - List stored IFC files, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StoredFile>>, ApiError> {
    let files = state.store.list().await?;
    tracing::debug!(count = files.len(), "Listed uploaded files");
    Ok(Json(files))
}

/// GET /api/ifc/download/:file_name - Return a stored file's bytes.
pub async fn download(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.store.read(&file_name).await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file_name.replace('"', "")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    tracing::debug!(file_name = %file_name, size = data.len(), "Serving download");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
