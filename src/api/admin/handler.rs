// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::{multipart::MultipartError, Multipart};
use chrono::Utc;
use tracing::info;

use super::response::{DocumentListResponse, DocumentUploadResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::booking::{AdminStats, BookingDetails};

/// GET /api/admin/bookings
pub async fn admin_bookings_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingDetails>>, ApiError> {
    Ok(Json(state.bookings.admin_bookings().await?))
}

/// GET /api/admin/stats
pub async fn admin_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<AdminStats>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.bookings.admin_stats(today).await?))
}

/// POST /api/admin/documents (multipart, field `file`)
///
/// The file is read as UTF-8 text, split into paragraphs, embedded and
/// added to the knowledge base.
pub async fn upload_document_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocumentUploadResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, "Invalid multipart body", state.max_upload_bytes))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "document.txt".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| upload_error(e, "Failed to read upload", state.max_upload_bytes))?;
        upload = Some((name, bytes.to_vec()));
        break;
    }

    let (name, bytes) = upload.ok_or_else(|| ApiError::InvalidRequest("No file uploaded".to_string()))?;
    if bytes.len() > state.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge(format!(
            "File exceeds {} bytes",
            state.max_upload_bytes
        )));
    }

    info!("Processing file for local RAG: {} ({} bytes)", name, bytes.len());
    let document = state.ingestor.ingest_bytes(&name, &bytes).await?;
    Ok(Json(DocumentUploadResponse::new(&document)))
}

/// Body-limit rejections surface from the multipart stream and map to 413
fn upload_error(err: MultipartError, context: &str, max_upload_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!("File exceeds {} bytes", max_upload_bytes))
    } else {
        ApiError::InvalidRequest(format!("{}: {}", context, err))
    }
}

/// GET /api/admin/documents
pub async fn list_documents_handler(State(state): State<AppState>) -> Json<DocumentListResponse> {
    let store = state.retriever.store();
    Json(DocumentListResponse::new(
        store.documents().await,
        store.stats().await,
    ))
}
