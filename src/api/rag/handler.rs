// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::debug;

use super::request::RagSearchRequest;
use super::response::RagSearchResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /api/rag/search
///
/// # Request
/// - `query`: text to match (required)
/// - `limit`: number of passages (default 5)
///
/// # Response
/// - `chunks`: passage texts, best first
/// - `metadata`: `{docId, score}` for each passage
pub async fn rag_search_handler(
    State(state): State<AppState>,
    payload: Result<Json<RagSearchRequest>, JsonRejection>,
) -> Result<Json<RagSearchResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate().map_err(ApiError::InvalidRequest)?;

    let query = request.query.as_deref().unwrap_or_default();
    let limit = request.limit.unwrap_or(state.rag_search_limit);
    debug!("RAG search (limit {}): {:?}", limit, query);

    let matches = state.retriever.search(query, limit).await?;
    Ok(Json(RagSearchResponse::from(matches)))
}
