// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::assistant::{AssistantSettings, ChatReply, ChatRequest, SettingsUpdate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveConfigResponse {
    pub success: bool,
}

/// POST /api/assistant `{message, history?}` -> `{text}`
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.assistant.chat(request).await?))
}

/// GET /api/assistant/config
pub async fn get_config_handler(State(state): State<AppState>) -> Json<AssistantSettings> {
    Json(state.assistant.settings().load().await)
}

/// POST /api/assistant/config
pub async fn save_config_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettingsUpdate>, JsonRejection>,
) -> Result<Json<SaveConfigResponse>, ApiError> {
    let Json(update) = payload?;
    state.assistant.settings().save(update).await?;
    Ok(Json(SaveConfigResponse { success: true }))
}
