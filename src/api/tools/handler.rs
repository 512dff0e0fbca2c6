// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::assistant::{AvailabilityArgs, HoursArgs, ToolOutput};

/// POST /api/tools/availability `{type_emplacement, date_debut, duree_jours}`
pub async fn availability_tool_handler(
    State(state): State<AppState>,
    payload: Result<Json<AvailabilityArgs>, JsonRejection>,
) -> Result<Json<ToolOutput>, ApiError> {
    let Json(args) = payload?;
    Ok(Json(state.assistant.tools().availability(&args).await?))
}

/// POST /api/tools/hours `{nom_service}`
pub async fn hours_tool_handler(
    State(state): State<AppState>,
    payload: Result<Json<HoursArgs>, JsonRejection>,
) -> Result<Json<ToolOutput>, ApiError> {
    let Json(args) = payload?;
    Ok(Json(state.assistant.tools().hours(&args)?))
}
