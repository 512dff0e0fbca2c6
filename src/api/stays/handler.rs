// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use super::request::AvailabilityQuery;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::booking::{MapStay, Stay, Supplement};

/// GET /api/stays
pub async fn list_stays_handler(State(state): State<AppState>) -> Result<Json<Vec<Stay>>, ApiError> {
    Ok(Json(state.catalog.list_stays().await?))
}

/// GET /api/stays/:id
pub async fn get_stay_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stay>, ApiError> {
    Ok(Json(state.catalog.get_stay(&id).await?))
}

/// GET /api/availability?startDate&endDate&guests
///
/// Stays with enough capacity and no active booking over the range.
pub async fn availability_handler(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Stay>>, ApiError> {
    let range = query.range()?;
    debug!("Availability search {:?} guests={:?}", range, query.guests);
    Ok(Json(
        state.catalog.available_stays(&range, query.guests()).await?,
    ))
}

/// GET /api/map-availability?startDate&endDate
///
/// Every stay tagged `available` or `occupied`; `guests` is ignored.
pub async fn map_availability_handler(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<MapStay>>, ApiError> {
    let range = query.range()?;
    Ok(Json(state.catalog.map_availability(&range).await?))
}

/// GET /api/supplements
pub async fn supplements_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Supplement>>, ApiError> {
    Ok(Json(state.catalog.list_supplements().await?))
}
