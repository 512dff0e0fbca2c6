// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::request::BookingSearchQuery;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::booking::{Booking, BookingDetails, BookingInput, ModificationRequest, PriceSimulation};

/// POST /api/booking
///
/// # Errors
/// - 400: missing fields, bad dates, capacity exceeded, unknown supplement
/// - 404: unknown stay
/// - 409: the stay is already booked over the range
pub async fn create_booking_handler(
    State(state): State<AppState>,
    payload: Result<Json<BookingInput>, JsonRejection>,
) -> Result<Json<BookingDetails>, ApiError> {
    let Json(input) = payload?;
    Ok(Json(state.bookings.create_booking(input).await?))
}

/// GET /api/booking?q= (email or booking id)
pub async fn find_bookings_handler(
    State(state): State<AppState>,
    query: Result<Query<BookingSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<BookingDetails>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.bookings.find_bookings(query.term()).await?))
}

/// GET /api/booking/:id
pub async fn get_booking_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingDetails>, ApiError> {
    Ok(Json(state.bookings.get_booking(&id).await?))
}

/// PUT /api/booking/:id
pub async fn modify_booking_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ModificationRequest>, JsonRejection>,
) -> Result<Json<BookingDetails>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.bookings.modify(&id, &request).await?))
}

/// POST /api/booking/:id/simulate
pub async fn simulate_booking_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ModificationRequest>, JsonRejection>,
) -> Result<Json<PriceSimulation>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.bookings.simulate(&id, &request).await?))
}

/// POST /api/booking/:id/cancel
pub async fn cancel_booking_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    Ok(Json(state.bookings.cancel_booking(&id).await?))
}
