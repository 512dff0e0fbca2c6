// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::booking::{PaymentEnvelope, PaymentReceipt, PaymentRequest, PaymentStatusReport};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusQuery {
    pub id_order: Option<String>,
}

/// POST /api/payment
///
/// Records a simulated payment; a PENDING booking becomes CONFIRMED.
pub async fn process_payment_handler(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentEnvelope<PaymentReceipt>>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.payments.process_payment(request).await?))
}

/// GET /api/payment?idOrder=
pub async fn payment_status_handler(
    State(state): State<AppState>,
    Query(query): Query<PaymentStatusQuery>,
) -> Result<Json<PaymentEnvelope<PaymentStatusReport>>, ApiError> {
    Ok(Json(
        state
            .payments
            .payment_status(query.id_order.as_deref())
            .await?,
    ))
}
