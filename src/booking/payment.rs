// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Simulated payment gateway
//!
//! No money moves: a payment confirms a pending booking and returns a
//! receipt shaped like the campground PMS payment API.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::BookingError;
use super::types::{Booking, BookingStatus, NumberOrText};
use crate::storage::{bookings, Database};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub id_order: Option<String>,
    pub payment_type: Option<String>,
    pub value: Option<NumberOrText>,
    /// Card or wallet details; accepted and ignored
    pub payment: Option<serde_json::Value>,
}

/// Every PMS response wraps its payload in `result`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEnvelope<T> {
    pub result: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub error: i32,
    pub mess_error: Option<String>,
    pub id_payment: String,
    pub id_user: String,
    pub payment_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusReport {
    pub error: i32,
    pub mess_error: Option<String>,
    pub id_user: String,
    pub status: i32,
    pub balance: f64,
    /// Stay name
    pub libcateg: String,
    pub begin: NaiveDate,
    pub end: NaiveDate,
    pub last_name: String,
    pub first_name: String,
    pub price: f64,
    pub email: String,
}

/// PMS status code of a booking
pub fn status_code(status: BookingStatus) -> i32 {
    match status {
        BookingStatus::Confirmed => 10,
        BookingStatus::Cancelled => 90,
        BookingStatus::Pending => 0,
    }
}

fn payment_id(year: i32) -> String {
    format!("P{}{}", year, rand::thread_rng().gen_range(0..1_000_000))
}

#[derive(Clone)]
pub struct PaymentService {
    db: Arc<Database>,
}

impl PaymentService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn process_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentEnvelope<PaymentReceipt>, BookingError> {
        let id_order = request
            .id_order
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());
        let (Some(id_order), Some(raw_value)) = (id_order, request.value.as_ref()) else {
            return Err(BookingError::MissingField("idOrder, value".to_string()));
        };
        let value = raw_value
            .as_f64()
            .filter(|v| *v != 0.0)
            .ok_or_else(|| BookingError::InvalidPaymentValue(format!("{:?}", raw_value)))?;

        let now = Utc::now();
        let booking = self.db.with_tx(|tx| -> Result<Booking, BookingError> {
            let booking = bookings::get(tx, id_order)?
                .ok_or_else(|| BookingError::BookingNotFound(id_order.to_string()))?;
            if booking.status == BookingStatus::Pending {
                bookings::set_status(tx, id_order, BookingStatus::Confirmed, now)?;
            }
            Ok(booking)
        })?;

        let receipt = PaymentReceipt {
            error: 0,
            mess_error: None,
            id_payment: payment_id(now.year()),
            id_user: booking.user_id,
            payment_value: value,
        };
        info!(
            "Simulated payment {} of {:.2} EUR for booking {} ({})",
            receipt.id_payment,
            value,
            id_order,
            request.payment_type.as_deref().unwrap_or("unspecified")
        );
        Ok(PaymentEnvelope { result: receipt })
    }

    pub async fn payment_status(
        &self,
        id_order: Option<&str>,
    ) -> Result<PaymentEnvelope<PaymentStatusReport>, BookingError> {
        let id_order = id_order
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BookingError::MissingField("idOrder".to_string()))?;

        let details = self
            .db
            .with_conn(|conn| bookings::details(conn, id_order))?
            .ok_or_else(|| BookingError::BookingNotFound(id_order.to_string()))?;

        let (last_name, first_name, email) = match &details.user {
            Some(user) => (
                user.last_name.clone(),
                user.first_name.clone(),
                user.email.clone(),
            ),
            None => Default::default(),
        };

        Ok(PaymentEnvelope {
            result: PaymentStatusReport {
                error: 0,
                mess_error: None,
                id_user: details.booking.user_id,
                status: status_code(details.booking.status),
                balance: 0.0,
                libcateg: details.stay.name,
                begin: details.booking.start_date,
                end: details.booking.end_date,
                last_name,
                first_name,
                price: details.booking.total_price,
                email,
            },
        })
    }
}
