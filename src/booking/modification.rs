// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Booking modification rules
//!
//! A modification changes exactly one aspect of a booking: its dates
//! (`stay`), its party size (`friends`) or its supplements (`rubrics`).
//! [`plan`] validates the request and prices it without touching storage;
//! the date conflict check needs the database and is left to the caller.

use serde::{Deserialize, Serialize};

use super::errors::BookingError;
use super::pricing;
use super::types::{
    parse_date, BookingDetails, BookingSupplement, DateRange, NumberOrText, Supplement,
    SupplementSelection,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Stay,
    Friends,
    Rubrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRequest {
    pub change_type: ChangeType,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub guests: Option<NumberOrText>,
    #[serde(default)]
    pub supplements: Option<Vec<SupplementSelection>>,
}

/// Price impact of a modification, in EUR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSimulation {
    pub success: bool,
    pub old_price: f64,
    pub new_price: f64,
    pub difference: f64,
    pub currency: String,
}

impl PriceSimulation {
    pub fn new(old_price: f64, new_price: f64) -> Self {
        Self {
            success: true,
            old_price,
            new_price,
            difference: new_price - old_price,
            currency: "EUR".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlannedChange {
    Dates(DateRange),
    Guests(u32),
    Supplements(Vec<BookingSupplement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModificationPlan {
    pub change: PlannedChange,
    pub new_total: f64,
}

/// Validate `request` against the current booking and compute the new total.
///
/// `catalogue` is the full supplement list; selections naming an unknown
/// supplement are skipped.
pub fn plan(
    current: &BookingDetails,
    request: &ModificationRequest,
    catalogue: &[Supplement],
) -> Result<ModificationPlan, BookingError> {
    let booking = &current.booking;
    if !booking.status.is_active() {
        return Err(BookingError::BookingCancelled(booking.id.clone()));
    }
    let base_price = current.stay.base_price;

    match request.change_type {
        ChangeType::Stay => {
            let (start, end) = match (request.start_date.as_deref(), request.end_date.as_deref()) {
                (Some(s), Some(e)) if !s.trim().is_empty() && !e.trim().is_empty() => (s, e),
                _ => return Err(BookingError::MissingDates),
            };
            let range = DateRange::new(parse_date(start)?, parse_date(end)?)?;
            let old_nights = booking.range().nights();
            let new_total = booking.total_price - pricing::stay_total(base_price, old_nights)
                + pricing::stay_total(base_price, range.nights());
            Ok(ModificationPlan {
                change: PlannedChange::Dates(range),
                new_total,
            })
        }
        ChangeType::Friends => {
            let raw = request
                .guests
                .as_ref()
                .ok_or_else(|| BookingError::MissingField("guests".to_string()))?;
            let guests = raw
                .as_count()
                .ok_or_else(|| BookingError::MissingField("guests".to_string()))?;
            if guests < 1 {
                return Err(BookingError::InvalidGuestCount(guests));
            }
            if guests > current.stay.capacity {
                return Err(BookingError::CapacityExceeded {
                    capacity: current.stay.capacity,
                });
            }
            Ok(ModificationPlan {
                change: PlannedChange::Guests(guests),
                new_total: booking.total_price,
            })
        }
        ChangeType::Rubrics => {
            let selections = request
                .supplements
                .as_ref()
                .ok_or_else(|| BookingError::MissingField("supplements".to_string()))?;
            let lines: Vec<BookingSupplement> = selections
                .iter()
                .filter_map(|sel| {
                    let supplement = catalogue.iter().find(|s| s.id == sel.id)?;
                    Some(BookingSupplement {
                        id: uuid::Uuid::new_v4().to_string(),
                        booking_id: booking.id.clone(),
                        supplement_id: supplement.id.clone(),
                        quantity: sel.effective_quantity(),
                        supplement: supplement.clone(),
                    })
                })
                .collect();
            let new_total = pricing::quote(&current.stay, &booking.range(), &lines).total;
            Ok(ModificationPlan {
                change: PlannedChange::Supplements(lines),
                new_total,
            })
        }
    }
}
