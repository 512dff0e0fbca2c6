// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for booking operations

use chrono::NaiveDate;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Stay not found: {0}")]
    StayNotFound(String),

    #[error("Supplement not found: {0}")]
    SupplementNotFound(String),

    #[error("Missing required fields: {0}")]
    MissingField(String),

    #[error("Start date and end date are required")]
    MissingDates,

    #[error("Query is required")]
    MissingQuery,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("End date {end} must be after start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Maximum capacity is {capacity} guests")]
    CapacityExceeded { capacity: u32 },

    #[error("Invalid guest count: {0}")]
    InvalidGuestCount(u32),

    #[error("Stay is not available for these dates")]
    Unavailable,

    #[error("Booking {0} is cancelled and cannot be modified")]
    BookingCancelled(String),

    #[error("Invalid payment value: {0}")]
    InvalidPaymentValue(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BookingError {
    /// Error code for logs and API payloads
    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            BookingError::StayNotFound(_) => "STAY_NOT_FOUND",
            BookingError::SupplementNotFound(_) => "SUPPLEMENT_NOT_FOUND",
            BookingError::MissingField(_) => "MISSING_FIELD",
            BookingError::MissingDates => "MISSING_DATES",
            BookingError::MissingQuery => "MISSING_QUERY",
            BookingError::InvalidDate(_) => "INVALID_DATE",
            BookingError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            BookingError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            BookingError::InvalidGuestCount(_) => "INVALID_GUEST_COUNT",
            BookingError::Unavailable => "UNAVAILABLE",
            BookingError::BookingCancelled(_) => "BOOKING_CANCELLED",
            BookingError::InvalidPaymentValue(_) => "INVALID_PAYMENT_VALUE",
            BookingError::Storage(_) => "STORAGE_ERROR",
        }
    }
}
