// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core booking domain types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::errors::BookingError;

/// A bookable accommodation unit (pitch, mobile home, cottage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stay {
    pub id: String,
    pub name: String,
    /// Category such as "Standard", "Plage" or "Cottage"
    #[serde(rename = "type")]
    pub stay_type: String,
    pub capacity: u32,
    /// Surface in square metres
    pub surface: u32,
    pub rooms: u32,
    pub bathrooms: u32,
    pub description: String,
    /// Price per night in EUR
    pub base_price: f64,
    pub images: Vec<String>,
    pub zone_id: Option<String>,
    pub number: Option<u32>,
}

/// A guest. Accounts have no credentials: guests are identified by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Optional add-on (bed linen, end-of-stay cleaning, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplement {
    pub id: String,
    pub name: String,
    /// Unit price in EUR
    pub price: f64,
    #[serde(rename = "type")]
    pub supplement_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether the booking still holds its stay
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub stay_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: u32,
    pub status: BookingStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// One supplement attached to a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSupplement {
    pub id: String,
    pub booking_id: String,
    pub supplement_id: String,
    pub quantity: u32,
    pub supplement: Supplement,
}

/// A booking together with the records the UI shows next to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub stay: Stay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub supplements: Vec<BookingSupplement>,
}

/// Requested supplement and quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementSelection {
    pub id: String,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl SupplementSelection {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity: Some(quantity),
        }
    }

    /// Missing or zero quantities count as one unit
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.filter(|q| *q > 0).unwrap_or(1)
    }
}

/// Contact details captured by the booking form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Numeric form field that clients send either as a JSON number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) if n.is_finite() => Some(*n),
            NumberOrText::Number(_) => None,
            NumberOrText::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Whole, non-negative count (guest numbers)
    pub fn as_count(&self) -> Option<u32> {
        let value = self.as_f64()?;
        if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return None;
        }
        Some(value as u32)
    }
}

/// Half-open calendar range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting empty or inverted ones
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if end <= start {
            return Err(BookingError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range starting at `start` and lasting `nights` nights
    pub fn from_nights(start: NaiveDate, nights: u32) -> Result<Self, BookingError> {
        let end = start + chrono::Duration::days(i64::from(nights));
        Self::new(start, end)
    }

    /// Two stays conflict when each starts before the other ends.
    /// A departure and an arrival on the same day do not conflict.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Parse a date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp
pub fn parse_date(value: &str) -> Result<NaiveDate, BookingError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| BookingError::InvalidDate(value.to_string()))
}
