// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stay catalogue and availability search

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::BookingError;
use super::types::{parse_date, DateRange, Stay, Supplement};
use crate::storage::{stays, supplements, Database};

/// Amenities shown on every pitch of the map view
pub const MAP_FEATURES: [&str; 3] = ["Electricité 10A", "Eau", "Wifi"];

/// Default number of matches returned by the type search
pub const DEFAULT_TYPE_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStatus {
    Available,
    Occupied,
}

/// Stay as rendered on the campground map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStay {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub stay_type: String,
    pub category: String,
    pub price: f64,
    pub capacity: u32,
    pub surface: u32,
    pub zone_id: Option<String>,
    pub number: Option<u32>,
    pub status: MapStatus,
    pub features: Vec<String>,
}

impl MapStay {
    fn new(stay: Stay, occupied: bool) -> Self {
        Self {
            category: stay.stay_type.clone(),
            id: stay.id,
            name: stay.name,
            stay_type: stay.stay_type,
            price: stay.base_price,
            capacity: stay.capacity,
            surface: stay.surface,
            zone_id: stay.zone_id,
            number: stay.number,
            status: if occupied {
                MapStatus::Occupied
            } else {
                MapStatus::Available
            },
            features: MAP_FEATURES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Build a search range from optional query parameters
pub fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, BookingError> {
    match (start, end) {
        (Some(start), Some(end)) if !start.trim().is_empty() && !end.trim().is_empty() => {
            DateRange::new(parse_date(start)?, parse_date(end)?)
        }
        _ => Err(BookingError::MissingDates),
    }
}

/// Read-only access to stays and supplements
#[derive(Clone)]
pub struct StayCatalog {
    db: Arc<Database>,
}

impl StayCatalog {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list_stays(&self) -> Result<Vec<Stay>, BookingError> {
        Ok(self.db.with_conn(stays::list)?)
    }

    pub async fn get_stay(&self, id: &str) -> Result<Stay, BookingError> {
        self.db
            .with_conn(|conn| stays::get(conn, id))?
            .ok_or_else(|| BookingError::StayNotFound(id.to_string()))
    }

    pub async fn list_supplements(&self) -> Result<Vec<Supplement>, BookingError> {
        Ok(self.db.with_conn(supplements::list)?)
    }

    /// Stays large enough for `guests` with no active booking over `range`
    pub async fn available_stays(
        &self,
        range: &DateRange,
        guests: Option<u32>,
    ) -> Result<Vec<Stay>, BookingError> {
        let guests = guests.filter(|g| *g > 0).unwrap_or(1);
        let found = self
            .db
            .with_conn(|conn| stays::available(conn, range, guests))?;
        debug!(
            "{} stays free from {} to {} for {} guests",
            found.len(),
            range.start,
            range.end,
            guests
        );
        Ok(found)
    }

    pub async fn map_availability(&self, range: &DateRange) -> Result<Vec<MapStay>, BookingError> {
        let rows = self
            .db
            .with_conn(|conn| stays::with_occupancy(conn, range))?;
        Ok(rows
            .into_iter()
            .map(|(stay, occupied)| MapStay::new(stay, occupied))
            .collect())
    }

    /// Free stays of a category over `nights` nights from `start`
    pub async fn available_by_type(
        &self,
        type_query: &str,
        start: NaiveDate,
        nights: u32,
        limit: usize,
    ) -> Result<(DateRange, Vec<Stay>), BookingError> {
        let range = DateRange::from_nights(start, nights)?;
        let found = self
            .db
            .with_conn(|conn| stays::available_by_type(conn, type_query.trim(), &range, limit))?;
        Ok((range, found))
    }
}
