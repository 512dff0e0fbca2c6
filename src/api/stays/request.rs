// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::Deserialize;

use crate::booking::{parse_range, BookingError, DateRange};

/// Query string of GET /api/availability and GET /api/map-availability
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub guests: Option<String>,
}

impl AvailabilityQuery {
    pub fn range(&self) -> Result<DateRange, BookingError> {
        parse_range(self.start_date.as_deref(), self.end_date.as_deref())
    }

    /// Guest count; absent or unparsable values mean no capacity filter
    pub fn guests(&self) -> Option<u32> {
        self.guests.as_deref().and_then(|g| g.trim().parse().ok())
    }
}
