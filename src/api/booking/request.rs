// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::Deserialize;

/// GET /api/booking query. `q`, `email` and `ref` are synonyms, first wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingSearchQuery {
    pub q: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

impl BookingSearchQuery {
    pub fn term(&self) -> Option<&str> {
        [&self.q, &self.email, &self.reference]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.trim().is_empty())
    }
}
