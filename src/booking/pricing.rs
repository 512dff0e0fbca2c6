// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stay and supplement price computation

use serde::{Deserialize, Serialize};

use super::types::{BookingSupplement, DateRange, Stay};

/// Breakdown of a booking price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub nights: i64,
    pub stay_total: f64,
    pub supplements_total: f64,
    pub total: f64,
}

pub fn nights(range: &DateRange) -> i64 {
    range.nights()
}

pub fn stay_total(base_price: f64, nights: i64) -> f64 {
    base_price * nights as f64
}

/// Sum of unit price times quantity over every line
pub fn supplements_total(lines: &[BookingSupplement]) -> f64 {
    lines
        .iter()
        .map(|line| line.supplement.price * f64::from(line.quantity))
        .sum()
}

pub fn quote(stay: &Stay, range: &DateRange, lines: &[BookingSupplement]) -> PriceQuote {
    let nights = nights(range);
    let stay_total = stay_total(stay.base_price, nights);
    let supplements_total = supplements_total(lines);
    PriceQuote {
        nights,
        stay_total,
        supplements_total,
        total: stay_total + supplements_total,
    }
}

/// Prices are compared to the cent
pub fn same_amount(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}
