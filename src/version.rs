// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the campsite booking service

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-booking-assistant-2025-11-24";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-11-24";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "stay-search",
    "map-availability",
    "bookings",
    "booking-modification",
    "simulated-payment",
    "admin-dashboard",
    "local-rag",
    "gemini-assistant",
    "function-calling",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Campsite Booking {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
