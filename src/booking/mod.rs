// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod availability;
pub mod errors;
pub mod modification;
pub mod payment;
pub mod pricing;
pub mod service;
pub mod types;

pub use availability::{parse_range, MapStatus, MapStay, StayCatalog, DEFAULT_TYPE_LIMIT};
pub use errors::BookingError;
pub use modification::{ChangeType, ModificationRequest, PriceSimulation};
pub use payment::{
    PaymentEnvelope, PaymentReceipt, PaymentRequest, PaymentService, PaymentStatusReport,
};
pub use pricing::PriceQuote;
pub use service::{AdminStats, BookingInput, BookingService};
pub use types::{
    parse_date, Booking, BookingDetails, BookingStatus, BookingSupplement, DateRange,
    GuestDetails, NumberOrText, Stay, Supplement, SupplementSelection, User,
};
