// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Booking endpoints: creation, lookup, modification and cancellation

pub mod handler;
pub mod request;

pub use handler::{
    cancel_booking_handler, create_booking_handler, find_bookings_handler, get_booking_handler,
    modify_booking_handler, simulate_booking_handler,
};
pub use request::BookingSearchQuery;
