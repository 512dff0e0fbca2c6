// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stay catalogue and availability endpoints

pub mod handler;
pub mod request;

pub use handler::{
    availability_handler, get_stay_handler, list_stays_handler, map_availability_handler,
    supplements_handler,
};
pub use request::AvailabilityQuery;
