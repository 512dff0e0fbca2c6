// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Simulated payment gateway endpoint

pub mod handler;

pub use handler::{payment_status_handler, process_payment_handler, PaymentStatusQuery};
