// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod admin;
pub mod assistant;
pub mod booking;
pub mod errors;
pub mod http_server;
pub mod payment;
pub mod rag;
pub mod stays;
pub mod tools;

pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, start_server, AppState, HealthResponse};
