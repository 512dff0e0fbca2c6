// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Assistant tools exposed over HTTP

pub mod handler;

pub use handler::{availability_tool_handler, hours_tool_handler};
