// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chatbot endpoints

pub mod handler;

pub use handler::{chat_handler, get_config_handler, save_config_handler, SaveConfigResponse};
