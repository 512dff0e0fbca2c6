// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

use crate::booking::BookingError;
use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Missing message")]
    MissingMessage,

    #[error("Missing systemInstruction")]
    MissingInstruction,

    /// A tool call lacked one of its required arguments
    #[error("Missing parameters")]
    MissingParameters,

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AssistantError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        AssistantError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
