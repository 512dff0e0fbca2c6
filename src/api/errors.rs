// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, warn};

use crate::assistant::AssistantError;
use crate::booking::BookingError;
use crate::llm::LlmError;
use crate::rag::RagError;

/// JSON error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge(String),
    RateLimitExceeded { retry_after: u64 },
    ServiceUnavailable(String),
    /// Failure reported by an upstream API (the LLM provider)
    UpstreamError { message: String, details: String },
    Timeout,
    InternalError { message: String, details: Option<String> },
}

impl ApiError {
    pub fn internal(details: impl fmt::Display) -> Self {
        ApiError::InternalError {
            message: "Internal Server Error".to_string(),
            details: Some(details.to_string()),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, error, details) = match self {
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::NotFound(msg) => ("not_found", msg.clone(), None),
            ApiError::Conflict(msg) => ("conflict", msg.clone(), None),
            ApiError::PayloadTooLarge(msg) => ("payload_too_large", msg.clone(), None),
            ApiError::RateLimitExceeded { retry_after } => (
                "rate_limit_exceeded",
                "Rate limit exceeded".to_string(),
                Some(format!("retry after {} seconds", retry_after)),
            ),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg.clone(), None),
            ApiError::UpstreamError { message, details } => {
                ("upstream_error", message.clone(), Some(details.clone()))
            }
            ApiError::Timeout => ("timeout", "Request timed out".to_string(), None),
            ApiError::InternalError { message, details } => {
                ("internal_error", message.clone(), details.clone())
            }
        };

        ErrorResponse {
            error,
            error_type: error_type.to_string(),
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::RateLimitExceeded { .. } => 429,
            ApiError::InternalError { .. } => 500,
            ApiError::UpstreamError { .. } => 502,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::Timeout => 504,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            ApiError::RateLimitExceeded { retry_after } => write!(
                f,
                "Rate limit exceeded, retry after {} seconds",
                retry_after
            ),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::UpstreamError { message, details } => {
                write!(f, "{}: {}", message, details)
            }
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::InternalError { message, details } => match details {
                Some(details) => write!(f, "{}: {}", message, details),
                None => write!(f, "{}", message),
            },
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::BookingNotFound(_) | BookingError::StayNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            BookingError::Unavailable | BookingError::BookingCancelled(_) => {
                ApiError::Conflict(err.to_string())
            }
            BookingError::Storage(e) => ApiError::internal(e),
            BookingError::SupplementNotFound(_)
            | BookingError::MissingField(_)
            | BookingError::MissingDates
            | BookingError::MissingQuery
            | BookingError::InvalidDate(_)
            | BookingError::InvalidDateRange { .. }
            | BookingError::CapacityExceeded { .. }
            | BookingError::InvalidGuestCount(_)
            | BookingError::InvalidPaymentValue(_) => ApiError::InvalidRequest(err.to_string()),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NoApiKey { .. } => {
                ApiError::ServiceUnavailable("Assistant is not configured (GOOGLE_API_KEY)".to_string())
            }
            LlmError::RateLimited { retry_after_secs } => ApiError::RateLimitExceeded {
                retry_after: retry_after_secs,
            },
            LlmError::Timeout { .. } => ApiError::Timeout,
            other => ApiError::UpstreamError {
                message: "Failed to process request".to_string(),
                details: other.to_string(),
            },
        }
    }
}

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::Embedding(e) => ApiError::from(e),
            RagError::Io(_) | RagError::Serialization(_) => ApiError::InternalError {
                message: err.user_message(),
                details: Some(err.to_string()),
            },
            RagError::NoChunks | RagError::EmptyQuery | RagError::InvalidDocument(_) => {
                ApiError::InvalidRequest(err.to_string())
            }
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Llm(e) => ApiError::from(e),
            AssistantError::Booking(e) => ApiError::from(e),
            AssistantError::Io(_) | AssistantError::Serialization(_) => ApiError::InternalError {
                message: "Failed to save config".to_string(),
                details: Some(err.to_string()),
            },
            AssistantError::MissingMessage
            | AssistantError::MissingInstruction
            | AssistantError::MissingParameters
            | AssistantError::InvalidParameter { .. } => ApiError::InvalidRequest(err.to_string()),
        }
    }
}
