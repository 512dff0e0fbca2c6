// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the local knowledge base

use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum RagError {
    /// No paragraph survived chunking, or every chunk failed to embed
    #[error("No text content extracted or embedding failed")]
    NoChunks,

    /// Search query was empty
    #[error("Query is required")]
    EmptyQuery,

    /// Uploaded file could not be read as text
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Embedding provider failure
    #[error("Embedding failed: {0}")]
    Embedding(#[from] LlmError),

    /// Store file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store file could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RagError {
    /// Get user-friendly error message for API responses
    pub fn user_message(&self) -> String {
        match self {
            RagError::NoChunks => {
                "Le document ne contient aucun passage exploitable".to_string()
            }
            RagError::EmptyQuery => "Query is required".to_string(),
            RagError::InvalidDocument(reason) => format!("Invalid document: {}", reason),
            RagError::Embedding(_) => "Embedding service unavailable".to_string(),
            RagError::Io(_) | RagError::Serialization(_) => {
                "Knowledge base storage error".to_string()
            }
        }
    }

    /// Whether the caller sent bad input (as opposed to a server fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RagError::NoChunks | RagError::EmptyQuery | RagError::InvalidDocument(_)
        )
    }
}
