// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Provider traits for text generation and embeddings

use async_trait::async_trait;

use super::types::{GenerateRequest, GenerateResponse, LlmError};

/// Hosted chat model
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one `generateContent` round trip
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, LlmError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Model identifier sent to the provider
    fn model(&self) -> &str;

    /// Whether the provider is configured (API key present, etc.)
    fn is_available(&self) -> bool {
        true
    }
}

/// Text embedding model
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one piece of text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;

    fn name(&self) -> &'static str;
}
