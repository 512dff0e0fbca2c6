// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire types for the Gemini `generateContent` and `embedContent` APIs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Role used for tool results sent back to the model
pub const ROLE_FUNCTION: &str = "function";
pub const ROLE_USER: &str = "user";
pub const ROLE_MODEL: &str = "model";

/// One turn of a conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(ROLE_USER.to_string()),
            parts: vec![Part::text(text)],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Some(ROLE_MODEL.to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// Role-less content, as used for system instructions
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    pub fn function_responses(responses: Vec<FunctionResponse>) -> Self {
        Self {
            role: Some(ROLE_FUNCTION.to_string()),
            parts: responses
                .into_iter()
                .map(|r| Part {
                    function_response: Some(r),
                    ..Default::default()
                })
                .collect(),
        }
    }

    /// Text parts concatenated in order
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn function_calls(&self) -> impl Iterator<Item = &FunctionCall> {
        self.parts.iter().filter_map(|p| p.function_call.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    /// Opaque token on thinking-model parts; must be echoed back unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

/// Tool signature advertised to the model. `parameters` is an OpenAPI
/// schema object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub grounding_metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<Value>,
}

impl GenerateResponse {
    /// Content of the first candidate, if any
    pub fn first_content(&self) -> Option<&Content> {
        self.candidates.first().and_then(|c| c.content.as_ref())
    }

    pub fn text(&self) -> String {
        self.first_content().map(Content::text).unwrap_or_default()
    }

    pub fn function_calls(&self) -> Vec<FunctionCall> {
        self.first_content()
            .map(|c| c.function_calls().cloned().collect())
            .unwrap_or_default()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first().and_then(|c| c.finish_reason.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct EmbedRequest {
    pub model: String,
    pub content: Content,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmbedResponse {
    pub embedding: EmbeddingValues,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmbeddingValues {
    #[serde(default)]
    pub values: Vec<f32>,
}

/// Errors raised by LLM and embedding providers
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured
    #[error("No API key configured for {provider}")]
    NoApiKey { provider: String },

    /// Provider rejected the credentials
    #[error("{provider} rejected the API key (HTTP {status})")]
    Unauthorized { provider: String, status: u16 },

    /// Rate limited by the provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Non-success HTTP response
    #[error("LLM API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Request timed out
    #[error("LLM request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Response body could not be understood
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),

    /// Embedding call returned no values
    #[error("Embedding response contained no values")]
    EmptyEmbedding,
}

impl LlmError {
    /// Whether retrying later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimited { .. } | LlmError::Timeout { .. }
        ) || matches!(self, LlmError::ApiError { status, .. } if *status >= 500 || *status == 0)
    }
}
