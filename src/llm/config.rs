// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the hosted LLM and embedding models

use serde::{Deserialize, Serialize};

use super::types::GenerationConfig;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini API key (`GOOGLE_API_KEY`)
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl LlmConfig {
    /// Sampling parameters sent with every generation request
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().map_or(false, |k| !k.trim().is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("LLM model must not be empty".to_string());
        }
        if self.embedding_model.trim().is_empty() {
            return Err("Embedding model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0 and 2, got {}",
                self.temperature
            ));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(format!("topP must be between 0 and 1, got {}", self.top_p));
        }
        if self.max_output_tokens == 0 {
            return Err("maxOutputTokens must be greater than 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            temperature: 1.0,
            max_output_tokens: 8192,
            top_p: 0.95,
            request_timeout_ms: 30000,
        }
    }
}
