// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini REST client
//!
//! Implements both [`LlmProvider`] (`models/{model}:generateContent`) and
//! [`Embedder`] (`models/{model}:embedContent`) against the Generative
//! Language API, authenticated with an API key header.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::config::LlmConfig;
use super::provider::{Embedder, LlmProvider};
use super::types::{
    Content, EmbedRequest, EmbedResponse, GenerateRequest, GenerateResponse, LlmError,
};

const PROVIDER: &str = "gemini";

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    embedding_model: String,
    timeout_ms: u64,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| LlmError::ApiError {
                status: 0,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default().trim().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            embedding_model: config.embedding_model.clone(),
            timeout_ms: config.request_timeout_ms,
            client,
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, LlmError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        if self.api_key.is_empty() {
            return Err(LlmError::NoApiKey {
                provider: PROVIDER.to_string(),
            });
        }

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    LlmError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let response = check_status(response).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

async fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();

    if status == 429 {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        return Err(LlmError::RateLimited { retry_after_secs });
    }

    if status == 401 || status == 403 {
        return Err(LlmError::Unauthorized {
            provider: PROVIDER.to_string(),
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(LlmError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response)
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let url = self.endpoint(&self.model, "generateContent");
        debug!(
            "Gemini generateContent: model={} turns={} tools={}",
            self.model,
            request.contents.len(),
            request.tools.len()
        );
        self.post(&url, request).await
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[async_trait]
impl Embedder for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let url = self.endpoint(&self.embedding_model, "embedContent");
        let body = EmbedRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content::system(text),
        };
        let response: EmbedResponse = self.post(&url, &body).await?;
        if response.embedding.values.is_empty() {
            return Err(LlmError::EmptyEmbedding);
        }
        Ok(response.embedding.values)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}
