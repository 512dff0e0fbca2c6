// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hosted LLM access: provider traits, Gemini client and wire types

pub mod config;
pub mod gemini;
pub mod provider;
pub mod types;

pub use config::LlmConfig;
pub use gemini::GeminiClient;
pub use provider::{Embedder, LlmProvider};
pub use types::{
    Candidate, Content, FunctionCall, FunctionDeclaration, FunctionResponse, GenerateRequest,
    GenerateResponse, GenerationConfig, LlmError, Part, Tool, ROLE_FUNCTION, ROLE_MODEL,
    ROLE_USER,
};
