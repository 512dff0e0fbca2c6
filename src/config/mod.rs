// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Application configuration
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::llm::LlmConfig;
use crate::rag::{DEFAULT_MIN_CHUNK_LEN, DEFAULT_SEARCH_LIMIT};
use crate::storage::DEFAULT_POOL_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub pool_size: usize,
    /// Seed the reference campground when the stays table is empty
    pub seed_on_start: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/campsite.db"),
            pool_size: DEFAULT_POOL_SIZE,
            seed_on_start: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// New bookings are CONFIRMED immediately instead of PENDING
    pub auto_confirm: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { auto_confirm: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderKind {
    /// Gemini when an API key is set, hashing otherwise
    Auto,
    Gemini,
    Hashing,
}

impl std::str::FromStr for EmbedderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(EmbedderKind::Auto),
            "gemini" => Ok(EmbedderKind::Gemini),
            "hashing" => Ok(EmbedderKind::Hashing),
            other => Err(format!("Unknown embedder: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub store_path: PathBuf,
    pub min_chunk_len: usize,
    pub search_limit: usize,
    pub embedder: EmbedderKind,
    /// Upload size cap for knowledge-base documents
    pub max_upload_bytes: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/rag_store.json"),
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            search_limit: DEFAULT_SEARCH_LIMIT,
            embedder: EmbedderKind::Auto,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub settings_path: PathBuf,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from("data/assistant-config.json"),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
    pub rag: RagConfig,
    pub llm: LlmConfig,
    pub assistant: AssistantConfig,
}

impl AppConfig {
    /// Defaults, overlaid with `path` when given, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT") {
            self.server.port = port;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(size) = parse_var(&lookup, "DATABASE_POOL_SIZE") {
            self.database.pool_size = size;
        }
        if let Some(seed) = parse_var(&lookup, "SEED_ON_START") {
            self.database.seed_on_start = seed;
        }
        if let Some(auto_confirm) = parse_var(&lookup, "AUTO_CONFIRM_BOOKINGS") {
            self.booking.auto_confirm = auto_confirm;
        }

        if let Some(path) = lookup("RAG_STORE_PATH") {
            self.rag.store_path = PathBuf::from(path);
        }
        if let Some(kind) = parse_var(&lookup, "RAG_EMBEDDER") {
            self.rag.embedder = kind;
        }

        if let Some(key) = lookup("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.llm.model = model;
        }
        if let Some(model) = lookup("GEMINI_EMBEDDING_MODEL") {
            self.llm.embedding_model = model;
        }

        if let Some(path) = lookup("ASSISTANT_CONFIG_PATH") {
            self.assistant.settings_path = PathBuf::from(path);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.database.pool_size == 0 {
            return Err("Database pool size must be greater than 0".to_string());
        }
        if self.rag.search_limit == 0 {
            return Err("RAG search limit must be greater than 0".to_string());
        }
        if self.rag.max_upload_bytes == 0 {
            return Err("Maximum upload size must be greater than 0".to_string());
        }
        if self.rag.embedder == EmbedderKind::Gemini && !self.llm.has_api_key() {
            return Err("Gemini embedder requires GOOGLE_API_KEY".to_string());
        }
        self.llm.validate()
    }

    /// Embedder actually used once `Auto` is resolved
    pub fn effective_embedder(&self) -> EmbedderKind {
        match self.rag.embedder {
            EmbedderKind::Auto if self.llm.has_api_key() => EmbedderKind::Gemini,
            EmbedderKind::Auto => EmbedderKind::Hashing,
            kind => kind,
        }
    }
}
