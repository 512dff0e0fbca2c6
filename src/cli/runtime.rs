// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Opens the stores and providers named by an [`AppConfig`]

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::AppState;
use crate::assistant::SettingsStore;
use crate::config::{AppConfig, EmbedderKind};
use crate::llm::{Embedder, GeminiClient, LlmProvider};
use crate::rag::{HashingEmbedder, RagStore};
use crate::storage::{self, Database};

/// Open the SQLite database, seeding it when configured
pub fn open_database(config: &AppConfig) -> Result<Arc<Database>> {
    if let Some(parent) = config
        .database
        .path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let db = Database::open(&config.database.path, config.database.pool_size)
        .with_context(|| format!("Failed to open {}", config.database.path.display()))?;
    Ok(Arc::new(db))
}

pub async fn open_rag_store(config: &AppConfig) -> Arc<RagStore> {
    Arc::new(RagStore::open(&config.rag.store_path).await)
}

/// Gemini client used for chat, and for embeddings when selected
pub fn gemini_client(config: &AppConfig) -> Result<Arc<GeminiClient>> {
    let client = GeminiClient::new(&config.llm).context("Failed to create Gemini client")?;
    if !config.llm.has_api_key() {
        warn!("GOOGLE_API_KEY is not set, the assistant will answer 503");
    }
    Ok(Arc::new(client))
}

pub fn embedder(config: &AppConfig, gemini: &Arc<GeminiClient>) -> Arc<dyn Embedder> {
    match config.effective_embedder() {
        EmbedderKind::Gemini => {
            info!("Embedding with Gemini model {}", config.llm.embedding_model);
            gemini.clone()
        }
        _ => {
            info!("Embedding with the local hashing embedder");
            Arc::new(HashingEmbedder::default())
        }
    }
}

/// Build everything the HTTP server needs
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let db = open_database(config)?;
    if config.database.seed_on_start {
        if let Some(summary) = storage::seed_if_empty(&db)? {
            info!(
                "Seeded empty database with {} stays and {} supplements",
                summary.stays, summary.supplements
            );
        }
    }

    let rag_store = open_rag_store(config).await;
    let gemini = gemini_client(config)?;
    let embedder = embedder(config, &gemini);
    let settings = Arc::new(SettingsStore::new(&config.assistant.settings_path));
    let llm: Arc<dyn LlmProvider> = gemini;

    Ok(AppState::new(config, db, rag_store, settings, llm, embedder))
}
