// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query-side retrieval over the knowledge base

use std::sync::Arc;
use tracing::debug;

use super::errors::RagError;
use super::store::{ChunkMatch, RagStore};
use crate::llm::Embedder;

/// Default number of passages returned by a search
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

#[derive(Clone)]
pub struct RagRetriever {
    store: Arc<RagStore>,
    embedder: Arc<dyn Embedder>,
}

impl RagRetriever {
    pub fn new(store: Arc<RagStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self { store, embedder }
    }

    pub fn store(&self) -> &Arc<RagStore> {
        &self.store
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<ChunkMatch>, RagError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RagError::EmptyQuery);
        }
        if self.store.stats().await.chunks == 0 {
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(query).await?;
        let matches = self.store.search(&embedding, limit).await;
        debug!(
            "Retrieved {} passages for query ({} chars)",
            matches.len(),
            query.len()
        );
        Ok(matches)
    }
}
