// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Document ingestion: chunk, embed, store

use std::sync::Arc;
use tracing::{info, warn};

use super::chunking::split_paragraphs;
use super::errors::RagError;
use super::store::{NewChunk, RagDocument, RagStore};
use crate::llm::Embedder;

pub struct DocumentIngestor {
    store: Arc<RagStore>,
    embedder: Arc<dyn Embedder>,
    min_chunk_len: usize,
}

impl DocumentIngestor {
    pub fn new(store: Arc<RagStore>, embedder: Arc<dyn Embedder>, min_chunk_len: usize) -> Self {
        Self {
            store,
            embedder,
            min_chunk_len,
        }
    }

    /// Ingest a UTF-8 text document. Chunks that fail to embed are skipped.
    pub async fn ingest(&self, name: &str, text: &str) -> Result<RagDocument, RagError> {
        let paragraphs = split_paragraphs(text, self.min_chunk_len);
        info!(
            "Ingesting \"{}\": {} paragraphs via {}",
            name,
            paragraphs.len(),
            self.embedder.name()
        );

        let mut chunks = Vec::with_capacity(paragraphs.len());
        for (index, paragraph) in paragraphs.into_iter().enumerate() {
            match self.embedder.embed(&paragraph).await {
                Ok(embedding) => chunks.push(NewChunk::new(paragraph, embedding)),
                Err(e) => warn!("Skipping chunk {} of \"{}\": {}", index, name, e),
            }
        }

        if chunks.is_empty() {
            return Err(RagError::NoChunks);
        }

        self.store.add_document(name, chunks).await
    }

    /// Ingest raw uploaded bytes, which must be UTF-8 text.
    pub async fn ingest_bytes(&self, name: &str, bytes: &[u8]) -> Result<RagDocument, RagError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| RagError::InvalidDocument("file is not UTF-8 text".to_string()))?;
        self.ingest(name, text).await
    }
}
