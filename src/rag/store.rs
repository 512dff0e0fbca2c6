// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! JSON-file knowledge base
//!
//! All documents and chunk embeddings live in one pretty-printed JSON file
//! that is rewritten on every change. Search is a linear cosine scan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::embedding::cosine_similarity;
use super::errors::RagError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagDocument {
    pub id: String,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    pub chunk_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagChunk {
    pub id: String,
    pub doc_id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Chunk text and embedding before it is attached to a document
#[derive(Debug, Clone)]
pub struct NewChunk {
    pub text: String,
    pub embedding: Vec<f32>,
    pub metadata: Option<Value>,
}

impl NewChunk {
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            embedding,
            metadata: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChunkMatch {
    pub chunk: RagChunk,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub documents: usize,
    pub chunks: usize,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RagData {
    #[serde(default)]
    documents: Vec<RagDocument>,
    #[serde(default)]
    chunks: Vec<RagChunk>,
}

pub struct RagStore {
    path: Option<PathBuf>,
    data: RwLock<RagData>,
}

impl RagStore {
    /// Load the store from `path`. A missing or unreadable file starts an
    /// empty store; the file is created on the first write.
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<RagData>(&bytes) {
                Ok(data) => data,
                Err(e) => {
                    warn!("Ignoring invalid RAG store {}: {}", path.display(), e);
                    RagData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => RagData::default(),
            Err(e) => {
                warn!("Cannot read RAG store {}: {}", path.display(), e);
                RagData::default()
            }
        };

        info!(
            "RAG store loaded from {}: {} documents, {} chunks",
            path.display(),
            data.documents.len(),
            data.chunks.len()
        );

        Self {
            path: Some(path),
            data: RwLock::new(data),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: RwLock::new(RagData::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Register a document and its chunks, then persist.
    pub async fn add_document(
        &self,
        name: &str,
        chunks: Vec<NewChunk>,
    ) -> Result<RagDocument, RagError> {
        if chunks.is_empty() {
            return Err(RagError::NoChunks);
        }

        let document = RagDocument {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            upload_date: Utc::now(),
            chunk_count: chunks.len(),
        };

        let mut data = self.data.write().await;
        data.documents.push(document.clone());
        data.chunks.extend(chunks.into_iter().map(|c| RagChunk {
            id: Uuid::new_v4().to_string(),
            doc_id: document.id.clone(),
            text: c.text,
            embedding: c.embedding,
            metadata: c.metadata,
        }));

        if let Err(e) = self.persist(&data).await {
            // Roll back so memory matches disk.
            data.chunks.retain(|c| c.doc_id != document.id);
            data.documents.retain(|d| d.id != document.id);
            return Err(e);
        }

        info!(
            "Stored document \"{}\" ({} chunks) as {}",
            document.name, document.chunk_count, document.id
        );
        Ok(document)
    }

    /// Top `limit` chunks by cosine similarity to `query`, best first.
    pub async fn search(&self, query: &[f32], limit: usize) -> Vec<ChunkMatch> {
        let data = self.data.read().await;
        let mut matches: Vec<ChunkMatch> = data
            .chunks
            .iter()
            .map(|chunk| ChunkMatch {
                score: cosine_similarity(query, &chunk.embedding),
                chunk: chunk.clone(),
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(limit);

        debug!(
            "RAG search over {} chunks returned {}",
            data.chunks.len(),
            matches.len()
        );
        matches
    }

    pub async fn documents(&self) -> Vec<RagDocument> {
        self.data.read().await.documents.clone()
    }

    pub async fn stats(&self) -> StoreStats {
        let data = self.data.read().await;
        StoreStats {
            documents: data.documents.len(),
            chunks: data.chunks.len(),
        }
    }

    async fn persist(&self, data: &RagData) -> Result<(), RagError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(data)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}
