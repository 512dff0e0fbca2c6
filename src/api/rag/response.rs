// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::rag::ChunkMatch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    pub doc_id: String,
    pub score: f32,
}

/// Passage texts and, at the same index, their origin and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagSearchResponse {
    pub chunks: Vec<String>,
    pub metadata: Vec<ChunkMetadata>,
}

impl From<Vec<ChunkMatch>> for RagSearchResponse {
    fn from(matches: Vec<ChunkMatch>) -> Self {
        let (chunks, metadata) = matches
            .into_iter()
            .map(|m| {
                (
                    m.chunk.text,
                    ChunkMetadata {
                        doc_id: m.chunk.doc_id,
                        score: m.score,
                    },
                )
            })
            .unzip();
        Self { chunks, metadata }
    }
}
