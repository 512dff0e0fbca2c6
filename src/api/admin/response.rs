// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::rag::{RagDocument, StoreStats};

/// Response of POST /api/admin/documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUploadResponse {
    pub success: bool,
    pub message: String,
    pub doc_id: String,
}

impl DocumentUploadResponse {
    pub fn new(document: &RagDocument) -> Self {
        Self {
            success: true,
            message: format!(
                "Fichier \"{}\" ingéré ({} segments)",
                document.name, document.chunk_count
            ),
            doc_id: document.id.clone(),
        }
    }
}

/// Response of GET /api/admin/documents
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListResponse {
    pub documents: Vec<RagDocument>,
    pub total_chunks: usize,
}

impl DocumentListResponse {
    pub fn new(documents: Vec<RagDocument>, stats: StoreStats) -> Self {
        Self {
            documents,
            total_chunks: stats.chunks,
        }
    }
}
