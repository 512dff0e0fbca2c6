// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::Deserialize;

/// Upper bound on passages returned by one search
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Request body for POST /api/rag/search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    /// Number of passages (default from configuration, usually 5)
    #[serde(default)]
    pub limit: Option<usize>,
}

impl RagSearchRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.query.as_deref().map_or(true, |q| q.trim().is_empty()) {
            return Err("Query is required".to_string());
        }
        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err("limit must be at least 1".to_string());
            }
            if limit > MAX_SEARCH_LIMIT {
                return Err(format!("limit cannot exceed {}", MAX_SEARCH_LIMIT));
            }
        }
        Ok(())
    }
}
