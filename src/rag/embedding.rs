// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding vectors, similarity and an offline embedder

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::llm::{Embedder, LlmError};

/// Dimension of [`HashingEmbedder`] vectors
pub const DEFAULT_HASH_DIMENSION: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    pub fn magnitude(&self) -> f32 {
        magnitude(&self.data)
    }

    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        cosine_similarity(&self.data, &other.data)
    }

    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude > 0.0 {
            for value in &mut self.data {
                *value /= magnitude;
            }
        }
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine of the angle between `a` and `b`.
/// Returns 0.0 when dimensions differ or either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        0.0
    } else {
        dot_product / (magnitude_a * magnitude_b)
    }
}

/// Deterministic bag-of-words embedder.
///
/// Each lower-cased word is hashed into one of `dimension` buckets, so texts
/// sharing vocabulary score higher. Used when no embedding API key is
/// configured and in tests.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn bucket(&self, token: &str) -> usize {
        let hash = Sha256::digest(token.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash[..8]);
        (u64::from_le_bytes(bytes) % self.dimension as u64) as usize
    }

    pub fn embed_text(&self, text: &str) -> Embedding {
        let mut data = vec![0.0f32; self.dimension];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            data[self.bucket(&token.to_lowercase())] += 1.0;
        }
        let mut embedding = Embedding::new(data);
        embedding.normalize();
        embedding
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIMENSION)
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let embedding = self.embed_text(text);
        if embedding.magnitude() == 0.0 {
            return Err(LlmError::EmptyEmbedding);
        }
        Ok(embedding.into_vec())
    }

    fn name(&self) -> &'static str {
        "hashing"
    }
}
