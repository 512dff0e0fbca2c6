// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local knowledge base used to ground assistant answers

pub mod chunking;
pub mod embedding;
pub mod errors;
pub mod ingest;
pub mod retriever;
pub mod store;

pub use chunking::{split_paragraphs, DEFAULT_MIN_CHUNK_LEN};
pub use embedding::{cosine_similarity, Embedding, HashingEmbedder};
pub use errors::RagError;
pub use ingest::DocumentIngestor;
pub use retriever::{RagRetriever, DEFAULT_SEARCH_LIMIT};
pub use store::{ChunkMatch, NewChunk, RagChunk, RagDocument, RagStore, StoreStats};
