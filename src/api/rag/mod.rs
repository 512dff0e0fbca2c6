// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Knowledge-base search endpoint

pub mod handler;
pub mod request;
pub mod response;

pub use handler::rag_search_handler;
pub use request::RagSearchRequest;
pub use response::{ChunkMetadata, RagSearchResponse};
