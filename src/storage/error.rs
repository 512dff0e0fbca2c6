// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the relational store

use thiserror::Error;

/// Errors raised by the SQLite-backed store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A migration script failed to apply
    #[error("Migration {version} failed: {source}")]
    Migration {
        version: i64,
        source: rusqlite::Error,
    },

    /// A pooled connection mutex was poisoned by a panicking holder
    #[error("Connection pool poisoned: {0}")]
    PoolPoisoned(String),

    /// A JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored value does not map to a known variant
    #[error("Corrupt row in {table}: {reason}")]
    CorruptRow { table: &'static str, reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;
