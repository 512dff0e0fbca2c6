// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod bookings;
pub mod database;
pub mod error;
pub mod seed;
pub mod stays;
pub mod supplements;
pub mod users;

// Re-export main types for convenience
pub use database::{Database, DEFAULT_POOL_SIZE};
pub use error::{StorageError, StorageResult};
pub use seed::{seed, seed_if_empty, SeedSummary};
