// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SQLite connection pool and schema migrations

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use tracing::{debug, info};

use super::error::{StorageError, StorageResult};

/// Default number of pooled connections.
/// WAL mode allows one writer and several readers, so a handful of
/// connections is enough to keep reads from queueing behind writes.
pub const DEFAULT_POOL_SIZE: usize = 4;

const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("../../migrations/001_initial.sql"))];

/// Round-robin pool of mutex-guarded SQLite connections
pub struct Database {
    pool: Vec<Mutex<Connection>>,
    next_slot: AtomicUsize,
}

impl Database {
    /// Open (or create) a database file and apply pending migrations
    pub fn open(path: &Path, pool_size: usize) -> StorageResult<Self> {
        let pool_size = pool_size.max(1);
        let mut pool = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let conn = Connection::open(path)?;
            conn.execute_batch(
                "PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000;",
            )?;
            pool.push(Mutex::new(conn));
        }

        info!("Opened SQLite database at {} ({} connections)", path.display(), pool_size);
        Self::from_pool(pool)
    }

    /// Open a private in-memory database on a single connection.
    ///
    /// Shared-cache connections fail with SQLITE_LOCKED on concurrent writes
    /// instead of honouring `busy_timeout`, so callers queue on the one mutex.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Self::from_pool(vec![Mutex::new(conn)])
    }

    fn from_pool(pool: Vec<Mutex<Connection>>) -> StorageResult<Self> {
        let db = Self {
            pool,
            next_slot: AtomicUsize::new(0),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run a closure against the next pooled connection.
    ///
    /// The closure is synchronous, so the guard is always released before the
    /// caller reaches its next `.await`.
    pub fn with_conn<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let idx = self.next_slot.fetch_add(1, Ordering::Relaxed) % self.pool.len();
        let conn = self.pool[idx]
            .lock()
            .map_err(|e| StorageError::PoolPoisoned(e.to_string()))?;
        f(&conn)
    }

    /// Run a closure inside an IMMEDIATE transaction.
    ///
    /// The write lock is taken up front so that check-then-insert sequences
    /// (availability check followed by the booking insert) cannot interleave
    /// across pooled connections. The transaction commits when the closure
    /// returns `Ok` and rolls back otherwise.
    ///
    /// The error type is left to the caller so that domain checks made inside
    /// the closure can abort the transaction with their own errors.
    pub fn with_tx<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<StorageError>,
    {
        let idx = self.next_slot.fetch_add(1, Ordering::Relaxed) % self.pool.len();
        let mut conn = self.pool[idx]
            .lock()
            .map_err(|e| StorageError::PoolPoisoned(e.to_string()))?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StorageError::from)?;
        let value = f(&tx)?;
        tx.commit().map_err(StorageError::from)?;
        Ok(value)
    }

    /// Number of pooled connections
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    fn run_migrations(&self) -> StorageResult<()> {
        // Slot 0 only: migrations need exclusive access.
        let conn = self.pool[0]
            .lock()
            .map_err(|e| StorageError::PoolPoisoned(e.to_string()))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version    INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )?;

        for (version, sql) in MIGRATIONS {
            let applied: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = ?1)",
                params![version],
                |row| row.get(0),
            )?;
            if applied {
                continue;
            }

            conn.execute_batch(sql).map_err(|source| StorageError::Migration {
                version: *version,
                source,
            })?;
            conn.execute(
                "INSERT INTO schema_migrations (version) VALUES (?1)",
                params![version],
            )?;
            debug!("Applied migration {:03}", version);
        }

        Ok(())
    }
}
