// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Supplement catalogue

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::StorageResult;
use crate::booking::types::Supplement;

pub(crate) const SUPPLEMENT_COLUMNS: &str = "p.id, p.name, p.price, p.type";

pub(crate) fn supplement_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Supplement> {
    Ok(Supplement {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        price: row.get(offset + 2)?,
        supplement_type: row.get(offset + 3)?,
    })
}

pub fn insert(conn: &Connection, supplement: &Supplement) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO supplements (id, name, price, type) VALUES (?1, ?2, ?3, ?4)",
        params![
            supplement.id,
            supplement.name,
            supplement.price,
            supplement.supplement_type
        ],
    )?;
    Ok(())
}

pub fn list(conn: &Connection) -> StorageResult<Vec<Supplement>> {
    let sql = format!("SELECT {SUPPLEMENT_COLUMNS} FROM supplements p ORDER BY p.name");
    let mut stmt = conn.prepare(&sql)?;
    let supplements = stmt
        .query_map([], |row| supplement_from_row(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(supplements)
}

pub fn get(conn: &Connection, id: &str) -> StorageResult<Option<Supplement>> {
    let sql = format!("SELECT {SUPPLEMENT_COLUMNS} FROM supplements p WHERE p.id = ?1");
    let supplement = conn
        .query_row(&sql, params![id], |row| supplement_from_row(row, 0))
        .optional()?;
    Ok(supplement)
}

pub fn delete_all(conn: &Connection) -> StorageResult<usize> {
    Ok(conn.execute("DELETE FROM supplements", [])?)
}
