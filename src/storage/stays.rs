// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stay catalogue queries

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::StorageResult;
use crate::booking::types::{DateRange, Stay};

const STAY_COLUMNS: &str = "s.id, s.name, s.type, s.capacity, s.surface, s.rooms, s.bathrooms, \
     s.description, s.base_price, s.images, s.zone_id, s.number";

/// Matches stays holding an active booking that overlaps ?1..?2
const ACTIVE_OVERLAP: &str = "EXISTS (
        SELECT 1 FROM bookings b
        WHERE b.stay_id = s.id
          AND b.status != 'CANCELLED'
          AND b.start_date < ?2
          AND b.end_date > ?1
    )";

pub(crate) fn stay_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Stay> {
    let images_json: String = row.get(offset + 9)?;
    let images: Vec<String> = serde_json::from_str(&images_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(offset + 9, Type::Text, Box::new(e)))?;

    Ok(Stay {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        stay_type: row.get(offset + 2)?,
        capacity: row.get(offset + 3)?,
        surface: row.get(offset + 4)?,
        rooms: row.get(offset + 5)?,
        bathrooms: row.get(offset + 6)?,
        description: row.get(offset + 7)?,
        base_price: row.get(offset + 8)?,
        images,
        zone_id: row.get(offset + 10)?,
        number: row.get(offset + 11)?,
    })
}

pub(crate) fn stay_columns() -> &'static str {
    STAY_COLUMNS
}

pub fn insert(conn: &Connection, stay: &Stay) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO stays (id, name, type, capacity, surface, rooms, bathrooms, description,
                            base_price, images, zone_id, number)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            stay.id,
            stay.name,
            stay.stay_type,
            stay.capacity,
            stay.surface,
            stay.rooms,
            stay.bathrooms,
            stay.description,
            stay.base_price,
            serde_json::to_string(&stay.images)?,
            stay.zone_id,
            stay.number,
        ],
    )?;
    Ok(())
}

pub fn list(conn: &Connection) -> StorageResult<Vec<Stay>> {
    let sql = format!(
        "SELECT {STAY_COLUMNS} FROM stays s ORDER BY s.zone_id, s.number, s.name"
    );
    let mut stmt = conn.prepare(&sql)?;
    let stays = stmt
        .query_map([], |row| stay_from_row(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stays)
}

pub fn get(conn: &Connection, id: &str) -> StorageResult<Option<Stay>> {
    let sql = format!("SELECT {STAY_COLUMNS} FROM stays s WHERE s.id = ?1");
    let stay = conn
        .query_row(&sql, params![id], |row| stay_from_row(row, 0))
        .optional()?;
    Ok(stay)
}

pub fn count(conn: &Connection) -> StorageResult<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM stays", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Stays holding at least `min_capacity` guests and free over `range`
pub fn available(conn: &Connection, range: &DateRange, min_capacity: u32) -> StorageResult<Vec<Stay>> {
    let sql = format!(
        "SELECT {STAY_COLUMNS} FROM stays s
         WHERE s.capacity >= ?3 AND NOT {ACTIVE_OVERLAP}
         ORDER BY s.base_price, s.zone_id, s.number"
    );
    let mut stmt = conn.prepare(&sql)?;
    let stays = stmt
        .query_map(params![range.start, range.end, min_capacity], |row| {
            stay_from_row(row, 0)
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stays)
}

/// Free stays whose type contains `type_query` (ASCII case-insensitive)
pub fn available_by_type(
    conn: &Connection,
    type_query: &str,
    range: &DateRange,
    limit: usize,
) -> StorageResult<Vec<Stay>> {
    let pattern = format!("%{}%", escape_like(type_query));
    let sql = format!(
        "SELECT {STAY_COLUMNS} FROM stays s
         WHERE s.type LIKE ?3 ESCAPE '\\' AND NOT {ACTIVE_OVERLAP}
         ORDER BY s.base_price, s.zone_id, s.number
         LIMIT ?4"
    );
    let mut stmt = conn.prepare(&sql)?;
    let stays = stmt
        .query_map(
            params![range.start, range.end, pattern, limit as i64],
            |row| stay_from_row(row, 0),
        )?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stays)
}

/// Every stay paired with whether an active booking overlaps `range`
pub fn with_occupancy(conn: &Connection, range: &DateRange) -> StorageResult<Vec<(Stay, bool)>> {
    let sql = format!(
        "SELECT {STAY_COLUMNS}, {ACTIVE_OVERLAP} AS occupied
         FROM stays s
         ORDER BY s.zone_id, s.number"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![range.start, range.end], |row| {
            Ok((stay_from_row(row, 0)?, row.get::<_, bool>(12)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn delete_all(conn: &Connection) -> StorageResult<usize> {
    Ok(conn.execute("DELETE FROM stays", [])?)
}

fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
