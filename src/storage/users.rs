// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Guest accounts keyed by email

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::StorageResult;
use crate::booking::types::User;

pub(crate) const USER_COLUMNS: &str =
    "u.id, u.email, u.first_name, u.last_name, u.phone, u.address, u.city, u.country, u.created_at";

pub(crate) fn user_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(offset)?,
        email: row.get(offset + 1)?,
        first_name: row.get(offset + 2)?,
        last_name: row.get(offset + 3)?,
        phone: row.get(offset + 4)?,
        address: row.get(offset + 5)?,
        city: row.get(offset + 6)?,
        country: row.get(offset + 7)?,
        created_at: row.get(offset + 8)?,
    })
}

pub fn insert(conn: &Connection, user: &User) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO users (id, email, first_name, last_name, phone, address, city, country, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            user.id,
            user.email,
            user.first_name,
            user.last_name,
            user.phone,
            user.address,
            user.city,
            user.country,
            user.created_at,
        ],
    )?;
    Ok(())
}

pub fn find_by_email(conn: &Connection, email: &str) -> StorageResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.email = ?1");
    let user = conn
        .query_row(&sql, params![email], |row| user_from_row(row, 0))
        .optional()?;
    Ok(user)
}

pub fn get(conn: &Connection, id: &str) -> StorageResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = ?1");
    let user = conn
        .query_row(&sql, params![id], |row| user_from_row(row, 0))
        .optional()?;
    Ok(user)
}
