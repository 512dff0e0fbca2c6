// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Booking and booking-supplement queries

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::StorageResult;
use super::stays::{stay_columns, stay_from_row};
use super::supplements::{supplement_from_row, SUPPLEMENT_COLUMNS};
use super::users::{user_from_row, USER_COLUMNS};
use crate::booking::types::{
    Booking, BookingDetails, BookingStatus, BookingSupplement, DateRange,
};

const BOOKING_COLUMNS: &str = "b.id, b.user_id, b.stay_id, b.start_date, b.end_date, b.guests, \
     b.status, b.total_price, b.created_at, b.updated_at";

// Column counts used to compute offsets in joined rows.
const BOOKING_WIDTH: usize = 10;
const STAY_WIDTH: usize = 12;

fn booking_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Booking> {
    let status: String = row.get(offset + 6)?;
    let status = status.parse::<BookingStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(offset + 6, Type::Text, e.into())
    })?;

    Ok(Booking {
        id: row.get(offset)?,
        user_id: row.get(offset + 1)?,
        stay_id: row.get(offset + 2)?,
        start_date: row.get(offset + 3)?,
        end_date: row.get(offset + 4)?,
        guests: row.get(offset + 5)?,
        status,
        total_price: row.get(offset + 7)?,
        created_at: row.get(offset + 8)?,
        updated_at: row.get(offset + 9)?,
    })
}

pub fn insert(conn: &Connection, booking: &Booking) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO bookings (id, user_id, stay_id, start_date, end_date, guests, status,
                               total_price, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            booking.id,
            booking.user_id,
            booking.stay_id,
            booking.start_date,
            booking.end_date,
            booking.guests,
            booking.status.as_str(),
            booking.total_price,
            booking.created_at,
            booking.updated_at,
        ],
    )?;
    Ok(())
}

/// Persist the mutable fields of an existing booking
pub fn update(conn: &Connection, booking: &Booking) -> StorageResult<usize> {
    let changed = conn.execute(
        "UPDATE bookings
         SET start_date = ?2, end_date = ?3, guests = ?4, status = ?5,
             total_price = ?6, updated_at = ?7
         WHERE id = ?1",
        params![
            booking.id,
            booking.start_date,
            booking.end_date,
            booking.guests,
            booking.status.as_str(),
            booking.total_price,
            booking.updated_at,
        ],
    )?;
    Ok(changed)
}

pub fn set_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
    now: DateTime<Utc>,
) -> StorageResult<usize> {
    let changed = conn.execute(
        "UPDATE bookings SET status = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, status.as_str(), now],
    )?;
    Ok(changed)
}

pub fn get(conn: &Connection, id: &str) -> StorageResult<Option<Booking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings b WHERE b.id = ?1");
    let booking = conn
        .query_row(&sql, params![id], |row| booking_from_row(row, 0))
        .optional()?;
    Ok(booking)
}

/// True when another active booking of `stay_id` overlaps `range`
pub fn has_conflict(
    conn: &Connection,
    stay_id: &str,
    range: &DateRange,
    exclude_booking: Option<&str>,
) -> StorageResult<bool> {
    let conflict: bool = conn.query_row(
        "SELECT EXISTS (
            SELECT 1 FROM bookings
            WHERE stay_id = ?1
              AND status != 'CANCELLED'
              AND start_date < ?3
              AND end_date > ?2
              AND (?4 IS NULL OR id != ?4)
         )",
        params![stay_id, range.start, range.end, exclude_booking],
        |row| row.get(0),
    )?;
    Ok(conflict)
}

pub fn insert_line(conn: &Connection, line: &BookingSupplement) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO booking_supplements (id, booking_id, supplement_id, quantity)
         VALUES (?1, ?2, ?3, ?4)",
        params![line.id, line.booking_id, line.supplement_id, line.quantity],
    )?;
    Ok(())
}

/// Swap every supplement line of a booking for `lines`
pub fn replace_lines(
    conn: &Connection,
    booking_id: &str,
    lines: &[BookingSupplement],
) -> StorageResult<()> {
    conn.execute(
        "DELETE FROM booking_supplements WHERE booking_id = ?1",
        params![booking_id],
    )?;
    for line in lines {
        insert_line(conn, line)?;
    }
    Ok(())
}

pub fn lines(conn: &Connection, booking_id: &str) -> StorageResult<Vec<BookingSupplement>> {
    let sql = format!(
        "SELECT l.id, l.booking_id, l.supplement_id, l.quantity, {SUPPLEMENT_COLUMNS}
         FROM booking_supplements l
         JOIN supplements p ON p.id = l.supplement_id
         WHERE l.booking_id = ?1
         ORDER BY p.name"
    );
    let mut stmt = conn.prepare(&sql)?;
    let lines = stmt
        .query_map(params![booking_id], |row| {
            Ok(BookingSupplement {
                id: row.get(0)?,
                booking_id: row.get(1)?,
                supplement_id: row.get(2)?,
                quantity: row.get(3)?,
                supplement: supplement_from_row(row, 4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines)
}

fn details_query(filter: &str, order: &str) -> String {
    format!(
        "SELECT {BOOKING_COLUMNS}, {stay}, {USER_COLUMNS}
         FROM bookings b
         JOIN stays s ON s.id = b.stay_id
         LEFT JOIN users u ON u.id = b.user_id
         {filter}
         {order}",
        stay = stay_columns(),
    )
}

fn collect_details(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> StorageResult<Vec<BookingDetails>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| {
            let booking = booking_from_row(row, 0)?;
            let stay = stay_from_row(row, BOOKING_WIDTH)?;
            let user_offset = BOOKING_WIDTH + STAY_WIDTH;
            let user = match row.get::<_, Option<String>>(user_offset)? {
                Some(_) => Some(user_from_row(row, user_offset)?),
                None => None,
            };
            Ok((booking, stay, user))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut details = Vec::with_capacity(rows.len());
    for (booking, stay, user) in rows {
        let supplements = lines(conn, &booking.id)?;
        details.push(BookingDetails {
            booking,
            stay,
            user,
            supplements,
        });
    }
    Ok(details)
}

pub fn details(conn: &Connection, id: &str) -> StorageResult<Option<BookingDetails>> {
    let sql = details_query("WHERE b.id = ?1", "");
    Ok(collect_details(conn, &sql, params![id])?.into_iter().next())
}

/// Bookings of the guest with this email, latest arrival first
pub fn details_by_email(conn: &Connection, email: &str) -> StorageResult<Vec<BookingDetails>> {
    let sql = details_query("WHERE u.email = ?1", "ORDER BY b.start_date DESC");
    collect_details(conn, &sql, params![email])
}

/// Every booking, most recently created first
pub fn all_details(conn: &Connection) -> StorageResult<Vec<BookingDetails>> {
    let sql = details_query("", "ORDER BY b.created_at DESC");
    collect_details(conn, &sql, [])
}

/// Booking counts as (total, active, cancelled)
pub fn status_counts(conn: &Connection) -> StorageResult<(usize, usize, usize)> {
    let (total, cancelled): (i64, i64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN status = 'CANCELLED' THEN 1 ELSE 0 END), 0)
         FROM bookings",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok((total as usize, (total - cancelled) as usize, cancelled as usize))
}

/// Distinct stays holding an active booking on `day`
pub fn occupied_on(conn: &Connection, day: NaiveDate) -> StorageResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT stay_id) FROM bookings
         WHERE status != 'CANCELLED' AND start_date <= ?1 AND end_date > ?1",
        params![day],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// Sum of active booking totals created in `[from, to)`
pub fn revenue_between(
    conn: &Connection,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> StorageResult<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(total_price), 0.0) FROM bookings
         WHERE status != 'CANCELLED' AND created_at >= ?1 AND created_at < ?2",
        params![from, to],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn delete_all(conn: &Connection) -> StorageResult<usize> {
    conn.execute("DELETE FROM booking_supplements", [])?;
    Ok(conn.execute("DELETE FROM bookings", [])?)
}
