// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Booking lifecycle: creation, lookup, modification, cancellation and
//! back-office reporting.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::errors::BookingError;
use super::modification::{self, ModificationRequest, PlannedChange, PriceSimulation};
use super::pricing;
use super::types::{
    parse_date, Booking, BookingDetails, BookingStatus, BookingSupplement, DateRange,
    GuestDetails, NumberOrText, SupplementSelection, User,
};
use crate::storage::{bookings, stays, supplements, users, Database};

/// Booking form payload. Every field is optional on the wire so that
/// incomplete submissions can be reported as a single validation error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub stay_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub guests: Option<NumberOrText>,
    pub guest_details: Option<GuestDetails>,
    #[serde(default)]
    pub supplements: Vec<SupplementSelection>,
    /// Total computed by the client; informational only
    pub total_price: Option<NumberOrText>,
}

struct ValidBooking {
    stay_id: String,
    range: DateRange,
    guests: u32,
    guest: GuestDetails,
    supplements: Vec<SupplementSelection>,
    client_total: Option<f64>,
}

impl BookingInput {
    fn validate(self) -> Result<ValidBooking, BookingError> {
        let mut missing = Vec::new();
        let stay_id = non_empty(self.stay_id);
        let start = non_empty(self.start_date);
        let end = non_empty(self.end_date);
        let guest = self.guest_details.filter(|g| !g.email.trim().is_empty());

        if stay_id.is_none() {
            missing.push("stayId");
        }
        if start.is_none() {
            missing.push("startDate");
        }
        if end.is_none() {
            missing.push("endDate");
        }
        if guest.is_none() {
            missing.push("guestDetails");
        }

        let (Some(stay_id), Some(start), Some(end), Some(mut guest)) = (stay_id, start, end, guest)
        else {
            return Err(BookingError::MissingField(missing.join(", ")));
        };
        guest.email = guest.email.trim().to_string();

        let guests = match self.guests {
            None => 1,
            Some(raw) => match raw.as_count() {
                Some(n) if n >= 1 => n,
                Some(n) => return Err(BookingError::InvalidGuestCount(n)),
                None => return Err(BookingError::InvalidGuestCount(0)),
            },
        };

        Ok(ValidBooking {
            stay_id,
            range: DateRange::new(parse_date(&start)?, parse_date(&end)?)?,
            guests,
            guest,
            supplements: self.supplements,
            client_total: self.total_price.as_ref().and_then(NumberOrText::as_f64),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Back-office dashboard figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_bookings: usize,
    pub active_bookings: usize,
    pub cancelled_bookings: usize,
    pub total_stays: usize,
    pub occupied_today: usize,
    /// Percentage of stays occupied today, one decimal
    pub occupancy_rate: f64,
    /// Revenue of active bookings created this month, EUR
    pub monthly_revenue: f64,
}

#[derive(Clone)]
pub struct BookingService {
    db: Arc<Database>,
    auto_confirm: bool,
}

impl BookingService {
    pub fn new(db: Arc<Database>, auto_confirm: bool) -> Self {
        Self { db, auto_confirm }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    pub async fn create_booking(&self, input: BookingInput) -> Result<BookingDetails, BookingError> {
        let request = input.validate()?;
        let status = if self.auto_confirm {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Pending
        };
        let now = Utc::now();

        let details = self.db.with_tx(|tx| -> Result<BookingDetails, BookingError> {
            let stay = stays::get(tx, &request.stay_id)?
                .ok_or_else(|| BookingError::StayNotFound(request.stay_id.clone()))?;
            if request.guests > stay.capacity {
                return Err(BookingError::CapacityExceeded {
                    capacity: stay.capacity,
                });
            }
            if bookings::has_conflict(tx, &stay.id, &request.range, None)? {
                return Err(BookingError::Unavailable);
            }

            let booking_id = uuid::Uuid::new_v4().to_string();
            let mut lines: Vec<BookingSupplement> = Vec::with_capacity(request.supplements.len());
            for selection in &request.supplements {
                let supplement = supplements::get(tx, &selection.id)?
                    .ok_or_else(|| BookingError::SupplementNotFound(selection.id.clone()))?;
                lines.push(BookingSupplement {
                    id: uuid::Uuid::new_v4().to_string(),
                    booking_id: booking_id.clone(),
                    supplement_id: supplement.id.clone(),
                    quantity: selection.effective_quantity(),
                    supplement,
                });
            }

            let quote = pricing::quote(&stay, &request.range, &lines);
            if let Some(client_total) = request.client_total {
                if !pricing::same_amount(client_total, quote.total) {
                    warn!(
                        "Client total {:.2} for stay {} differs from computed {:.2}; using computed",
                        client_total, stay.id, quote.total
                    );
                }
            }

            let user = match users::find_by_email(tx, &request.guest.email)? {
                Some(user) => user,
                None => {
                    let guest = &request.guest;
                    let user = User {
                        id: uuid::Uuid::new_v4().to_string(),
                        email: guest.email.clone(),
                        first_name: guest.first_name.clone(),
                        last_name: guest.last_name.clone(),
                        phone: guest.phone.clone(),
                        address: guest.address.clone(),
                        city: guest.city.clone(),
                        country: guest.country.clone(),
                        created_at: now,
                    };
                    users::insert(tx, &user)?;
                    debug!("Created guest account {}", user.id);
                    user
                }
            };

            let booking = Booking {
                id: booking_id.clone(),
                user_id: user.id.clone(),
                stay_id: stay.id.clone(),
                start_date: request.range.start,
                end_date: request.range.end,
                guests: request.guests,
                status,
                total_price: quote.total,
                created_at: now,
                updated_at: now,
            };
            bookings::insert(tx, &booking)?;
            for line in &lines {
                bookings::insert_line(tx, line)?;
            }

            Ok(BookingDetails {
                booking,
                stay,
                user: Some(user),
                supplements: lines,
            })
        })?;

        info!(
            "Booking {} created for stay {} ({} to {}, {:.2} EUR, {})",
            details.booking.id,
            details.stay.id,
            details.booking.start_date,
            details.booking.end_date,
            details.booking.total_price,
            details.booking.status
        );
        Ok(details)
    }

    /// Look bookings up by guest email (when the query contains `@`) or by id
    pub async fn find_bookings(&self, query: Option<&str>) -> Result<Vec<BookingDetails>, BookingError> {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(BookingError::MissingQuery)?;

        if query.contains('@') {
            return Ok(self
                .db
                .with_conn(|conn| bookings::details_by_email(conn, query))?);
        }

        let found = self.db.with_conn(|conn| bookings::details(conn, query))?;
        Ok(found.into_iter().collect())
    }

    pub async fn get_booking(&self, id: &str) -> Result<BookingDetails, BookingError> {
        self.db
            .with_conn(|conn| bookings::details(conn, id))?
            .ok_or_else(|| BookingError::BookingNotFound(id.to_string()))
    }

    /// Cancel a booking. Cancelling twice is a no-op.
    pub async fn cancel_booking(&self, id: &str) -> Result<Booking, BookingError> {
        let now = Utc::now();
        let booking = self.db.with_tx(|tx| -> Result<Booking, BookingError> {
            let mut booking = bookings::get(tx, id)?
                .ok_or_else(|| BookingError::BookingNotFound(id.to_string()))?;
            if booking.status != BookingStatus::Cancelled {
                bookings::set_status(tx, id, BookingStatus::Cancelled, now)?;
                booking.status = BookingStatus::Cancelled;
                booking.updated_at = now;
            }
            Ok(booking)
        })?;
        info!("Booking {} cancelled", id);
        Ok(booking)
    }

    /// Price a modification without saving it
    pub async fn simulate(
        &self,
        id: &str,
        request: &ModificationRequest,
    ) -> Result<PriceSimulation, BookingError> {
        // Nothing is written; the transaction keeps pricing and the conflict
        // check on one snapshot.
        self.db.with_tx(|tx| -> Result<PriceSimulation, BookingError> {
            let current = bookings::details(tx, id)?
                .ok_or_else(|| BookingError::BookingNotFound(id.to_string()))?;
            let catalogue = supplements::list(tx)?;
            let plan = modification::plan(&current, request, &catalogue)?;
            if let PlannedChange::Dates(range) = &plan.change {
                if bookings::has_conflict(tx, &current.booking.stay_id, range, Some(id))? {
                    return Err(BookingError::Unavailable);
                }
            }
            Ok(PriceSimulation::new(current.booking.total_price, plan.new_total))
        })
    }

    /// Apply a modification and return the updated booking
    pub async fn modify(
        &self,
        id: &str,
        request: &ModificationRequest,
    ) -> Result<BookingDetails, BookingError> {
        let now = Utc::now();
        let details = self.db.with_tx(|tx| -> Result<BookingDetails, BookingError> {
            let current = bookings::details(tx, id)?
                .ok_or_else(|| BookingError::BookingNotFound(id.to_string()))?;
            let catalogue = supplements::list(tx)?;
            let plan = modification::plan(&current, request, &catalogue)?;

            let mut booking = current.booking.clone();
            match &plan.change {
                PlannedChange::Dates(range) => {
                    if bookings::has_conflict(tx, &booking.stay_id, range, Some(id))? {
                        return Err(BookingError::Unavailable);
                    }
                    booking.start_date = range.start;
                    booking.end_date = range.end;
                }
                PlannedChange::Guests(guests) => booking.guests = *guests,
                PlannedChange::Supplements(lines) => bookings::replace_lines(tx, id, lines)?,
            }
            booking.total_price = plan.new_total;
            booking.updated_at = now;
            bookings::update(tx, &booking)?;

            bookings::details(tx, id)?.ok_or_else(|| BookingError::BookingNotFound(id.to_string()))
        })?;

        info!(
            "Booking {} modified ({:?}), total now {:.2} EUR",
            id, request.change_type, details.booking.total_price
        );
        Ok(details)
    }

    /// Every booking with its stay, guest and supplements, newest first
    pub async fn admin_bookings(&self) -> Result<Vec<BookingDetails>, BookingError> {
        Ok(self.db.with_conn(bookings::all_details)?)
    }

    pub async fn admin_stats(&self, today: NaiveDate) -> Result<AdminStats, BookingError> {
        let (month_start, month_end) = month_bounds(today);
        let stats = self.db.with_conn(|conn| {
            let (total, active, cancelled) = bookings::status_counts(conn)?;
            let total_stays = stays::count(conn)?;
            let occupied = bookings::occupied_on(conn, today)?;
            let revenue = bookings::revenue_between(conn, month_start, month_end)?;
            Ok(AdminStats {
                total_bookings: total,
                active_bookings: active,
                cancelled_bookings: cancelled,
                total_stays,
                occupied_today: occupied,
                occupancy_rate: occupancy_rate(occupied, total_stays),
                monthly_revenue: revenue,
            })
        })?;
        Ok(stats)
    }
}

fn occupancy_rate(occupied: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (occupied as f64 * 1000.0 / total as f64).round() / 10.0
}

/// First instant of `day`'s month and of the following month
fn month_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = day.with_day(1).unwrap_or(day);
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .unwrap_or(first);
    let start_of = |d: NaiveDate| Utc.from_utc_datetime(&d.and_time(chrono::NaiveTime::MIN));
    (start_of(first), start_of(next))
}
