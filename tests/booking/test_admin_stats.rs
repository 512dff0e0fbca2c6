// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use campsite_booking::booking::{BookingInput, BookingService, GuestDetails, StayCatalog};
use campsite_booking::storage::{seed, Database};
use chrono::{Duration, Utc};
use rusqlite::params;
use std::sync::Arc;

fn input(stay_id: &str, email: &str) -> BookingInput {
    BookingInput {
        stay_id: Some(stay_id.to_string()),
        start_date: Some("2030-08-01".to_string()),
        end_date: Some("2030-08-05".to_string()),
        guest_details: Some(GuestDetails {
            first_name: "Louise".to_string(),
            last_name: "Martin".to_string(),
            email: email.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_monthly_revenue_counts_active_bookings_of_the_month() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    seed(&db).unwrap();
    let stays = StayCatalog::new(db.clone()).list_stays().await.unwrap();
    let service = BookingService::new(db.clone(), true);

    let current = service
        .create_booking(input(&stays[0].id, "current@example.com"))
        .await
        .unwrap();
    let cancelled = service
        .create_booking(input(&stays[1].id, "cancelled@example.com"))
        .await
        .unwrap();
    service.cancel_booking(&cancelled.booking.id).await.unwrap();
    let older = service
        .create_booking(input(&stays[2].id, "older@example.com"))
        .await
        .unwrap();

    // Forty days back always lands in an earlier month
    let earlier = Utc::now() - Duration::days(40);
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE bookings SET created_at = ?1 WHERE id = ?2",
            params![earlier, older.booking.id],
        )?;
        Ok(())
    })
    .unwrap();

    let stats = service.admin_stats(Utc::now().date_naive()).await.unwrap();
    assert_eq!(stats.total_bookings, 3);
    assert_eq!(stats.cancelled_bookings, 1);
    assert_eq!(stats.active_bookings, 2);
    assert!(current.booking.total_price > 0.0);
    assert_eq!(stats.monthly_revenue, current.booking.total_price);

    let stats = service.admin_stats(earlier.date_naive()).await.unwrap();
    assert_eq!(stats.monthly_revenue, older.booking.total_price);
}
