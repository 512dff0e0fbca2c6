// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use campsite_booking::booking::{
    BookingInput, BookingService, BookingStatus, GuestDetails, StayCatalog,
};
use campsite_booking::storage::{seed, seed_if_empty, Database};
use std::sync::Arc;
use tempfile::TempDir;

fn guest() -> GuestDetails {
    GuestDetails {
        first_name: "Jeanne".to_string(),
        last_name: "Durand".to_string(),
        email: "jeanne@example.com".to_string(),
        city: Some("Sète".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_bookings_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("campsite.db");

    let booking_id = {
        let db = Arc::new(Database::open(&path, 2).unwrap());
        assert!(seed_if_empty(&db).unwrap().is_some());

        let catalog = StayCatalog::new(db.clone());
        let stay = catalog.list_stays().await.unwrap().remove(0);
        let service = BookingService::new(db, false);
        let details = service
            .create_booking(BookingInput {
                stay_id: Some(stay.id),
                start_date: Some("2030-09-01".to_string()),
                end_date: Some("2030-09-08".to_string()),
                guest_details: Some(guest()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(details.booking.status, BookingStatus::Pending);
        details.booking.id
    };

    let db = Arc::new(Database::open(&path, 2).unwrap());
    // Catalogue already present: nothing reseeded, bookings kept
    assert!(seed_if_empty(&db).unwrap().is_none());

    let service = BookingService::new(db, true);
    let details = service.get_booking(&booking_id).await.unwrap();
    assert_eq!(details.booking.status, BookingStatus::Pending);
    assert_eq!(details.booking.range().nights(), 7);
    let user = details.user.unwrap();
    assert_eq!(user.city.as_deref(), Some("Sète"));

    let found = service
        .find_bookings(Some("jeanne@example.com"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_reseed_clears_bookings() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    seed(&db).unwrap();

    let catalog = StayCatalog::new(db.clone());
    let stay = catalog.list_stays().await.unwrap().remove(0);
    let service = BookingService::new(db.clone(), true);
    service
        .create_booking(BookingInput {
            stay_id: Some(stay.id),
            start_date: Some("2030-09-01".to_string()),
            end_date: Some("2030-09-03".to_string()),
            guest_details: Some(guest()),
            ..Default::default()
        })
        .await
        .unwrap();

    let summary = seed(&db).unwrap();
    assert_eq!(summary.stays, 350);
    assert_eq!(summary.supplements, 2);
    assert!(service.admin_bookings().await.unwrap().is_empty());
}
