// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use serde_json::json;

use crate::common::{get, guest, post, stay_of_type, test_app};

#[tokio::test]
async fn test_list_and_get_stays() {
    let app = test_app(vec![]);

    let (status, body) = get(&app.app, "/api/stays").await;
    assert_eq!(status, StatusCode::OK);
    let stays = body.as_array().unwrap();
    assert_eq!(stays.len(), 350);
    assert!(stays.iter().any(|s| s["type"] == "Cottage"));

    let id = stays[0]["id"].as_str().unwrap();
    let (status, stay) = get(&app.app, &format!("/api/stays/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stay["id"], id);
    assert!(stay["basePrice"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_unknown_stay_is_404() {
    let app = test_app(vec![]);

    let (status, body) = get(&app.app, "/api/stays/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorType"], "not_found");
}

#[tokio::test]
async fn test_availability_requires_both_dates() {
    let app = test_app(vec![]);

    let (status, body) = get(&app.app, "/api/availability?startDate=2030-07-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Start date and end date are required");

    let (status, _) = get(
        &app.app,
        "/api/availability?startDate=2030-07-05&endDate=2030-07-01",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_filters_capacity_and_bookings() {
    let app = test_app(vec![]);
    let cottage = stay_of_type(&app, "Cottage").await;

    let (status, body) = get(
        &app.app,
        "/api/availability?startDate=2030-07-01&endDate=2030-07-04&guests=5",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let stays = body.as_array().unwrap();
    assert!(!stays.is_empty());
    assert!(stays.iter().all(|s| s["type"] != "Cottage"));

    let (status, _) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": cottage.id,
            "startDate": "2030-07-01",
            "endDate": "2030-07-04",
            "guests": 2,
            "guestDetails": guest("camille@example.com")
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(
        &app.app,
        "/api/availability?startDate=2030-07-03&endDate=2030-07-06",
    )
    .await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["id"].as_str())
        .collect();
    assert!(!ids.contains(&cottage.id.as_str()));

    // Checkout day is free again
    let (_, body) = get(
        &app.app,
        "/api/availability?startDate=2030-07-04&endDate=2030-07-06",
    )
    .await;
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["id"] == cottage.id.as_str()));
}

#[tokio::test]
async fn test_map_availability_marks_occupied_stays() {
    let app = test_app(vec![]);
    let pitch = stay_of_type(&app, "Plage").await;

    post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": pitch.id,
            "startDate": "2030-08-10",
            "endDate": "2030-08-12",
            "guestDetails": guest("map@example.com")
        }),
    )
    .await;

    let (status, body) = get(
        &app.app,
        "/api/map-availability?startDate=2030-08-11&endDate=2030-08-15",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let stays = body.as_array().unwrap();
    assert_eq!(stays.len(), 350);

    let entry = stays.iter().find(|s| s["id"] == pitch.id.as_str()).unwrap();
    assert_eq!(entry["status"], "occupied");
    assert_eq!(entry["category"], "Plage");
    assert_eq!(
        stays.iter().filter(|s| s["status"] == "occupied").count(),
        1
    );
}

#[tokio::test]
async fn test_supplements() {
    let app = test_app(vec![]);

    let (status, body) = get(&app.app, "/api/supplements").await;
    assert_eq!(status, StatusCode::OK);
    let supplements = body.as_array().unwrap();
    assert_eq!(supplements.len(), 2);
    assert!(supplements.iter().any(|s| s["type"] == "Cleaning"));
}
