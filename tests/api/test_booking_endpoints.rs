// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::{get, guest, post, put, stay_of_type, test_app, TestApp};

async fn sheet_id(app: &TestApp) -> String {
    let (_, body) = get(&app.app, "/api/supplements").await;
    body.as_array()
        .unwrap()
        .iter()
        .find(|s| s["type"] == "Sheet")
        .and_then(|s| s["id"].as_str())
        .unwrap()
        .to_string()
}

async fn book_cottage(app: &TestApp, email: &str) -> Value {
    let cottage = stay_of_type(app, "Cottage").await;
    let sheets = sheet_id(app).await;
    let (status, body) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": cottage.id,
            "startDate": "2030-07-01",
            "endDate": "2030-07-04",
            "guests": "3",
            "guestDetails": guest(email),
            "supplements": [{ "id": sheets, "quantity": 2 }],
            "totalPrice": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body
}

#[tokio::test]
async fn test_create_booking_prices_on_server() {
    let app = test_app(vec![]);
    let booking = book_cottage(&app, "camille@example.com").await;

    // 3 nights at 120 plus two pairs of sheets at 12
    assert_eq!(booking["totalPrice"], 384.0);
    assert_eq!(booking["status"], "CONFIRMED");
    assert_eq!(booking["guests"], 3);
    assert_eq!(booking["user"]["email"], "camille@example.com");
    assert_eq!(booking["supplements"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_create_booking_validation() {
    let app = test_app(vec![]);
    let cottage = stay_of_type(&app, "Cottage").await;

    let (status, body) = post(&app.app, "/api/booking", json!({ "stayId": cottage.id })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("startDate"));
    assert!(message.contains("guestDetails"));

    let (status, body) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": cottage.id,
            "startDate": "2030-07-01",
            "endDate": "2030-07-03",
            "guests": 6,
            "guestDetails": guest("big@example.com")
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Maximum capacity is 4 guests");

    let (status, _) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": "missing",
            "startDate": "2030-07-01",
            "endDate": "2030-07-03",
            "guestDetails": guest("ghost@example.com")
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = test_app(vec![]);
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/booking")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();

    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overlapping_booking_conflicts() {
    let app = test_app(vec![]);
    let first = book_cottage(&app, "first@example.com").await;

    let (status, body) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": first["stayId"],
            "startDate": "2030-07-03",
            "endDate": "2030-07-05",
            "guestDetails": guest("second@example.com")
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorType"], "conflict");

    // Back-to-back stays share the changeover day
    let (status, _) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": first["stayId"],
            "startDate": "2030-07-04",
            "endDate": "2030-07-06",
            "guestDetails": guest("second@example.com")
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_find_bookings_by_email_or_id() {
    let app = test_app(vec![]);
    let booking = book_cottage(&app, "lookup@example.com").await;
    let id = booking["id"].as_str().unwrap();

    let (status, body) = get(&app.app, "/api/booking?q=lookup@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = get(&app.app, &format!("/api/booking?q={}", id)).await;
    assert_eq!(body[0]["id"], id);

    let (_, body) = get(&app.app, "/api/booking?q=nobody@example.com").await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = get(&app.app, "/api/booking").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app.app, &format!("/api/booking/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stay"]["type"], "Cottage");
}

#[tokio::test]
async fn test_simulate_then_modify_dates() {
    let app = test_app(vec![]);
    let booking = book_cottage(&app, "dates@example.com").await;
    let id = booking["id"].as_str().unwrap();

    let change = json!({
        "changeType": "stay",
        "startDate": "2030-07-01",
        "endDate": "2030-07-06"
    });

    let (status, simulation) = post(
        &app.app,
        &format!("/api/booking/{}/simulate", id),
        change.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(simulation["oldPrice"], 384.0);
    assert_eq!(simulation["newPrice"], 624.0);
    assert_eq!(simulation["difference"], 240.0);
    assert_eq!(simulation["currency"], "EUR");

    // Simulation writes nothing
    let (_, unchanged) = get(&app.app, &format!("/api/booking/{}", id)).await;
    assert_eq!(unchanged["totalPrice"], 384.0);

    let (status, updated) = put(&app.app, &format!("/api/booking/{}", id), change).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["endDate"], "2030-07-06");
    assert_eq!(updated["totalPrice"], 624.0);
}

#[tokio::test]
async fn test_modify_guests_and_supplements() {
    let app = test_app(vec![]);
    let booking = book_cottage(&app, "party@example.com").await;
    let id = booking["id"].as_str().unwrap();

    let (status, body) = put(
        &app.app,
        &format!("/api/booking/{}", id),
        json!({ "changeType": "friends", "guests": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Maximum capacity is 4 guests");

    let (status, body) = put(
        &app.app,
        &format!("/api/booking/{}", id),
        json!({ "changeType": "friends", "guests": 4 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guests"], 4);
    assert_eq!(body["totalPrice"], 384.0);

    let (status, body) = put(
        &app.app,
        &format!("/api/booking/{}", id),
        json!({ "changeType": "rubrics", "supplements": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPrice"], 360.0);
    assert!(body["supplements"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancelled_booking_cannot_change() {
    let app = test_app(vec![]);
    let booking = book_cottage(&app, "cancel@example.com").await;
    let id = booking["id"].as_str().unwrap();

    let (status, body) = post(&app.app, &format!("/api/booking/{}/cancel", id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CANCELLED");

    // Second cancel is a no-op
    let (status, _) = post(&app.app, &format!("/api/booking/{}/cancel", id), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = put(
        &app.app,
        &format!("/api/booking/{}", id),
        json!({ "changeType": "friends", "guests": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The stay is free again
    let (status, _) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": booking["stayId"],
            "startDate": "2030-07-01",
            "endDate": "2030-07-04",
            "guestDetails": guest("next@example.com")
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_booking_is_404() {
    let app = test_app(vec![]);

    let (status, _) = get(&app.app, "/api/booking/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app.app,
        "/api/booking/nope/simulate",
        json!({ "changeType": "friends", "guests": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
