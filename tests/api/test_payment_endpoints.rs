// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use campsite_booking::config::AppConfig;
use serde_json::json;

use crate::common::{get, guest, post, stay_of_type, test_app, test_app_with};

#[tokio::test]
async fn test_payment_confirms_pending_booking() {
    let mut config = AppConfig::default();
    config.booking.auto_confirm = false;
    let app = test_app_with(config, vec![]);
    let pitch = stay_of_type(&app, "Standard").await;

    let (_, booking) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": pitch.id,
            "startDate": "2030-06-10",
            "endDate": "2030-06-12",
            "guestDetails": guest("pay@example.com")
        }),
    )
    .await;
    assert_eq!(booking["status"], "PENDING");
    let id = booking["id"].as_str().unwrap();

    let (status, body) = get(&app.app, &format!("/api/payment?idOrder={}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], 0);

    let (status, body) = post(
        &app.app,
        "/api/payment",
        json!({
            "idOrder": id,
            "paymentType": "CB",
            "value": "90.00",
            "payment": { "cardNumber": "4111111111111111" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let receipt = &body["result"];
    assert_eq!(receipt["error"], 0);
    assert_eq!(receipt["paymentValue"], 90.0);
    assert!(receipt["idPayment"].as_str().unwrap().starts_with('P'));
    assert_eq!(receipt["idUser"], booking["userId"]);

    let (_, body) = get(&app.app, &format!("/api/payment?idOrder={}", id)).await;
    let report = &body["result"];
    assert_eq!(report["status"], 10);
    assert_eq!(report["email"], "pay@example.com");
    assert_eq!(report["price"], 90.0);
    assert_eq!(report["begin"], "2030-06-10");
}

#[tokio::test]
async fn test_payment_validation() {
    let app = test_app(vec![]);

    let (status, _) = post(&app.app, "/api/payment", json!({ "value": 10 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app.app,
        "/api/payment",
        json!({ "idOrder": "unknown", "value": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app.app,
        "/api/payment",
        json!({ "idOrder": "unknown", "value": "abc" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app.app, "/api/payment").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
