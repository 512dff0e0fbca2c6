// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use campsite_booking::config::AppConfig;
use chrono::{Duration, Utc};
use serde_json::json;

use crate::common::{get, guest, post, stay_of_type, test_app, test_app_with, upload};

const GUIDE: &str = "La piscine chauffée est ouverte de 10h à 19h, bonnet de bain conseillé.\n\n\
Les animaux sont acceptés sur les emplacements, tenus en laisse dans le camping.\n\n\
Court.";

#[tokio::test]
async fn test_admin_stats_reflect_bookings() {
    let app = test_app(vec![]);
    let cottage = stay_of_type(&app, "Cottage").await;
    let today = Utc::now().date_naive();

    let (_, booking) = post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": cottage.id,
            "startDate": today.to_string(),
            "endDate": (today + Duration::days(2)).to_string(),
            "guestDetails": guest("stats@example.com")
        }),
    )
    .await;
    assert_eq!(booking["totalPrice"], 240.0);

    let (status, stats) = get(&app.app, "/api/admin/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalBookings"], 1);
    assert_eq!(stats["activeBookings"], 1);
    assert_eq!(stats["cancelledBookings"], 0);
    assert_eq!(stats["totalStays"], 350);
    assert_eq!(stats["occupiedToday"], 1);
    assert_eq!(stats["occupancyRate"], 0.3);
    assert_eq!(stats["monthlyRevenue"], 240.0);

    let id = booking["id"].as_str().unwrap();
    post(&app.app, &format!("/api/booking/{}/cancel", id), json!({})).await;

    let (_, stats) = get(&app.app, "/api/admin/stats").await;
    assert_eq!(stats["cancelledBookings"], 1);
    assert_eq!(stats["occupiedToday"], 0);
    assert_eq!(stats["monthlyRevenue"], 0.0);
}

#[tokio::test]
async fn test_admin_bookings_lists_details() {
    let app = test_app(vec![]);
    let pitch = stay_of_type(&app, "Premium").await;

    post(
        &app.app,
        "/api/booking",
        json!({
            "stayId": pitch.id,
            "startDate": "2030-05-01",
            "endDate": "2030-05-03",
            "guestDetails": guest("admin@example.com")
        }),
    )
    .await;

    let (status, body) = get(&app.app, "/api/admin/bookings").await;
    assert_eq!(status, StatusCode::OK);
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["stay"]["id"], pitch.id.as_str());
    assert_eq!(bookings[0]["user"]["email"], "admin@example.com");
}

#[tokio::test]
async fn test_upload_and_list_documents() {
    let app = test_app(vec![]);

    let (status, body) = upload(&app.app, "file", "guide.txt", GUIDE.as_bytes()).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Fichier \"guide.txt\" ingéré (2 segments)");
    let doc_id = body["docId"].as_str().unwrap().to_string();

    let (status, body) = get(&app.app, "/api/admin/documents").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalChunks"], 2);
    assert_eq!(body["documents"][0]["id"], doc_id.as_str());
    assert_eq!(body["documents"][0]["name"], "guide.txt");
    assert_eq!(body["documents"][0]["chunkCount"], 2);
}

#[tokio::test]
async fn test_upload_errors() {
    let app = test_app(vec![]);

    let (status, body) = upload(&app.app, "attachment", "guide.txt", GUIDE.as_bytes()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");

    let (status, _) = upload(&app.app, "file", "vide.txt", b"Court.\n\nTrop court.").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = upload(&app.app, "file", "image.bin", &[0xff, 0xfe, 0x00, 0x81]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_size_limit() {
    let mut config = AppConfig::default();
    config.rag.max_upload_bytes = 64;
    let app = test_app_with(config, vec![]);

    let (status, body) = upload(&app.app, "file", "guide.txt", GUIDE.as_bytes()).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["errorType"], "payload_too_large");
}

#[tokio::test]
async fn test_upload_far_over_body_limit_is_413() {
    let mut config = AppConfig::default();
    config.rag.max_upload_bytes = 64;
    let app = test_app_with(config, vec![]);

    // Larger than the request body limit, rejected while streaming
    let content = "Le camping ouvre en avril.\n\n".repeat(8 * 1024);
    assert!(content.len() > 200 * 1024);
    let (status, body) = upload(&app.app, "file", "enorme.txt", content.as_bytes()).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["errorType"], "payload_too_large");

    let (_, listing) = get(&app.app, "/api/admin/documents").await;
    assert_eq!(listing["totalChunks"], 0);
    assert!(listing["documents"].as_array().unwrap().is_empty());
}
