// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;

use crate::common::{get, test_app, upload};

#[tokio::test]
async fn test_health_reports_state() {
    let app = test_app(vec![]);

    let (status, body) = get(&app.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["assistantConfigured"], true);
    assert_eq!(body["documents"], 0);

    upload(
        &app.app,
        "file",
        "plan.txt",
        "Le camping compte quinze allées de A à O, la plage est derrière l'allée A.".as_bytes(),
    )
    .await;

    let (_, body) = get(&app.app, "/health").await;
    assert_eq!(body["documents"], 1);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app(vec![]);
    let (status, _) = get(&app.app, "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
