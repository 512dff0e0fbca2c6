// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use campsite_booking::assistant::{AVAILABILITY_TOOL, DEFAULT_INSTRUCTION, NO_ANSWER};
use serde_json::json;

use crate::common::{call_reply, get, post, text_reply, test_app, upload};

const POOL_DOC: &str = "La piscine chauffée est ouverte de 10h à 19h, bonnet de bain conseillé.\n\n\
Le restaurant Le Sud propose une soirée paëlla chaque jeudi soir en juillet.";

#[tokio::test]
async fn test_chat_returns_model_text() {
    let app = test_app(vec![text_reply("  Bonjour ! Je suis René.  ")]);

    let (status, body) = post(
        &app.app,
        "/api/assistant",
        json!({ "message": "Bonjour", "history": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Bonjour ! Je suis René.");

    let requests = app.llm.requests();
    assert_eq!(requests.len(), 1);
    let instruction = requests[0].system_instruction.as_ref().unwrap().text();
    assert_eq!(instruction, DEFAULT_INSTRUCTION);
}

#[tokio::test]
async fn test_chat_requires_message() {
    let app = test_app(vec![]);

    let (status, body) = post(&app.app, "/api/assistant", json!({ "message": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing message");
    assert!(app.llm.requests().is_empty());
}

#[tokio::test]
async fn test_chat_injects_local_context() {
    let app = test_app(vec![text_reply("")]);
    upload(&app.app, "file", "services.txt", POOL_DOC.as_bytes()).await;

    let (status, body) = post(
        &app.app,
        "/api/assistant",
        json!({ "message": "Quels sont les horaires de la piscine chauffée ?" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let requests = app.llm.requests();
    let user_turn = requests[0].contents.last().unwrap().text();
    assert!(user_turn.contains("Contextes retrouvés (RAG local) :"));
    assert!(user_turn.contains("- La piscine chauffée"));

    // Empty model answer falls back to the retrieved passages
    let text = body["text"].as_str().unwrap();
    assert!(text.starts_with("Voici des passages trouvés dans la base locale :"));
    assert!(text.ends_with("Pouvez-vous préciser votre question ?"));
}

#[tokio::test]
async fn test_chat_without_answer_or_context() {
    let app = test_app(vec![text_reply("")]);

    let (_, body) = post(&app.app, "/api/assistant", json!({ "message": "Allô ?" })).await;
    assert_eq!(body["text"], NO_ANSWER);
}

#[tokio::test]
async fn test_chat_runs_availability_tool() {
    let app = test_app(vec![
        call_reply(
            AVAILABILITY_TOOL,
            json!({
                "type_emplacement": "cottage",
                "date_debut": "2030-07-01",
                "duree_jours": 2
            }),
        ),
        text_reply("Plusieurs cottages sont libres."),
    ]);

    let (status, body) = post(
        &app.app,
        "/api/assistant",
        json!({
            "message": "Un cottage est-il libre le 1er juillet 2030 pour 2 nuits ?",
            "history": [
                { "role": "user", "parts": [{ "text": "Bonjour" }] },
                { "role": "model", "parts": [{ "text": "Bonjour, que puis-je faire ?" }] }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Plusieurs cottages sont libres.");

    let requests = app.llm.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].contents.len(), 3);

    let follow_up = &requests[1].contents;
    let tool_turn = follow_up.last().unwrap();
    let response = tool_turn.parts[0].function_response.as_ref().unwrap();
    assert_eq!(response.name, AVAILABILITY_TOOL);
    let result = response.response["result"].as_str().unwrap();
    assert!(result.starts_with("Voici les disponibilités trouvées : "));
    assert!(result.contains("240€ pour 2 nuits."));
}

#[tokio::test]
async fn test_llm_failure_maps_to_bad_gateway() {
    // No scripted reply: the provider fails with an upstream error
    let app = test_app(vec![]);

    let (status, body) = post(&app.app, "/api/assistant", json!({ "message": "Bonjour" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to process request");
}

#[tokio::test]
async fn test_assistant_config_round_trip() {
    let app = test_app(vec![]);

    let (status, body) = get(&app.app, "/api/assistant/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["systemInstruction"], DEFAULT_INSTRUCTION);

    let (status, body) = post(
        &app.app,
        "/api/assistant/config",
        json!({ "systemInstruction": "Tu es Léa, hôtesse du camping." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = get(&app.app, "/api/assistant/config").await;
    assert_eq!(body["systemInstruction"], "Tu es Léa, hôtesse du camping.");

    let (status, body) = post(
        &app.app,
        "/api/assistant/config",
        json!({ "systemInstruction": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing systemInstruction");
}

#[tokio::test]
async fn test_tool_endpoints() {
    let app = test_app(vec![]);

    let (status, body) = post(
        &app.app,
        "/api/tools/availability",
        json!({
            "type_emplacement": "Plage",
            "date_debut": "2030-08-01",
            "duree_jours": "3"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let result = body["result"].as_str().unwrap();
    assert!(result.contains("255€ pour 3 nuits."));

    let (status, body) = post(
        &app.app,
        "/api/tools/availability",
        json!({ "type_emplacement": "Plage" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing parameters");

    let (status, body) = post(
        &app.app,
        "/api/tools/hours",
        json!({ "nom_service": "Piscine" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["result"],
        "L'espace aquatique est ouvert de 10h à 19h non-stop."
    );
}

#[tokio::test]
async fn test_rag_search_endpoint() {
    let app = test_app(vec![]);

    let (status, body) = post(&app.app, "/api/rag/search", json!({ "query": "piscine" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["chunks"].as_array().unwrap().is_empty());

    upload(&app.app, "file", "services.txt", POOL_DOC.as_bytes()).await;

    let (status, body) = post(
        &app.app,
        "/api/rag/search",
        json!({ "query": "soirée paëlla au restaurant", "limit": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let chunks = body["chunks"].as_array().unwrap();
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].as_str().unwrap().contains("paëlla"));
    assert!(body["metadata"][0]["score"].as_f64().unwrap() > 0.0);

    let (status, _) = post(&app.app, "/api/rag/search", json!({ "query": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
