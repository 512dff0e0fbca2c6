// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use campsite_booking::api::{create_app, AppState};
use campsite_booking::assistant::SettingsStore;
use campsite_booking::booking::Stay;
use campsite_booking::config::AppConfig;
use campsite_booking::llm::{
    Candidate, Content, FunctionCall, GenerateRequest, GenerateResponse, LlmError, LlmProvider,
    Part,
};
use campsite_booking::rag::{HashingEmbedder, RagStore};
use campsite_booking::storage::{seed, Database};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for `oneshot`

/// Chat model that replays canned responses and records every request
pub struct ScriptedLlm {
    replies: Mutex<Vec<GenerateResponse>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedLlm {
    pub fn new(mut replies: Vec<GenerateResponse>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop().ok_or_else(|| LlmError::ApiError {
            status: 500,
            message: "no scripted reply left".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }
}

fn model_reply(parts: Vec<Part>) -> GenerateResponse {
    GenerateResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts,
            }),
            ..Default::default()
        }],
        prompt_feedback: None,
    }
}

pub fn text_reply(text: &str) -> GenerateResponse {
    model_reply(vec![Part::text(text)])
}

pub fn call_reply(name: &str, args: Value) -> GenerateResponse {
    model_reply(vec![Part {
        function_call: Some(FunctionCall {
            name: name.to_string(),
            args,
        }),
        ..Default::default()
    }])
}

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub db: Arc<Database>,
    pub llm: Arc<ScriptedLlm>,
}

/// Seeded in-memory application with the hashing embedder
pub fn test_app(replies: Vec<GenerateResponse>) -> TestApp {
    test_app_with(AppConfig::default(), replies)
}

pub fn test_app_with(config: AppConfig, replies: Vec<GenerateResponse>) -> TestApp {
    let db = Arc::new(Database::open_in_memory().unwrap());
    seed(&db).unwrap();

    let llm = Arc::new(ScriptedLlm::new(replies));
    let state = AppState::new(
        &config,
        db.clone(),
        Arc::new(RagStore::in_memory()),
        Arc::new(SettingsStore::in_memory()),
        llm.clone(),
        Arc::new(HashingEmbedder::default()),
    );
    let app = create_app(state.clone(), &config.server.cors_origins);

    TestApp {
        app,
        state,
        db,
        llm,
    }
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Send a request with an optional JSON body and decode the JSON answer
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    read_json(app.clone().oneshot(request).await.unwrap()).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Upload `content` as the multipart field `field`
pub async fn upload(app: &Router, field: &str, file_name: &str, content: &[u8]) -> (StatusCode, Value) {
    const BOUNDARY: &str = "campsite-test-boundary";
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"{n}\"\r\nContent-Type: text/plain\r\n\r\n",
        b = BOUNDARY,
        f = field,
        n = file_name
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/admin/documents")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    read_json(app.clone().oneshot(request).await.unwrap()).await
}

/// First seeded stay of a category
pub async fn stay_of_type(app: &TestApp, stay_type: &str) -> Stay {
    app.state
        .catalog
        .list_stays()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.stay_type == stay_type)
        .unwrap()
}

pub fn guest(email: &str) -> Value {
    serde_json::json!({
        "firstName": "Camille",
        "lastName": "Martin",
        "email": email,
        "phone": "+33 6 12 34 56 78"
    })
}
