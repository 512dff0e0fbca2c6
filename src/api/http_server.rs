// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::admin::{
    admin_bookings_handler, admin_stats_handler, list_documents_handler, upload_document_handler,
};
use super::assistant::{chat_handler, get_config_handler, save_config_handler};
use super::booking::{
    cancel_booking_handler, create_booking_handler, find_bookings_handler, get_booking_handler,
    modify_booking_handler, simulate_booking_handler,
};
use super::payment::{payment_status_handler, process_payment_handler};
use super::rag::rag_search_handler;
use super::stays::{
    availability_handler, get_stay_handler, list_stays_handler, map_availability_handler,
    supplements_handler,
};
use super::tools::{availability_tool_handler, hours_tool_handler};
use crate::assistant::{AssistantService, SettingsStore, ToolExecutor};
use crate::booking::{BookingService, PaymentService, StayCatalog};
use crate::config::AppConfig;
use crate::llm::{Embedder, LlmProvider};
use crate::rag::{DocumentIngestor, RagRetriever, RagStore};
use crate::storage::Database;
use crate::version;

/// Multipart framing allowance on top of the raw file size
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub catalog: StayCatalog,
    pub bookings: Arc<BookingService>,
    pub payments: Arc<PaymentService>,
    pub ingestor: Arc<DocumentIngestor>,
    pub retriever: RagRetriever,
    pub assistant: Arc<AssistantService>,
    pub llm: Arc<dyn LlmProvider>,
    pub rag_search_limit: usize,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wire the services over already opened stores
    pub fn new(
        config: &AppConfig,
        db: Arc<Database>,
        rag_store: Arc<RagStore>,
        settings: Arc<SettingsStore>,
        llm: Arc<dyn LlmProvider>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        let catalog = StayCatalog::new(db.clone());
        let retriever = RagRetriever::new(rag_store.clone(), embedder.clone());
        let ingestor = DocumentIngestor::new(rag_store, embedder, config.rag.min_chunk_len);
        let assistant = AssistantService::new(
            llm.clone(),
            Some(retriever.clone()),
            settings,
            ToolExecutor::new(catalog.clone()),
            config.llm.generation_config(),
        );

        Self {
            catalog,
            bookings: Arc::new(BookingService::new(db.clone(), config.booking.auto_confirm)),
            payments: Arc::new(PaymentService::new(db)),
            ingestor: Arc::new(ingestor),
            retriever,
            assistant: Arc::new(assistant),
            llm,
            rag_search_limit: config.rag.search_limit,
            max_upload_bytes: config.rag.max_upload_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub assistant_configured: bool,
    pub documents: usize,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}

/// Build the HTTP router
pub fn create_app(state: AppState, cors_origins: &[String]) -> Router {
    let upload_limit = state.max_upload_bytes + UPLOAD_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health_handler))
        // Catalogue
        .route("/api/stays", get(list_stays_handler))
        .route("/api/stays/:id", get(get_stay_handler))
        .route("/api/availability", get(availability_handler))
        .route("/api/map-availability", get(map_availability_handler))
        .route("/api/supplements", get(supplements_handler))
        // Bookings
        .route(
            "/api/booking",
            post(create_booking_handler).get(find_bookings_handler),
        )
        .route(
            "/api/booking/:id",
            get(get_booking_handler).put(modify_booking_handler),
        )
        .route("/api/booking/:id/simulate", post(simulate_booking_handler))
        .route("/api/booking/:id/cancel", post(cancel_booking_handler))
        .route(
            "/api/payment",
            post(process_payment_handler).get(payment_status_handler),
        )
        // Back office
        .route("/api/admin/bookings", get(admin_bookings_handler))
        .route("/api/admin/stats", get(admin_stats_handler))
        .route(
            "/api/admin/documents",
            post(upload_document_handler)
                .get(list_documents_handler)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Assistant
        .route("/api/rag/search", post(rag_search_handler))
        .route("/api/assistant", post(chat_handler))
        .route(
            "/api/assistant/config",
            get(get_config_handler).post(save_config_handler),
        )
        .route("/api/tools/availability", post(availability_tool_handler))
        .route("/api/tools/hours", post(hours_tool_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        assistant_configured: state.llm.is_available(),
        documents: state.retriever.store().stats().await.documents,
    })
}

/// Serve `app` until Ctrl+C or SIGTERM
pub async fn start_server(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
