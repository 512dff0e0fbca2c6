// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod assistant;
pub mod booking;
pub mod cli;
pub mod config;
pub mod llm;
pub mod rag;
pub mod storage;
pub mod version;

// Re-export main types
pub use api::{create_app, AppState};
pub use assistant::{AssistantService, SettingsStore};
pub use booking::{BookingError, BookingService, PaymentService, StayCatalog};
pub use config::AppConfig;
pub use rag::{DocumentIngestor, RagRetriever, RagStore};
pub use storage::Database;
