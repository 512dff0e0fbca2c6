// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::runtime;
use crate::config::AppConfig;
use crate::rag::DocumentIngestor;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// UTF-8 text file to add
    #[arg(long)]
    pub file: PathBuf,

    /// Document name (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,
}

impl IngestArgs {
    pub fn document_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file.display().to_string())
        })
    }
}

pub async fn ingest(config: &AppConfig, args: IngestArgs) -> Result<()> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let store = runtime::open_rag_store(config).await;
    let gemini = runtime::gemini_client(config)?;
    let ingestor = DocumentIngestor::new(
        store,
        runtime::embedder(config, &gemini),
        config.rag.min_chunk_len,
    );

    let document = ingestor.ingest_bytes(&args.document_name(), &bytes).await?;
    info!(
        "Ingested \"{}\" as {} ({} chunks)",
        document.name, document.id, document.chunk_count
    );
    Ok(())
}

pub async fn list_documents(config: &AppConfig) -> Result<()> {
    let store = runtime::open_rag_store(config).await;
    let documents = store.documents().await;
    if documents.is_empty() {
        println!("Knowledge base is empty");
        return Ok(());
    }

    for doc in &documents {
        println!(
            "{}  {}  {} chunks  {}",
            doc.id,
            doc.upload_date.format("%Y-%m-%d %H:%M"),
            doc.chunk_count,
            doc.name
        );
    }
    let stats = store.stats().await;
    println!("{} documents, {} chunks", stats.documents, stats.chunks);
    Ok(())
}
