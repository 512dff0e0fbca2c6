// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod knowledge;
pub mod runtime;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::api::{create_app, start_server};
use crate::config::AppConfig;
use crate::storage;

/// Campsite booking service
#[derive(Parser, Debug)]
#[command(name = "campsite-booking")]
#[command(version)]
#[command(about = "Campground booking API with a Gemini assistant", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, short, global = true, env = "CAMPSITE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Reset the catalogue to the reference campground
    Seed(SeedArgs),

    /// Add a text document to the assistant knowledge base
    Ingest(knowledge::IngestArgs),

    /// List knowledge-base documents
    Documents,
}

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Reseed even when stays already exist (deletes every booking)
    #[arg(long)]
    pub force: bool,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Seed(args) => seed(&config, args),
        Commands::Ingest(args) => knowledge::ingest(&config, args).await,
        Commands::Documents => knowledge::list_documents(&config).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let state = runtime::build_state(&config).await?;
    let app = create_app(state, &config.server.cors_origins);
    start_server(app, &config).await
}

fn seed(config: &AppConfig, args: SeedArgs) -> Result<()> {
    let db = runtime::open_database(config)?;
    let summary = if args.force {
        Some(storage::seed(&db)?)
    } else {
        storage::seed_if_empty(&db)?
    };

    match summary {
        Some(summary) => info!(
            "Catalogue ready: {} stays, {} supplements",
            summary.stays, summary.supplements
        ),
        None => info!("Stays already present, nothing to do (use --force to reseed)"),
    }
    Ok(())
}
