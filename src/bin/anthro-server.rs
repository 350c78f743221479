// ABOUTME: Server binary for the pediatric anthropometric evaluation API
// ABOUTME: Loads configuration and WHO reference tables, then serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! # Anthro Server Binary
//!
//! Starts the evaluation API: loads the WHO reference CSVs once, builds the
//! shared evaluator, and serves the axum router.

use std::path::PathBuf;
use std::sync::Arc;

use anthro_server::{
    config::ServerConfig,
    logging,
    reference::ReferenceTableLoader,
    server::{self, ServerResources},
};
use anyhow::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "anthro-server")]
#[command(about = "Pediatric anthropometric evaluation API - WHO growth references")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the reference data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(data_dir) = args.data_dir {
        config.reference.bmi_table = data_dir.join("who_bmi_clean.csv");
        config.reference.lms_table = data_dir.join("who_lms_all_clean.csv");
    }

    logging::init_from_env()?;

    info!("Starting anthro-server");
    info!("{}", config.summary());

    // Built once, immutable for the lifetime of the process.
    let table = ReferenceTableLoader::new()
        .read_files(&config.reference.bmi_table, &config.reference.lms_table)?
        .build()?;

    let resources = Arc::new(ServerResources::new(&config, table));

    display_available_endpoints(&config);

    server::run(&config, resources).await
}

/// Display all available API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   Health Check:       GET  http://{host}:{port}/health");
    info!("   BMI-for-age:        POST http://{host}:{port}/evaluate");
    info!("   Height-for-age:     POST http://{host}:{port}/evaluate-hfa");
    info!("   Weight-for-age:     POST http://{host}:{port}/evaluate-wfa");
    info!("   Calorie Estimate:   POST http://{host}:{port}/evaluate-calories");
    info!("   Full Evaluation:    POST http://{host}:{port}/evaluate-all");
    info!("   Weekly Meal Plan:   POST http://{host}:{port}/generate-mealplan");
    info!("=== End of Endpoint List ===");
}
