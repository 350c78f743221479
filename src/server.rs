// ABOUTME: HTTP server assembly - shared resources, router construction, and serving
// ABOUTME: Wires evaluator, meal-plan service, CORS, and request tracing into one axum app
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Server assembly.
//!
//! `ServerResources` bundles everything handlers need; the reference table
//! inside the evaluator is immutable after startup, so sharing one `Arc`
//! across arbitrary concurrent requests needs no locking.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::growth::GrowthEvaluator;
use crate::llm::{GeminiProvider, MealPlanService};
use crate::middleware::setup_cors;
use crate::reference::ReferenceTable;
use crate::routes::{EvaluationRoutes, HealthRoutes, MealPlanRoutes};

/// Shared state for all request handlers
pub struct ServerResources {
    /// Growth evaluator over the loaded reference table
    pub evaluator: GrowthEvaluator,
    /// Meal-plan service; absent when no LLM API key is configured
    pub mealplan: Option<MealPlanService>,
}

impl ServerResources {
    /// Assemble resources from configuration and a loaded reference table
    ///
    /// The meal-plan service is optional: without an API key the endpoint
    /// reports 503 instead of failing startup.
    #[must_use]
    pub fn new(config: &ServerConfig, table: ReferenceTable) -> Self {
        let mealplan = match GeminiProvider::new(&config.llm) {
            Ok(provider) => Some(MealPlanService::new(Arc::new(provider))),
            Err(e) => {
                info!("Meal-plan generation disabled: {e}");
                None
            }
        };

        Self {
            evaluator: GrowthEvaluator::new(Arc::new(table)),
            mealplan,
        }
    }
}

/// Build the complete application router
#[must_use]
pub fn build_router(config: &ServerConfig, resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(EvaluationRoutes::routes(resources.clone()))
        .merge(MealPlanRoutes::routes(resources))
        .layer(setup_cors(&config.cors))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until ctrl-c
///
/// # Errors
///
/// Returns an error when the port cannot be bound or the server fails.
pub async fn run(config: &ServerConfig, resources: Arc<ServerResources>) -> Result<()> {
    let app = build_router(config, resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http_port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.http_port))?;

    info!("Server listening on port {}", config.http_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
