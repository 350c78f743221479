// ABOUTME: Meal-plan generation route calling the external generative-text service
// ABOUTME: Best-effort endpoint returning a structured plan or a structured error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Meal-plan route.
//!
//! The only endpoint that blocks on the network. The underlying provider
//! call carries its own timeout; failures come back as the unified error
//! body with a 5xx status, never as a panic.

use crate::{
    energy::estimate_calories,
    errors::{AppError, ErrorCode},
    models::{EvaluationRequest, Observation},
    server::ServerResources,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use super::evaluation::ActivityQuery;

/// Meal-plan routes implementation
pub struct MealPlanRoutes;

impl MealPlanRoutes {
    /// Create all meal-plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/generate-mealplan", post(Self::handle_generate))
            .with_state(resources)
    }

    /// Handle weekly meal-plan generation
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<ActivityQuery>,
        Json(request): Json<EvaluationRequest>,
    ) -> Result<Response, AppError> {
        let service = resources.mealplan.as_ref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "Meal-plan generation is not configured (set GEMINI_API_KEY)",
            )
        })?;

        let activity = params.resolve()?;
        let observation = Observation::try_from(request)?;
        let report = estimate_calories(&resources.evaluator, &observation, activity)?;
        let plan = service.generate(&observation, &report).await?;

        Ok((StatusCode::OK, Json(plan)).into_response())
    }
}
