// ABOUTME: Anthropometric evaluation route handlers mirroring the original endpoints
// ABOUTME: POST evaluate, evaluate-hfa, evaluate-wfa, evaluate-calories, evaluate-all
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Evaluation routes.
//!
//! Every endpoint accepts the same JSON body (`{sex, age_months, weight,
//! height}`, Spanish aliases honored) and differs only in which slice of the
//! evaluation it returns. Validation happens once in
//! `Observation::try_from`; handlers stay thin.

use crate::{
    energy::{estimate_calories, CalorieReport},
    errors::AppError,
    growth::EvaluationResult,
    models::{ActivityLevel, EvaluationRequest, Observation},
    server::ServerResources,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters shared by the calorie-bearing endpoints
#[derive(Deserialize, Default)]
pub struct ActivityQuery {
    /// Activity level token; `actividad` kept as the original alias
    #[serde(default, alias = "actividad")]
    activity_level: Option<String>,
}

impl ActivityQuery {
    /// Resolve the activity level, defaulting to moderate
    pub(crate) fn resolve(&self) -> Result<ActivityLevel, AppError> {
        self.activity_level
            .as_deref()
            .map_or(Ok(ActivityLevel::default()), str::parse)
    }
}

/// Aggregate response bundling every evaluation for one observation
#[derive(Debug, Serialize)]
pub struct EvaluateAllResponse {
    pub bmi: EvaluationResult,
    pub weight_for_age: EvaluationResult,
    pub height_for_age: EvaluationResult,
    pub calories: CalorieReport,
}

/// Evaluation routes implementation
pub struct EvaluationRoutes;

impl EvaluationRoutes {
    /// Create all evaluation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/evaluate", post(Self::handle_evaluate_bmi))
            .route("/evaluate-hfa", post(Self::handle_evaluate_hfa))
            .route("/evaluate-wfa", post(Self::handle_evaluate_wfa))
            .route("/evaluate-calories", post(Self::handle_evaluate_calories))
            .route("/evaluate-all", post(Self::handle_evaluate_all))
            .with_state(resources)
    }

    /// Handle BMI-for-age evaluation
    async fn handle_evaluate_bmi(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<EvaluationRequest>,
    ) -> Result<Response, AppError> {
        let observation = Observation::try_from(request)?;
        let result = resources.evaluator.evaluate_bmi(&observation)?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle height-for-age evaluation
    async fn handle_evaluate_hfa(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<EvaluationRequest>,
    ) -> Result<Response, AppError> {
        let observation = Observation::try_from(request)?;
        let result = resources.evaluator.evaluate_hfa(&observation)?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle weight-for-age evaluation
    async fn handle_evaluate_wfa(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<EvaluationRequest>,
    ) -> Result<Response, AppError> {
        let observation = Observation::try_from(request)?;
        let result = resources.evaluator.evaluate_wfa(&observation)?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle calorie estimation
    async fn handle_evaluate_calories(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<ActivityQuery>,
        Json(request): Json<EvaluationRequest>,
    ) -> Result<Response, AppError> {
        let activity = params.resolve()?;
        let observation = Observation::try_from(request)?;
        let report = estimate_calories(&resources.evaluator, &observation, activity)?;
        Ok((StatusCode::OK, Json(report)).into_response())
    }

    /// Handle the aggregate evaluation
    async fn handle_evaluate_all(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<ActivityQuery>,
        Json(request): Json<EvaluationRequest>,
    ) -> Result<Response, AppError> {
        let activity = params.resolve()?;
        let observation = Observation::try_from(request)?;

        let evaluator = &resources.evaluator;
        let response = EvaluateAllResponse {
            bmi: evaluator.evaluate_bmi(&observation)?,
            weight_for_age: evaluator.evaluate_wfa(&observation)?,
            height_for_age: evaluator.evaluate_hfa(&observation)?,
            calories: estimate_calories(evaluator, &observation, activity)?,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
