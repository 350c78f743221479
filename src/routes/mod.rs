// ABOUTME: Route module organization for the anthro server HTTP endpoints
// ABOUTME: Route definitions by domain with thin handlers delegating to the evaluator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Route modules.
//!
//! Each module contains route definitions and thin handler functions that
//! delegate to the evaluation or meal-plan services; no business logic lives
//! here.

/// Anthropometric evaluation routes
pub mod evaluation;
/// Health check and system status routes
pub mod health;
/// Meal-plan generation routes
pub mod mealplan;

pub use evaluation::EvaluationRoutes;
pub use health::HealthRoutes;
pub use mealplan::MealPlanRoutes;
