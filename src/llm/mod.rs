// ABOUTME: External generative-text integration for best-effort meal planning
// ABOUTME: Provider trait seam, Gemini REST client, and meal-plan prompt/schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! # Generative-Text Integration
//!
//! The meal-plan feature is the only network-facing, fallible operation in
//! the system. It lives behind the [`TextGenerator`] trait so the HTTP layer
//! and tests can swap the real Gemini client for a stub. Failures surface as
//! structured `AppError`s; nothing here ever touches the evaluation path.

/// Google Gemini generative API client
pub mod gemini;
/// Weekly meal-plan prompt construction and response schema
pub mod mealplan;

pub use gemini::GeminiProvider;
pub use mealplan::{DayPlan, Macros, MealPlan, MealPlanService};

use crate::errors::AppResult;
use async_trait::async_trait;

/// Seam over an external generative-text service
///
/// Implementations must apply their own request timeout; callers treat the
/// generator as a best-effort dependency and propagate structured errors
/// rather than retrying.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a text completion for a prompt
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Human-readable provider name for logs and error messages
    fn name(&self) -> &'static str;
}
