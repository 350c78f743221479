// ABOUTME: Pediatric anthropometric evaluation library - WHO growth references and energy math
// ABOUTME: Exposes the reference table, evaluation engine, energy estimator, and HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

#![deny(unsafe_code)]

//! # Anthro Server
//!
//! Evaluates pediatric anthropometric measurements (BMI, height-for-age,
//! weight-for-age) against WHO growth-reference tables, derives Z-scores and
//! percentiles, classifies results into clinical categories, estimates daily
//! energy expenditure, and optionally generates a weekly meal plan through an
//! external generative-text service.
//!
//! ## Layers
//!
//! - **reference**: the immutable LMS table and its CSV loader
//! - **growth**: pure evaluation math (Z-score, percentile, classification)
//! - **energy**: basal-rate formulas, activity factors, caloric targets
//! - **llm**: best-effort meal-plan generation behind a provider seam
//! - **routes** / **server**: the axum HTTP surface

/// Environment-based configuration
pub mod config;
/// Basal metabolic rate and energy expenditure estimation
pub mod energy;
/// Unified error handling with standard error codes
pub mod errors;
/// Growth evaluation engine (Z-score, percentile, classification)
pub mod growth;
/// External generative-text integration for meal planning
pub mod llm;
/// Structured logging setup
pub mod logging;
/// Tower middleware layers
pub mod middleware;
/// Domain models (sex, activity level, observations)
pub mod models;
/// WHO growth-reference table and loader
pub mod reference;
/// HTTP route handlers
pub mod routes;
/// Server assembly and lifecycle
pub mod server;
