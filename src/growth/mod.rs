// ABOUTME: Growth evaluation engine combining LMS z-scores, percentiles, and classification
// ABOUTME: Pure functions over reference rows plus the per-request GrowthEvaluator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! # Growth Evaluation Engine
//!
//! The core of the system: given a reference row and an observed value,
//! compute a standardized Z-score, convert it to a percentile, and classify
//! the result. Everything here is synchronous, deterministic, and free of
//! side effects given the reference table.

/// Bucket classifiers for BMI, height-for-age, and weight-for-age
pub mod classify;
/// Evaluation pipeline producing `EvaluationResult`s
pub mod evaluator;
/// Standard normal CDF and percentile annotation
pub mod percentile;
/// LMS Z-score transform
pub mod zscore;

pub use classify::{classify_bmi, classify_hfa, classify_wfa};
pub use evaluator::{EvaluationResult, GrowthEvaluator};
pub use percentile::{percentile, percentile_label};
pub use zscore::lms_zscore;
