// ABOUTME: LMS (Lambda-Mu-Sigma) Z-score transform for WHO growth standards
// ABOUTME: Implements the Box-Cox power branch and the logarithmic L = 0 branch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! LMS Z-score calculation.
//!
//! The WHO growth standards publish three parameters per age: the Box-Cox
//! power `L`, the median `M`, and the coefficient of variation `S`. The
//! transform maps a skewed anthropometric distribution onto a standard
//! normal scale.

use crate::errors::{AppError, AppResult};

/// Compute the LMS Z-score for an observed value
///
/// Formula:
/// - `L == 0`: `z = ln(value / M) / S`
/// - otherwise: `z = ((value / M)^L - 1) / (L * S)`
///
/// Table invariants guarantee `M > 0` and `S > 0`; the value guard is
/// defensive, since upstream validation already constrains weight and height
/// to be positive.
///
/// # Errors
///
/// Returns `AppError::NumericDomain` when `value <= 0`, where the logarithm
/// and fractional power are undefined.
pub fn lms_zscore(value: f64, l: f64, m: f64, s: f64) -> AppResult<f64> {
    if value <= 0.0 || !value.is_finite() {
        return Err(AppError::numeric_domain(format!(
            "LMS transform requires a positive value, got {value}"
        )));
    }

    let z = if l == 0.0 {
        (value / m).ln() / s
    } else {
        ((value / m).powf(l) - 1.0) / (l * s)
    };
    Ok(z)
}
