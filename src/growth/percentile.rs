// ABOUTME: Standard normal CDF for converting Z-scores into percentile ranks
// ABOUTME: Uses the Abramowitz & Stegun 7.1.26 error-function approximation in f64
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Z-score to percentile conversion.
//!
//! `percentile(z) = Phi(z) * 100` with `Phi` the standard normal CDF,
//! computed through the error function: `Phi(x) = 0.5 * (1 + erf(x / sqrt(2)))`.

/// Percentile above which results carry an advisory label
pub const UPPER_EXTREME_PERCENTILE: f64 = 97.0;

/// Percentile below which results carry an advisory label
pub const LOWER_EXTREME_PERCENTILE: f64 = 3.0;

/// Convert a Z-score into a percentile rank in `[0, 100]`
#[must_use]
pub fn percentile(z: f64) -> f64 {
    standard_normal_cdf(z) * 100.0
}

/// Advisory label for extreme percentiles
///
/// Returns `Some("above 97th percentile")` for `p > 97`,
/// `Some("below 3rd percentile")` for `p < 3`, `None` otherwise. The label
/// never changes the classification.
#[must_use]
pub fn percentile_label(p: f64) -> Option<&'static str> {
    if p > UPPER_EXTREME_PERCENTILE {
        Some("above 97th percentile")
    } else if p < LOWER_EXTREME_PERCENTILE {
        Some("below 3rd percentile")
    } else {
        None
    }
}

/// Standard normal cumulative distribution function
///
/// Clamps at |x| >= 8 where the result is 0 or 1 to double precision.
#[must_use]
fn standard_normal_cdf(x: f64) -> f64 {
    if x < -8.0 {
        return 0.0;
    }
    if x > 8.0 {
        return 1.0;
    }

    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Error function, Abramowitz & Stegun approximation 7.1.26
///
/// Maximum absolute error 1.5e-7, well inside every tolerance the evaluation
/// pipeline needs; `erf(0)` is exactly 0 so `percentile(0)` is exactly 50.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}
