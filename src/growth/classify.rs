// ABOUTME: Clinical classification rules for BMI, height-for-age, and weight-for-age
// ABOUTME: Total functions from percentile or z-score to a fixed category label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Classification rule sets.
//!
//! All bucket boundaries are half-open on the upper side using strict `<`
//! comparisons: a value equal to a boundary falls into the higher bucket.

/// Classify a BMI-for-age percentile
///
/// `p < 5` Underweight, `p < 85` Normal weight, `p < 95` Overweight,
/// otherwise Obesity.
#[must_use]
pub fn classify_bmi(percentile: f64) -> &'static str {
    if percentile < 5.0 {
        "Underweight"
    } else if percentile < 85.0 {
        "Normal weight"
    } else if percentile < 95.0 {
        "Overweight"
    } else {
        "Obesity"
    }
}

/// Classify a height-for-age Z-score
///
/// `z < -2` Short stature, `z > 2` Tall stature, otherwise Normal stature.
#[must_use]
pub fn classify_hfa(z: f64) -> &'static str {
    if z < -2.0 {
        "Short stature"
    } else if z > 2.0 {
        "Tall stature"
    } else {
        "Normal stature"
    }
}

/// Classify a weight-for-age Z-score
///
/// `z < -3` Very underweight, `z < -2` Underweight, `z > 2` Overweight,
/// otherwise Normal weight.
#[must_use]
pub fn classify_wfa(z: f64) -> &'static str {
    if z < -3.0 {
        "Very underweight"
    } else if z < -2.0 {
        "Underweight"
    } else if z > 2.0 {
        "Overweight"
    } else {
        "Normal weight"
    }
}

/// Whether a BMI classification calls for a caloric deficit
#[must_use]
pub fn is_excess_weight(classification: &str) -> bool {
    classification == "Overweight" || classification == "Obesity"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_boundaries_are_exclusive_below() {
        assert_eq!(classify_bmi(4.999), "Underweight");
        assert_eq!(classify_bmi(5.0), "Normal weight");
        assert_eq!(classify_bmi(84.999), "Normal weight");
        assert_eq!(classify_bmi(85.0), "Overweight");
        assert_eq!(classify_bmi(94.999), "Overweight");
        assert_eq!(classify_bmi(95.0), "Obesity");
    }

    #[test]
    fn test_hfa_boundaries() {
        assert_eq!(classify_hfa(-2.0001), "Short stature");
        assert_eq!(classify_hfa(-2.0), "Normal stature");
        assert_eq!(classify_hfa(2.0), "Normal stature");
        assert_eq!(classify_hfa(2.0001), "Tall stature");
    }

    #[test]
    fn test_wfa_boundaries() {
        assert_eq!(classify_wfa(-3.0001), "Very underweight");
        assert_eq!(classify_wfa(-3.0), "Underweight");
        assert_eq!(classify_wfa(-2.0), "Normal weight");
        assert_eq!(classify_wfa(2.0), "Normal weight");
        assert_eq!(classify_wfa(2.5), "Overweight");
    }

    #[test]
    fn test_excess_weight_predicate() {
        assert!(is_excess_weight("Overweight"));
        assert!(is_excess_weight("Obesity"));
        assert!(!is_excess_weight("Normal weight"));
        assert!(!is_excess_weight("Underweight"));
    }
}
