// ABOUTME: Integration tests for the growth evaluation pipeline
// ABOUTME: Exercises z-score, percentile, classification, and the evaluator end to end

mod helpers;

use anthro_server::growth::{
    classify_bmi, classify_hfa, classify_wfa, lms_zscore, percentile, percentile_label,
};
use anthro_server::models::{Observation, Sex};

use helpers::fixtures::evaluator;

#[test]
fn test_zscore_is_zero_at_the_median() {
    let z = lms_zscore(15.2441, -0.8886, 15.2441, 0.09692).unwrap();
    assert!(z.abs() < 1e-12);
    assert!((percentile(z) - 50.0).abs() < 1e-6);
}

#[test]
fn test_zscore_log_branch_matches_power_branch_limit() {
    // As L approaches zero the power branch converges to the log branch.
    let log_branch = lms_zscore(17.0, 0.0, 15.0, 0.09).unwrap();
    let near_zero = lms_zscore(17.0, 1e-6, 15.0, 0.09).unwrap();
    assert!((log_branch - near_zero).abs() < 1e-6);
}

#[test]
fn test_percentile_is_strictly_increasing_in_z() {
    let mut previous = percentile(-3.0);
    let mut z = -2.9;
    while z <= 3.0 {
        let current = percentile(z);
        assert!(current > previous, "percentile not increasing at z = {z}");
        previous = current;
        z += 0.1;
    }
}

#[test]
fn test_percentile_known_quantiles() {
    // Standard normal quantiles with the documented 1e-4 tolerance.
    assert!((percentile(1.645) - 95.0).abs() < 0.01);
    assert!((percentile(-1.645) - 5.0).abs() < 0.01);
    assert!((percentile(1.0) - 84.134).abs() < 0.01);
}

#[test]
fn test_classifier_boundaries_are_half_open() {
    // BMI percentile cuts at 5 / 85 / 95, lower bound inclusive.
    assert_eq!(classify_bmi(4.999), "Underweight");
    assert_eq!(classify_bmi(5.0), "Normal weight");
    assert_eq!(classify_bmi(84.999), "Normal weight");
    assert_eq!(classify_bmi(85.0), "Overweight");
    assert_eq!(classify_bmi(95.0), "Obesity");

    // Height-for-age cuts at z = -2 and z = +2.
    assert_eq!(classify_hfa(-2.0001), "Short stature");
    assert_eq!(classify_hfa(-2.0), "Normal stature");
    assert_eq!(classify_hfa(2.0), "Normal stature");
    assert_eq!(classify_hfa(2.0001), "Tall stature");

    // Weight-for-age adds the severe cut at z = -3.
    assert_eq!(classify_wfa(-3.0001), "Very underweight");
    assert_eq!(classify_wfa(-3.0), "Underweight");
    assert_eq!(classify_wfa(-2.0), "Normal weight");
    assert_eq!(classify_wfa(2.0001), "Overweight");
}

#[test]
fn test_percentile_label_only_at_extremes() {
    assert_eq!(percentile_label(50.0), None);
    assert_eq!(percentile_label(97.0), None);
    assert_eq!(percentile_label(97.001), Some("above 97th percentile"));
    assert_eq!(percentile_label(3.0), None);
    assert_eq!(percentile_label(2.999), Some("below 3rd percentile"));
}

#[test]
fn test_bmi_pipeline_end_to_end() {
    let obs = Observation::new(Sex::Female, 60, 18.0, 1.05).unwrap();
    let result = evaluator().evaluate_bmi(&obs).unwrap();

    assert_eq!(result.type_label, "BMI (WHO)");
    // 18 / 1.05^2 = 16.3265..., rounded to two decimals.
    assert!((result.value - 16.33).abs() < 1e-9);
    assert_eq!(result.classification, "Normal weight");
    assert_eq!(result.percentile_label, None);
    assert!(result.percentile > 50.0 && result.percentile < 85.0);
}

#[test]
fn test_hfa_pipeline_reports_centimeters() {
    let obs = Observation::new(Sex::Male, 96, 30.5, 1.34).unwrap();
    let result = evaluator().evaluate_hfa(&obs).unwrap();

    assert_eq!(result.type_label, "Height-for-age (WHO)");
    assert!((result.value - 134.0).abs() < 1e-9);
    assert_eq!(result.classification, "Normal stature");
}

#[test]
fn test_wfa_pipeline_at_the_median() {
    let obs = Observation::new(Sex::Female, 60, 18.2, 1.05).unwrap();
    let result = evaluator().evaluate_wfa(&obs).unwrap();

    assert_eq!(result.type_label, "Weight-for-age (WHO)");
    assert!(result.zscore.abs() < 1e-9);
    assert!((result.percentile - 50.0).abs() < 1e-9);
    assert_eq!(result.classification, "Normal weight");
}

#[test]
fn test_obesity_carries_the_extreme_label() {
    let obs = Observation::new(Sex::Male, 96, 50.0, 1.34).unwrap();
    let result = evaluator().evaluate_bmi(&obs).unwrap();

    assert_eq!(result.classification, "Obesity");
    assert_eq!(result.percentile_label, Some("above 97th percentile"));
}

#[test]
fn test_nearest_age_row_is_used_for_off_grid_ages() {
    // The fixture only has a 60-month row; a 62-month query reuses it.
    let at_60 = Observation::new(Sex::Female, 60, 18.0, 1.05).unwrap();
    let at_62 = Observation::new(Sex::Female, 62, 18.0, 1.05).unwrap();

    let evaluator = evaluator();
    let a = evaluator.evaluate_bmi(&at_60).unwrap();
    let b = evaluator.evaluate_bmi(&at_62).unwrap();
    assert!((a.zscore - b.zscore).abs() < 1e-12);
}
