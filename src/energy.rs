// ABOUTME: Basal metabolic rate and total energy expenditure estimation for children
// ABOUTME: Schofield and WHO/OMS formulas with activity factors and caloric-target policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! # Energy Expenditure Estimator
//!
//! Two basal-metabolic-rate (TMB) formulas, each piecewise-linear in weight
//! with distinct coefficients per sex and age band (`<3`, `<10`, `>=10`
//! years). Total energy expenditure (GET) is the basal rate times a fixed
//! activity factor. A caloric-target policy trims the WHO-formula GET when
//! the BMI classification indicates excess weight.
//!
//! The linear coefficients are documented constants reproduced from the
//! published formulas; they are not derived at runtime.
//!
//! # Scientific References
//!
//! - Schofield, W.N. (1985). "Predicting basal metabolic rate, new standards
//!   and review of previous work." *Human Nutrition: Clinical Nutrition*,
//!   39(Suppl 1), 5-41.
//! - FAO/WHO/UNU (1985). "Energy and protein requirements." *WHO Technical
//!   Report Series* 724.

use crate::errors::AppResult;
use crate::growth::classify::is_excess_weight;
use crate::growth::evaluator::round_dp;
use crate::growth::GrowthEvaluator;
use crate::models::{ActivityLevel, Observation, Sex};
use serde::Serialize;

/// `TMB = slope * weight + intercept`, one pair per sex and age band
#[derive(Debug, Clone, Copy)]
struct LinearBand {
    slope: f64,
    intercept: f64,
}

impl LinearBand {
    const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    fn tmb(self, weight_kg: f64) -> f64 {
        self.slope * weight_kg + self.intercept
    }
}

/// Coefficients for one sex: age bands `<3`, `<10`, `>=10` years
#[derive(Debug, Clone, Copy)]
struct SexBands {
    under_3: LinearBand,
    under_10: LinearBand,
    ten_and_over: LinearBand,
}

impl SexBands {
    fn band_for_age(self, age_years: f64) -> LinearBand {
        if age_years < 3.0 {
            self.under_3
        } else if age_years < 10.0 {
            self.under_10
        } else {
            self.ten_and_over
        }
    }
}

/// Schofield (1985) coefficients
const SCHOFIELD_MALE: SexBands = SexBands {
    under_3: LinearBand::new(59.48, -30.33),
    under_10: LinearBand::new(22.7, 505.0),
    ten_and_over: LinearBand::new(13.4, 693.0),
};
const SCHOFIELD_FEMALE: SexBands = SexBands {
    under_3: LinearBand::new(58.29, -31.05),
    under_10: LinearBand::new(20.3, 486.0),
    ten_and_over: LinearBand::new(17.7, 659.0),
};

/// FAO/WHO/UNU (1985) coefficients
const WHO_MALE: SexBands = SexBands {
    under_3: LinearBand::new(60.9, -54.0),
    under_10: LinearBand::new(22.7, 495.0),
    ten_and_over: LinearBand::new(17.5, 651.0),
};
const WHO_FEMALE: SexBands = SexBands {
    under_3: LinearBand::new(61.0, -51.0),
    under_10: LinearBand::new(22.4, 499.0),
    ten_and_over: LinearBand::new(12.2, 746.0),
};

/// Schofield basal metabolic rate in kcal/day
#[must_use]
pub fn schofield_tmb(sex: Sex, weight_kg: f64, age_years: f64) -> f64 {
    let bands = match sex {
        Sex::Male => SCHOFIELD_MALE,
        Sex::Female => SCHOFIELD_FEMALE,
    };
    bands.band_for_age(age_years).tmb(weight_kg)
}

/// FAO/WHO/UNU basal metabolic rate in kcal/day
#[must_use]
pub fn who_tmb(sex: Sex, weight_kg: f64, age_years: f64) -> f64 {
    let bands = match sex {
        Sex::Male => WHO_MALE,
        Sex::Female => WHO_FEMALE,
    };
    bands.band_for_age(age_years).tmb(weight_kg)
}

/// Age-banded caloric target derived from the WHO-formula GET
///
/// When the BMI classification is Overweight or Obesity, the target is
/// reduced; "whichever leaves more" means the larger of the fixed-offset and
/// fractional reductions:
/// - under 6 years: no deficit;
/// - 6 to under 12 years: `max(get - 150, get * 0.90)`;
/// - 12 years and over: `max(get - 250, get * 0.85)`.
#[must_use]
pub fn caloric_target(get_who: f64, age_years: f64, bmi_classification: &str) -> f64 {
    if !is_excess_weight(bmi_classification) || age_years < 6.0 {
        return get_who;
    }

    let (fixed_offset, fraction) = if age_years < 12.0 {
        (150.0, 0.10)
    } else {
        (250.0, 0.15)
    };
    (get_who - fixed_offset).max(get_who * (1.0 - fraction))
}

/// Calorie estimation report for one observation
#[derive(Debug, Clone, Serialize)]
pub struct CalorieReport {
    /// Basal rate by the Schofield formula, kcal/day
    pub tmb_schofield: f64,
    /// Basal rate by the FAO/WHO/UNU formula, kcal/day
    pub tmb_who: f64,
    /// Total expenditure by the Schofield formula, kcal/day
    pub get_schofield: f64,
    /// Total expenditure by the FAO/WHO/UNU formula, kcal/day
    pub get_who: f64,
    /// Body mass index, kg/m²
    pub bmi: f64,
    /// BMI-for-age percentile from the WHO reference
    pub bmi_percentile: f64,
    /// BMI-for-age classification
    pub bmi_classification: &'static str,
    /// Multiplier applied to the basal rate
    pub activity_factor: f64,
    /// Activity level token
    pub activity_level: &'static str,
    /// Daily caloric target after the deficit policy, kcal/day
    pub caloric_target: f64,
    /// Advisory text when a deficit was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Build a calorie report for an observation
///
/// Runs the BMI evaluation to obtain the classification driving the
/// caloric-target policy, so the report and the BMI endpoint always agree.
///
/// # Errors
///
/// Propagates reference-lookup and numeric-domain faults from the BMI
/// evaluation.
pub fn estimate_calories(
    evaluator: &GrowthEvaluator,
    observation: &Observation,
    activity: ActivityLevel,
) -> AppResult<CalorieReport> {
    let age_years = observation.age_years();
    let tmb_schofield = schofield_tmb(observation.sex, observation.weight_kg, age_years);
    let tmb_who = who_tmb(observation.sex, observation.weight_kg, age_years);

    let factor = activity.factor();
    let get_schofield = tmb_schofield * factor;
    let get_who = tmb_who * factor;

    let bmi_result = evaluator.evaluate_bmi(observation)?;
    let target = caloric_target(get_who, age_years, bmi_result.classification);

    let suggestion = if target < get_who {
        Some(format!(
            "A gentle caloric deficit is suggested: {} kcal/day as target.",
            round_dp(target, 2)
        ))
    } else {
        None
    };

    Ok(CalorieReport {
        tmb_schofield: round_dp(tmb_schofield, 2),
        tmb_who: round_dp(tmb_who, 2),
        get_schofield: round_dp(get_schofield, 2),
        get_who: round_dp(get_who, 2),
        bmi: bmi_result.value,
        bmi_percentile: bmi_result.percentile,
        bmi_classification: bmi_result.classification,
        activity_factor: factor,
        activity_level: activity.as_str(),
        caloric_target: round_dp(target, 2),
        suggestion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schofield_reference_scenario() {
        // Male, 30.5 kg, 8 years: 22.7 * 30.5 + 505 = 1197.35
        let tmb = schofield_tmb(Sex::Male, 30.5, 8.0);
        assert!((tmb - 1197.35).abs() < 1e-9);
    }

    #[test]
    fn test_who_reference_scenario() {
        // Male, 30.5 kg, 8 years: 22.7 * 30.5 + 495 = 1187.35
        let tmb = who_tmb(Sex::Male, 30.5, 8.0);
        assert!((tmb - 1187.35).abs() < 1e-9);
    }

    #[test]
    fn test_get_with_moderate_factor() {
        let get = schofield_tmb(Sex::Male, 30.5, 8.0) * ActivityLevel::Moderate.factor();
        assert!((get - 1796.025).abs() < 1e-9);
    }

    #[test]
    fn test_age_band_boundaries() {
        // 3 years falls into the <10 band, 10 years into the >=10 band.
        assert!((schofield_tmb(Sex::Female, 14.0, 2.99) - (58.29 * 14.0 - 31.05)).abs() < 1e-9);
        assert!((schofield_tmb(Sex::Female, 14.0, 3.0) - (20.3 * 14.0 + 486.0)).abs() < 1e-9);
        assert!((who_tmb(Sex::Male, 32.0, 9.99) - (22.7 * 32.0 + 495.0)).abs() < 1e-9);
        assert!((who_tmb(Sex::Male, 32.0, 10.0) - (17.5 * 32.0 + 651.0)).abs() < 1e-9);
    }

    #[test]
    fn test_caloric_target_no_deficit_for_normal_weight() {
        assert!((caloric_target(1800.0, 8.0, "Normal weight") - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_caloric_target_under_six_holds_steady() {
        assert!((caloric_target(1500.0, 5.0, "Obesity") - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_caloric_target_mid_band_takes_larger_remainder() {
        // 2000 kcal at 8 years: max(1850, 1800) = 1850.
        assert!((caloric_target(2000.0, 8.0, "Overweight") - 1850.0).abs() < 1e-9);
        // 1000 kcal at 8 years: max(850, 900) = 900.
        assert!((caloric_target(1000.0, 8.0, "Obesity") - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_caloric_target_teen_band() {
        // 2400 kcal at 14 years: max(2150, 2040) = 2150.
        assert!((caloric_target(2400.0, 14.0, "Obesity") - 2150.0).abs() < 1e-9);
        // 1200 kcal at 14 years: max(950, 1020) = 1020.
        assert!((caloric_target(1200.0, 14.0, "Obesity") - 1020.0).abs() < 1e-9);
    }
}
