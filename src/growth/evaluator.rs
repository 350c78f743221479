// ABOUTME: Evaluation pipeline tying reference lookup, z-score, percentile, and classification
// ABOUTME: One evaluator per process sharing the immutable reference table via Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! The evaluation pipeline.
//!
//! `GrowthEvaluator` collapses what were once near-identical per-endpoint
//! formula blocks into one path: look up the nearest reference row, z-score
//! the observed value, convert to a percentile, classify, and round for
//! output.

use super::{classify_bmi, classify_hfa, classify_wfa, lms_zscore, percentile, percentile_label};
use crate::errors::AppResult;
use crate::models::Observation;
use crate::reference::{MeasurementType, ReferenceTable};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Result of evaluating one measurement against the WHO reference
///
/// Derived per request, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// Measurement label, e.g. `"BMI (WHO)"`
    #[serde(rename = "type")]
    pub type_label: &'static str,
    /// Observed value in the reference table's unit, rounded for output
    pub value: f64,
    /// LMS Z-score, rounded to 2 decimals
    pub zscore: f64,
    /// Percentile rank 0-100, rounded to 1 decimal
    pub percentile: f64,
    /// Clinical category label
    pub classification: &'static str,
    /// Advisory annotation for extreme percentiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_label: Option<&'static str>,
}

/// Round to `decimals` decimal places for response output
#[must_use]
pub(crate) fn round_dp(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Growth evaluator over a shared, immutable reference table
#[derive(Debug, Clone)]
pub struct GrowthEvaluator {
    table: Arc<ReferenceTable>,
}

impl GrowthEvaluator {
    /// Create an evaluator over a loaded reference table
    #[must_use]
    pub fn new(table: Arc<ReferenceTable>) -> Self {
        Self { table }
    }

    /// Access the underlying reference table
    #[must_use]
    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Evaluate BMI-for-age
    ///
    /// # Errors
    ///
    /// Propagates reference-lookup and numeric-domain faults.
    pub fn evaluate_bmi(&self, observation: &Observation) -> AppResult<EvaluationResult> {
        self.evaluate(MeasurementType::Bmi, observation)
    }

    /// Evaluate height-for-age
    ///
    /// # Errors
    ///
    /// Propagates reference-lookup and numeric-domain faults.
    pub fn evaluate_hfa(&self, observation: &Observation) -> AppResult<EvaluationResult> {
        self.evaluate(MeasurementType::HeightForAge, observation)
    }

    /// Evaluate weight-for-age
    ///
    /// # Errors
    ///
    /// Propagates reference-lookup and numeric-domain faults.
    pub fn evaluate_wfa(&self, observation: &Observation) -> AppResult<EvaluationResult> {
        self.evaluate(MeasurementType::WeightForAge, observation)
    }

    /// Evaluate one measurement type for an observation
    ///
    /// # Errors
    ///
    /// Returns `AppError::DataIntegrity` when the reference partition is
    /// empty and `AppError::NumericDomain` if a non-positive value reaches
    /// the LMS transform.
    pub fn evaluate(
        &self,
        measurement: MeasurementType,
        observation: &Observation,
    ) -> AppResult<EvaluationResult> {
        // Height is z-scored in centimeters: the reference table is
        // calibrated in cm. BMI and weight use their natural units.
        let (value, value_decimals) = match measurement {
            MeasurementType::Bmi => (observation.bmi(), 2),
            MeasurementType::HeightForAge => (observation.height_cm(), 1),
            MeasurementType::WeightForAge => (observation.weight_kg, 2),
        };

        let row = self
            .table
            .lookup(measurement, observation.sex, observation.age_months)?;
        let z = lms_zscore(value, row.lambda, row.mu, row.sigma)?;
        let p = percentile(z);

        let classification = match measurement {
            MeasurementType::Bmi => classify_bmi(p),
            MeasurementType::HeightForAge => classify_hfa(z),
            MeasurementType::WeightForAge => classify_wfa(z),
        };

        debug!(
            measurement = ?measurement,
            age_months = observation.age_months,
            reference_age = row.age_months,
            zscore = z,
            percentile = p,
            classification,
            "Evaluated observation"
        );

        Ok(EvaluationResult {
            type_label: measurement.result_label(),
            value: round_dp(value, value_decimals),
            zscore: round_dp(z, 2),
            percentile: round_dp(p, 1),
            classification,
            percentile_label: percentile_label(p),
        })
    }
}
