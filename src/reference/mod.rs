// ABOUTME: WHO growth-reference table with nearest-age LMS row lookup
// ABOUTME: Immutable in-memory rows keyed by measurement type, sex, and age in months
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! # WHO Growth Reference Table
//!
//! An immutable set of LMS (Lambda-Mu-Sigma) rows loaded once at startup.
//! Lookup selects the row nearest in age to the query within a
//! `(measurement, sex)` partition. Because the table never changes after
//! construction, handlers share it through an `Arc` without locking.

/// CSV loading for the two WHO source tables
pub mod loader;

pub use loader::ReferenceTableLoader;

use crate::errors::{AppError, AppResult};
use crate::models::Sex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Measurement families covered by the reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    /// Body mass index for age
    Bmi,
    /// Standing height (cm) for age
    HeightForAge,
    /// Body weight (kg) for age
    WeightForAge,
}

impl MeasurementType {
    /// Label used in evaluation results
    #[must_use]
    pub const fn result_label(self) -> &'static str {
        match self {
            Self::Bmi => "BMI (WHO)",
            Self::HeightForAge => "Height-for-age (WHO)",
            Self::WeightForAge => "Weight-for-age (WHO)",
        }
    }
}

impl FromStr for MeasurementType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "BMI"/"HFA"/"WFA" are the codes used by the unified source table
        match s.to_uppercase().as_str() {
            "BMI" => Ok(Self::Bmi),
            "HFA" => Ok(Self::HeightForAge),
            "WFA" => Ok(Self::WeightForAge),
            other => Err(AppError::invalid_input(format!(
                "Unknown measurement type code '{other}': expected BMI, HFA, or WFA"
            ))),
        }
    }
}

/// One row of an LMS reference table
///
/// Invariants, enforced at load time: `mu > 0`, `sigma > 0`, and `age_months`
/// unique within a `(measurement, sex)` partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub measurement: MeasurementType,
    pub sex: Sex,
    pub age_months: u32,
    /// Box-Cox power (L)
    pub lambda: f64,
    /// Reference median (M)
    pub mu: f64,
    /// Coefficient of variation (S)
    pub sigma: f64,
}

impl ReferenceRow {
    /// Validate the per-row invariants
    pub(crate) fn check(&self) -> AppResult<()> {
        if self.mu <= 0.0 || !self.mu.is_finite() {
            return Err(AppError::data_integrity(format!(
                "Reference row ({:?}, {:?}, {} months) has non-positive median M = {}",
                self.measurement, self.sex, self.age_months, self.mu
            )));
        }
        if self.sigma <= 0.0 || !self.sigma.is_finite() {
            return Err(AppError::data_integrity(format!(
                "Reference row ({:?}, {:?}, {} months) has non-positive S = {}",
                self.measurement, self.sex, self.age_months, self.sigma
            )));
        }
        Ok(())
    }
}

/// Immutable in-memory growth-reference table
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    /// Build a table from rows, validating invariants
    ///
    /// # Errors
    ///
    /// Returns `AppError::DataIntegrity` when a row violates `M > 0` /
    /// `S > 0` or two rows in the same partition share an age.
    pub fn new(rows: Vec<ReferenceRow>) -> AppResult<Self> {
        for row in &rows {
            row.check()?;
        }

        let mut keys: Vec<(MeasurementType, Sex, u32)> = rows
            .iter()
            .map(|r| (r.measurement, r.sex, r.age_months))
            .collect();
        keys.sort_unstable();
        for pair in keys.windows(2) {
            if pair[0] == pair[1] {
                let (measurement, sex, age) = pair[0];
                return Err(AppError::data_integrity(format!(
                    "Duplicate reference row for ({measurement:?}, {sex:?}) at {age} months"
                )));
            }
        }

        Ok(Self { rows })
    }

    /// Number of rows in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the reference row nearest in age to the query
    ///
    /// Filters the `(measurement, sex)` partition, sorts ascending by
    /// `|row.age_months - age_months|` and then by `row.age_months`, and
    /// takes the first row. The secondary key makes the equidistant case
    /// deterministic: the lower age wins.
    ///
    /// # Errors
    ///
    /// Returns `AppError::DataIntegrity` when the partition is empty. The
    /// table is static, so this is a data fault rather than a user error and
    /// retrying cannot help.
    pub fn lookup(
        &self,
        measurement: MeasurementType,
        sex: Sex,
        age_months: u32,
    ) -> AppResult<&ReferenceRow> {
        self.rows
            .iter()
            .filter(|row| row.measurement == measurement && row.sex == sex)
            .min_by_key(|row| {
                let distance = row.age_months.abs_diff(age_months);
                (distance, row.age_months)
            })
            .ok_or_else(|| {
                AppError::data_integrity(format!(
                    "Reference table has no rows for ({measurement:?}, {sex:?})"
                ))
            })
    }
}
