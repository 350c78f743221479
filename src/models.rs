// ABOUTME: Core domain types for anthropometric evaluation requests
// ABOUTME: Defines Sex, ActivityLevel, and the validated Observation input model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Domain models shared across the evaluation pipeline.
//!
//! Sex and activity tokens are parsed case-insensitively at the input
//! boundary; everything past [`Observation::new`] works with typed values
//! only.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Upper bound of the supported age range, inclusive (19 years)
pub const MAX_AGE_MONTHS: u32 = 228;

/// Biological sex as coded in the WHO reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Numeric code used by the WHO source tables (1 = male, 2 = female)
    #[must_use]
    pub const fn table_code(self) -> u8 {
        match self {
            Self::Male => 1,
            Self::Female => 2,
        }
    }

    /// Parse the WHO table code
    pub fn from_table_code(code: u8) -> AppResult<Self> {
        match code {
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unknown sex code {other}: expected 1 (male) or 2 (female)"
            ))),
        }
    }
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unrecognized sex token '{other}': expected M or F"
            ))),
        }
    }
}

/// Physical activity level selecting the energy-expenditure multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    Moderate,
    Active,
}

impl ActivityLevel {
    /// Fixed multiplier applied to the basal metabolic rate
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.3,
            Self::Moderate => 1.5,
            Self::Active => 1.75,
        }
    }

    /// Token emitted in calorie reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Moderate => "moderate",
            Self::Active => "active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Spanish tokens accepted for compatibility with the original clients
        match s.to_lowercase().as_str() {
            "sedentary" | "sedentario" => Ok(Self::Sedentary),
            "moderate" | "moderado" => Ok(Self::Moderate),
            "active" | "activo" => Ok(Self::Active),
            other => Err(AppError::invalid_input(format!(
                "Unrecognized activity level '{other}': expected sedentary, moderate, or active"
            ))),
        }
    }
}

/// A validated anthropometric observation
///
/// Construction enforces the contractual bounds (age 0-228 months, positive
/// weight and height); code downstream of [`Observation::new`] trusts them
/// and does not re-validate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub sex: Sex,
    pub age_months: u32,
    pub weight_kg: f64,
    pub height_m: f64,
}

impl Observation {
    /// Create an observation, validating every bound
    ///
    /// # Errors
    ///
    /// Returns `AppError::ValueOutOfRange` when age exceeds 228 months or
    /// weight/height are not strictly positive.
    pub fn new(sex: Sex, age_months: u32, weight_kg: f64, height_m: f64) -> AppResult<Self> {
        if age_months > MAX_AGE_MONTHS {
            return Err(AppError::out_of_range(format!(
                "age_months {age_months} is outside the supported range (0-{MAX_AGE_MONTHS})"
            )));
        }
        if weight_kg <= 0.0 || !weight_kg.is_finite() {
            return Err(AppError::out_of_range(format!(
                "weight {weight_kg} must be a positive number of kilograms"
            )));
        }
        if height_m <= 0.0 || !height_m.is_finite() {
            return Err(AppError::out_of_range(format!(
                "height {height_m} must be a positive number of meters"
            )));
        }

        Ok(Self {
            sex,
            age_months,
            weight_kg,
            height_m,
        })
    }

    /// Body mass index in kg/m²
    #[must_use]
    pub fn bmi(&self) -> f64 {
        self.weight_kg / (self.height_m * self.height_m)
    }

    /// Height in centimeters, the unit the WHO height-for-age table uses
    #[must_use]
    pub fn height_cm(&self) -> f64 {
        self.height_m * 100.0
    }

    /// Age in fractional years
    #[must_use]
    pub fn age_years(&self) -> f64 {
        f64::from(self.age_months) / 12.0
    }
}

/// Wire-format evaluation request body
///
/// The original service spoke Spanish field names; those are kept as serde
/// aliases so existing clients keep working.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    #[serde(alias = "sexo")]
    pub sex: String,
    #[serde(alias = "edad_meses")]
    pub age_months: u32,
    #[serde(alias = "peso")]
    pub weight: f64,
    #[serde(alias = "altura")]
    pub height: f64,
}

impl TryFrom<EvaluationRequest> for Observation {
    type Error = AppError;

    fn try_from(request: EvaluationRequest) -> Result<Self, Self::Error> {
        let sex = request.sex.parse()?;
        Self::new(sex, request.age_months, request.weight, request.height)
    }
}
