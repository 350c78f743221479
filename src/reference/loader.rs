// ABOUTME: CSV loader for the WHO BMI and unified height/weight-for-age LMS tables
// ABOUTME: Parses source rows, maps table sex codes, and enforces load-time invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! CSV loading for the two WHO source tables.
//!
//! The BMI table carries `Sex,Month,L,M,S` columns; the unified table adds a
//! leading `Type` column with `HFA`/`WFA` codes. Sex is encoded 1 = male,
//! 2 = female in both. Malformed rows abort the load: the server must not
//! start on a table that would later surface as a per-request data fault.

use super::{MeasurementType, ReferenceRow, ReferenceTable};
use crate::errors::{AppError, AppResult};
use crate::models::Sex;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Row of the BMI-for-age source table
#[derive(Debug, Deserialize)]
struct BmiCsvRow {
    #[serde(rename = "Sex")]
    sex: u8,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "L")]
    lambda: f64,
    #[serde(rename = "M")]
    mu: f64,
    #[serde(rename = "S")]
    sigma: f64,
}

/// Row of the unified height/weight-for-age source table
#[derive(Debug, Deserialize)]
struct LmsCsvRow {
    #[serde(rename = "Type")]
    measurement: String,
    #[serde(rename = "Sex")]
    sex: u8,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "L")]
    lambda: f64,
    #[serde(rename = "M")]
    mu: f64,
    #[serde(rename = "S")]
    sigma: f64,
}

/// Loader assembling a [`ReferenceTable`] from the two CSV sources
#[derive(Debug, Default)]
pub struct ReferenceTableLoader {
    rows: Vec<ReferenceRow>,
}

impl ReferenceTableLoader {
    /// Create an empty loader
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the BMI-for-age table from a reader
    ///
    /// # Errors
    ///
    /// Returns a config error for malformed CSV and a data-integrity error
    /// for unknown sex codes.
    pub fn read_bmi(mut self, reader: impl Read) -> AppResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        for record in csv_reader.deserialize() {
            let row: BmiCsvRow = record
                .map_err(|e| AppError::config(format!("Malformed BMI reference CSV: {e}")))?;
            self.rows.push(ReferenceRow {
                measurement: MeasurementType::Bmi,
                sex: Sex::from_table_code(row.sex)?,
                age_months: row.month,
                lambda: row.lambda,
                mu: row.mu,
                sigma: row.sigma,
            });
        }
        Ok(self)
    }

    /// Read the unified height/weight-for-age table from a reader
    ///
    /// # Errors
    ///
    /// Returns a config error for malformed CSV and invalid-input /
    /// data-integrity errors for unknown type or sex codes.
    pub fn read_lms(mut self, reader: impl Read) -> AppResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        for record in csv_reader.deserialize() {
            let row: LmsCsvRow = record
                .map_err(|e| AppError::config(format!("Malformed LMS reference CSV: {e}")))?;
            self.rows.push(ReferenceRow {
                measurement: row.measurement.parse()?,
                sex: Sex::from_table_code(row.sex)?,
                age_months: row.month,
                lambda: row.lambda,
                mu: row.mu,
                sigma: row.sigma,
            });
        }
        Ok(self)
    }

    /// Load both tables from files in the configured data directory
    ///
    /// # Errors
    ///
    /// Returns a config error when a file cannot be opened and the parse /
    /// invariant errors of the individual readers.
    pub fn read_files(self, bmi_path: &Path, lms_path: &Path) -> AppResult<Self> {
        let bmi_file = std::fs::File::open(bmi_path).map_err(|e| {
            AppError::config(format!(
                "Cannot open BMI reference table {}: {e}",
                bmi_path.display()
            ))
        })?;
        let lms_file = std::fs::File::open(lms_path).map_err(|e| {
            AppError::config(format!(
                "Cannot open LMS reference table {}: {e}",
                lms_path.display()
            ))
        })?;
        self.read_bmi(bmi_file)?.read_lms(lms_file)
    }

    /// Finish loading, validating the table invariants
    ///
    /// # Errors
    ///
    /// Returns `AppError::DataIntegrity` when rows violate `M > 0` / `S > 0`
    /// or duplicate an age within a partition.
    pub fn build(self) -> AppResult<ReferenceTable> {
        let table = ReferenceTable::new(self.rows)?;
        info!(rows = table.len(), "Growth reference table loaded");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BMI_CSV: &str = "\
Sex,Month,L,M,S
1,60,-0.7387,15.2641,0.08046
2,60,-0.8886,15.2441,0.09692
";

    const LMS_CSV: &str = "\
Type,Sex,Month,L,M,S
HFA,2,60,1.0,109.4,0.0426
WFA,2,60,-0.0817,18.2,0.12655
";

    #[test]
    fn test_load_both_tables() {
        let table = ReferenceTableLoader::new()
            .read_bmi(BMI_CSV.as_bytes())
            .unwrap()
            .read_lms(LMS_CSV.as_bytes())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(table.len(), 4);
        let row = table
            .lookup(MeasurementType::HeightForAge, Sex::Female, 60)
            .unwrap();
        assert!((row.mu - 109.4).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_sex_code_rejected() {
        let csv = "Sex,Month,L,M,S\n3,60,-0.7,15.0,0.08\n";
        assert!(ReferenceTableLoader::new().read_bmi(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_unknown_type_code_rejected() {
        let csv = "Type,Sex,Month,L,M,S\nXXX,1,60,1.0,100.0,0.04\n";
        assert!(ReferenceTableLoader::new().read_lms(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_non_positive_sigma_rejected_at_build() {
        let csv = "Sex,Month,L,M,S\n1,60,-0.7,15.0,0.0\n";
        let result = ReferenceTableLoader::new()
            .read_bmi(csv.as_bytes())
            .unwrap()
            .build();
        assert!(result.is_err());
    }
}
