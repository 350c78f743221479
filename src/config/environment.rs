// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses port, CORS, reference-data paths, and LLM settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Environment-based configuration management.
//!
//! Everything is environment-driven with sensible development defaults; the
//! binary logs a one-line summary at startup so a misconfigured deployment
//! is visible immediately.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default HTTP port, matching the original service
const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default directory holding the WHO reference CSVs
const DEFAULT_DATA_DIR: &str = "data";

/// Default meal-plan generation timeout
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 45;

/// Read an environment variable with a default value
fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// CORS settings
    pub cors: CorsConfig,
    /// Reference-table locations
    pub reference: ReferenceDataConfig,
    /// Generative-text provider settings
    pub llm: LlmConfig,
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*` for any origin
    pub allowed_origins: String,
}

/// Locations of the two WHO reference CSVs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDataConfig {
    /// BMI-for-age table (`Sex,Month,L,M,S`)
    pub bmi_table: PathBuf,
    /// Unified height/weight-for-age table (`Type,Sex,Month,L,M,S`)
    pub lms_table: PathBuf,
}

/// Generative-text provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; the meal-plan endpoint is disabled without it
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model override
    pub model: Option<String>,
    /// API base URL override
    pub api_base: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            api_base: None,
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        let http_port = env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
            .parse::<u16>()
            .context("HTTP_PORT must be a valid port number")?;

        let data_dir = PathBuf::from(env_var_or("REFERENCE_DATA_DIR", DEFAULT_DATA_DIR));

        let timeout_secs = env_var_or("ANTHRO_LLM_TIMEOUT_SECS", &DEFAULT_LLM_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("ANTHRO_LLM_TIMEOUT_SECS must be a number of seconds")?;

        Ok(Self {
            http_port,
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            reference: ReferenceDataConfig {
                bmi_table: data_dir.join("who_bmi_clean.csv"),
                lms_table: data_dir.join("who_lms_all_clean.csv"),
            },
            llm: LlmConfig {
                api_key: env::var("GEMINI_API_KEY").ok(),
                model: env::var("ANTHRO_LLM_MODEL").ok(),
                api_base: env::var("ANTHRO_LLM_API_BASE").ok(),
                timeout_secs,
            },
        })
    }

    /// One-line configuration summary for startup logging
    ///
    /// Never includes the API key.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} cors={} bmi_table={} lms_table={} llm={}",
            self.http_port,
            self.cors.allowed_origins,
            self.reference.bmi_table.display(),
            self.reference.lms_table.display(),
            if self.llm.api_key.is_some() {
                "configured"
            } else {
                "disabled"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig {
            http_port: DEFAULT_HTTP_PORT,
            cors: CorsConfig {
                allowed_origins: "*".to_owned(),
            },
            reference: ReferenceDataConfig {
                bmi_table: PathBuf::from("data/who_bmi_clean.csv"),
                lms_table: PathBuf::from("data/who_lms_all_clean.csv"),
            },
            llm: LlmConfig::default(),
        };

        assert_eq!(config.llm.timeout_secs, DEFAULT_LLM_TIMEOUT_SECS);
        let summary = config.summary();
        assert!(summary.contains("port=8000"));
        assert!(summary.contains("llm=disabled"));
    }
}
