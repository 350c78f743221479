// ABOUTME: Google Gemini LLM client for meal-plan text generation
// ABOUTME: Minimal generateContent call with explicit timeout and structured error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! # Gemini Provider
//!
//! Thin client for the Generative Language API `generateContent` call.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with a key from Google AI
//! Studio. `ANTHRO_LLM_MODEL` overrides the default model and
//! `ANTHRO_LLM_TIMEOUT_SECS` the request timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::TextGenerator;
use crate::config::LlmConfig;
use crate::errors::{AppError, AppResult};

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for the Gemini generative API
#[derive(Debug)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiProvider {
    /// Create a provider from resolved configuration
    ///
    /// # Errors
    ///
    /// Returns a config error when the API key is absent or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &LlmConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("GEMINI_API_KEY is not set"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| API_BASE_URL.to_owned()),
        })
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        )
    }

    fn map_api_error(status: u16, body: &str) -> AppError {
        match status {
            429 => AppError::external_service("gemini", "Rate limit exceeded"),
            500..=599 => AppError::new(
                crate::errors::ErrorCode::ExternalServiceUnavailable,
                format!("gemini: upstream error {status}"),
            ),
            _ => AppError::external_service("gemini", format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart {
                    text: prompt.to_owned(),
                }],
            }],
        };

        debug!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::external_service("gemini", "Request timed out")
                } else {
                    AppError::external_service("gemini", format!("HTTP request failed: {e}"))
                }
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service("gemini", format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service("gemini", format!("Unparseable response: {e}"))
            })?;

        if let Some(api_error) = gemini_response.error {
            return Err(AppError::external_service("gemini", api_error.message));
        }

        gemini_response
            .candidates
            .and_then(|mut candidates| candidates.drain(..).next())
            .and_then(|candidate| candidate.content)
            .and_then(|mut content| content.parts.drain(..).next())
            .map(|part| part.text)
            .ok_or_else(|| AppError::external_service("gemini", "Response carried no content"))
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
