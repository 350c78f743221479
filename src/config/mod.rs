// ABOUTME: Configuration module organization for the anthro server
// ABOUTME: Re-exports environment-based server configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

/// Environment-based configuration management
pub mod environment;

pub use environment::{CorsConfig, LlmConfig, ReferenceDataConfig, ServerConfig};
