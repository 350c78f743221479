// ABOUTME: Tower middleware layers for the HTTP surface
// ABOUTME: Currently CORS configuration; tracing comes from tower-http directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

/// CORS layer construction
pub mod cors;

pub use cors::setup_cors;
