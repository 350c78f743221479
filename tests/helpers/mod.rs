// ABOUTME: Shared helpers for integration tests
// ABOUTME: Axum oneshot harness and reference-table fixtures

// Each integration test crate compiles this module independently and uses a
// different subset of it.
#![allow(dead_code)]

pub mod axum_test;
pub mod fixtures;
