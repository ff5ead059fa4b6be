// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the Calq client.
//!
//! This crate provides:
//! - A pre-configured HTTP client builder with a consistent User-Agent header
//! - Retry logic with exponential backoff for transient failures

mod client;
mod retry;

pub use client::{builder, user_agent, SDK_NAME};
pub use retry::{retry, RetryConfig, RetryableError};
