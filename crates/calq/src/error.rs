// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Calq client.

use calq_common_config::SecretEnvError;
use calq_common_http::RetryableError;
use calq_core::ValidationError;
use thiserror::Error;

/// Calq client errors.
///
/// Properties that merely fail validation are not errors: they are reported
/// through the client's [`ValidationReporter`](crate::ValidationReporter) and
/// the request is sent anyway.
#[derive(Debug, Error)]
pub enum CalqError {
	/// Write key is missing or empty.
	#[error("invalid write key: must be a non-empty string")]
	InvalidWriteKey,

	/// Base URL could not be parsed.
	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),

	/// Loading configuration from the environment failed.
	#[error("configuration error: {0}")]
	Config(#[from] SecretEnvError),

	/// A schema rule could not be evaluated against the supplied value.
	/// Nothing was sent.
	#[error("property schema defect: {0}")]
	SchemaDefect(ValidationError),

	/// Payload could not be encoded as JSON.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	/// The outbound request could not be assembled.
	#[error("invalid request: {0}")]
	InvalidRequest(#[from] http::Error),

	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// A custom transport failed.
	#[error("transport failed: {0}")]
	Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RetryableError for CalqError {
	fn is_retryable(&self) -> bool {
		match self {
			CalqError::RequestFailed(e) => e.is_retryable(),
			_ => false,
		}
	}
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, CalqError>;
