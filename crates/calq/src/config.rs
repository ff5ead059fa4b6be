// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use calq_common_http::RetryConfig;
use calq_core::DEFAULT_API_ENDPOINT;

/// Environment variable holding the write key (`CALQ_WRITE_KEY_FILE` names a
/// file holding it instead).
pub const WRITE_KEY_ENV: &str = "CALQ_WRITE_KEY";

/// Environment variable overriding the API base URL.
pub const API_ENDPOINT_ENV: &str = "CALQ_API_ENDPOINT";

/// Configuration for the Calq client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Base URL the endpoint paths are appended to.
	pub base_url: String,
	/// Timeout for HTTP requests.
	pub request_timeout: Duration,
	/// Retry configuration for HTTP requests.
	pub retry_config: RetryConfig,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_API_ENDPOINT.to_string(),
			request_timeout: Duration::from_secs(10),
			retry_config: RetryConfig::default(),
		}
	}
}
