// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sending built requests to the API.

use std::time::Duration;

use bytes::Bytes;
use calq_common_http::RetryConfig;
use reqwest::Client;
use tracing::debug;

use crate::error::{CalqError, Result};

/// Sends a fully built request and returns whatever comes back.
///
/// The client never looks at the response status; a transport only fails
/// when no response could be obtained.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
	async fn send(&self, request: http::Request<Vec<u8>>) -> Result<http::Response<Bytes>>;
}

/// [`Transport`] backed by `reqwest`, with retries on connection failures
/// and timeouts.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	http_client: Client,
	retry_config: RetryConfig,
}

impl ReqwestTransport {
	/// Builds a transport with the standard User-Agent and the given timeout.
	pub fn new(request_timeout: Duration, retry_config: RetryConfig) -> Result<Self> {
		let http_client = calq_common_http::builder()
			.timeout(request_timeout)
			.build()
			.map_err(CalqError::RequestFailed)?;
		Ok(Self::with_client(http_client, retry_config))
	}

	/// Uses an existing `reqwest` client as-is.
	pub fn with_client(http_client: Client, retry_config: RetryConfig) -> Self {
		Self {
			http_client,
			retry_config,
		}
	}
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
	async fn send(&self, request: http::Request<Vec<u8>>) -> Result<http::Response<Bytes>> {
		let (parts, body) = request.into_parts();
		let url = parts.uri.to_string();

		debug!(method = %parts.method, url = %url, bytes = body.len(), "Sending request");

		let response = calq_common_http::retry(&self.retry_config, || async {
			self
				.http_client
				.request(parts.method.clone(), &url)
				.headers(parts.headers.clone())
				.body(body.clone())
				.send()
				.await
		})
		.await
		.map_err(CalqError::RequestFailed)?;

		let status = response.status();
		let headers = response.headers().clone();
		let body = response.bytes().await.map_err(CalqError::RequestFailed)?;

		debug!(url = %url, status = status.as_u16(), "Received response");

		let mut out = http::Response::new(body);
		*out.status_mut() = status;
		*out.headers_mut() = headers;
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_builds_client() {
		let transport = ReqwestTransport::new(Duration::from_secs(5), RetryConfig::none());
		assert!(transport.is_ok());
	}
}
