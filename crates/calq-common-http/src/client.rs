// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

/// Name sent in the User-Agent header.
pub const SDK_NAME: &str = "calq-rust";

/// Creates a client builder carrying the standard User-Agent header.
///
/// # Example
/// ```ignore
/// let client = calq_common_http::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the standard User-Agent string: `calq-rust/{version}`.
pub fn user_agent() -> String {
	format!("{SDK_NAME}/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_name_and_version() {
		let ua = user_agent();
		let (name, version) = ua.split_once('/').unwrap();
		assert_eq!(name, "calq-rust");
		assert!(!version.is_empty());
	}

	#[test]
	fn builder_builds() {
		assert!(builder().build().is_ok());
	}
}
