// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use serde::Serialize;

use crate::error::Result;

/// Encodes `payload` as JSON in a POST request to `url`.
pub fn build_request<P>(url: &str, payload: &P) -> Result<http::Request<Vec<u8>>>
where
	P: Serialize + ?Sized,
{
	let body = serde_json::to_vec(payload)?;
	let request = http::Request::builder()
		.method(Method::POST)
		.uri(url)
		.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
		.body(body)?;
	Ok(request)
}
