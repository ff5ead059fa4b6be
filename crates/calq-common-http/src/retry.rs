// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Retry with exponential backoff for transport-level failures.
//!
//! Only errors are retried. A response that arrives, whatever its status, is
//! handed back to the caller unchanged.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryConfig {
	/// Total attempts, including the first one.
	pub max_attempts: u32,
	pub base_delay: Duration,
	pub max_delay: Duration,
	pub backoff_factor: f64,
	/// Scales each delay by a random factor in `[0.5, 1.5)`.
	pub jitter: bool,
}

impl RetryConfig {
	/// A single attempt with no retries.
	pub fn none() -> Self {
		Self {
			max_attempts: 1,
			..Self::default()
		}
	}
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			base_delay: Duration::from_millis(200),
			max_delay: Duration::from_secs(5),
			backoff_factor: 2.0,
			jitter: true,
		}
	}
}

/// Classifies an error as transient.
pub trait RetryableError {
	fn is_retryable(&self) -> bool;
}

impl RetryableError for reqwest::Error {
	fn is_retryable(&self) -> bool {
		self.is_timeout() || self.is_connect()
	}
}

fn calculate_delay(cfg: &RetryConfig, attempt: u32) -> Duration {
	let exponential = cfg.base_delay.as_secs_f64() * cfg.backoff_factor.powi(attempt as i32);
	let capped = exponential.min(cfg.max_delay.as_secs_f64());

	if cfg.jitter {
		Duration::from_secs_f64(capped * (0.5 + fastrand::f64()))
	} else {
		Duration::from_secs_f64(capped)
	}
}

/// Runs `f` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` is reached. The last error is returned unchanged.
pub async fn retry<F, Fut, T, E>(cfg: &RetryConfig, mut f: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
	E: RetryableError + std::fmt::Debug,
{
	let mut attempt = 0;

	loop {
		let err = match f().await {
			Ok(result) => return Ok(result),
			Err(err) => err,
		};
		attempt += 1;

		if !err.is_retryable() || attempt >= cfg.max_attempts {
			return Err(err);
		}

		let delay = calculate_delay(cfg, attempt - 1);
		warn!(
			error = ?err,
			attempt,
			max_attempts = cfg.max_attempts,
			delay_ms = delay.as_millis(),
			"retrying after error"
		);

		tokio::time::sleep(delay).await;
	}
}
