// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where validation failures go.
//!
//! A failed validation never stops a request. The client hands the failure
//! to its [`ValidationReporter`] and sends the payload unchanged. Without a
//! reporter configured, failures are dropped silently.

use calq_core::{SchemaKind, ValidationError};
use tracing::debug;

/// Receives validation failures for properties that are about to be sent.
pub trait ValidationReporter: Send + Sync {
	fn report(&self, schema: SchemaKind, error: &ValidationError);
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ValidationReporter for NoopReporter {
	fn report(&self, _schema: SchemaKind, _error: &ValidationError) {}
}

/// Emits each report as a `tracing` debug event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ValidationReporter for TracingReporter {
	fn report(&self, schema: SchemaKind, error: &ValidationError) {
		debug!(
			schema = %schema,
			property = error.property(),
			error = %error,
			"Properties failed validation"
		);
	}
}

impl<F> ValidationReporter for F
where
	F: Fn(SchemaKind, &ValidationError) + Send + Sync,
{
	fn report(&self, schema: SchemaKind, error: &ValidationError) {
		self(schema, error)
	}
}
