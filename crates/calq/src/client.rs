// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Calq client for tracking actions, updating profiles and transferring
//! actors.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use calq_common_config::{load_secret_env, SecretString};
use calq_common_http::RetryConfig;
use calq_core::{
	ActionPayload, Endpoint, ProfilePayload, PropertyMap, SchemaKind, TransferPayload,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ClientConfig, API_ENDPOINT_ENV, WRITE_KEY_ENV};
use crate::error::{CalqError, Result};
use crate::properties::Properties;
use crate::report::{NoopReporter, ValidationReporter};
use crate::request::build_request;
use crate::transport::{ReqwestTransport, Transport};

/// SDK version for identification.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An action performed by an actor, as passed to [`CalqClient::track_action`].
#[derive(Debug, Clone)]
pub struct TrackAction {
	pub actor: String,
	pub action_name: String,
	pub properties: Properties,
	pub ip_address: Option<String>,
	pub timestamp: Option<NaiveDateTime>,
}

impl TrackAction {
	pub fn new(actor: impl Into<String>, action_name: impl Into<String>) -> Self {
		Self {
			actor: actor.into(),
			action_name: action_name.into(),
			properties: Properties::new(),
			ip_address: None,
			timestamp: None,
		}
	}

	pub fn properties(mut self, properties: Properties) -> Self {
		self.properties = properties;
		self
	}

	/// Sets the IP address the action originated from.
	pub fn ip_address(mut self, ip_address: impl Into<String>) -> Self {
		self.ip_address = Some(ip_address.into());
		self
	}

	/// Sets when the action happened, in UTC. Defaults to the time the API
	/// receives the request.
	pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
		self.timestamp = Some(timestamp);
		self
	}
}

/// Builder for constructing a CalqClient.
pub struct CalqClientBuilder {
	write_key: Option<SecretString>,
	config: ClientConfig,
	transport: Option<Arc<dyn Transport>>,
	reporter: Arc<dyn ValidationReporter>,
}

impl CalqClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			write_key: None,
			config: ClientConfig::default(),
			transport: None,
			reporter: Arc::new(NoopReporter),
		}
	}

	/// Creates a builder from `CALQ_WRITE_KEY` (or `CALQ_WRITE_KEY_FILE`) and
	/// `CALQ_API_ENDPOINT`. Unset variables leave the defaults in place.
	pub fn from_env() -> Result<Self> {
		let mut builder = Self::new();
		builder.write_key = load_secret_env(WRITE_KEY_ENV)?;
		if let Ok(base_url) = std::env::var(API_ENDPOINT_ENV) {
			builder = builder.base_url(base_url);
		}
		Ok(builder)
	}

	/// Sets the write key of the Calq project.
	pub fn write_key(mut self, key: impl Into<SecretString>) -> Self {
		self.write_key = Some(key.into());
		self
	}

	/// Sets the base URL of the Calq API.
	///
	/// Default: `http://api.calq.io`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.config.base_url = url.into();
		self
	}

	/// Sets the HTTP request timeout of the default transport.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = timeout;
		self
	}

	/// Sets the retry configuration of the default transport.
	pub fn retry_config(mut self, config: RetryConfig) -> Self {
		self.config.retry_config = config;
		self
	}

	/// Replaces the default `reqwest` transport. Timeout and retry settings
	/// do not apply to a custom transport.
	pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
		self.transport = Some(Arc::new(transport));
		self
	}

	/// Sets where validation failures are reported. Default: dropped.
	pub fn validation_reporter(mut self, reporter: impl ValidationReporter + 'static) -> Self {
		self.reporter = Arc::new(reporter);
		self
	}

	/// Builds the CalqClient.
	pub fn build(self) -> Result<CalqClient> {
		let write_key = self
			.write_key
			.filter(|key| !key.expose().is_empty())
			.ok_or(CalqError::InvalidWriteKey)?;

		let base_url = self.config.base_url.trim_end_matches('/').to_string();
		reqwest::Url::parse(&base_url).map_err(|e| CalqError::InvalidBaseUrl(e.to_string()))?;

		let transport = match self.transport {
			Some(transport) => transport,
			None => Arc::new(ReqwestTransport::new(
				self.config.request_timeout,
				self.config.retry_config.clone(),
			)?),
		};

		info!(
			base_url = %base_url,
			sdk_name = calq_common_http::SDK_NAME,
			sdk_version = SDK_VERSION,
			"Calq client initialized"
		);

		Ok(CalqClient {
			inner: Arc::new(CalqClientInner {
				write_key,
				base_url,
				transport,
				reporter: self.reporter,
			}),
		})
	}
}

impl Default for CalqClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct CalqClientInner {
	write_key: SecretString,
	base_url: String,
	transport: Arc<dyn Transport>,
	reporter: Arc<dyn ValidationReporter>,
}

/// Client for the Calq write API.
///
/// Properties are checked against the relevant schema before sending.
/// Failures go to the configured [`ValidationReporter`] and the request is
/// sent anyway; the API ignores what it does not understand. Responses are
/// returned untouched, whatever their status.
///
/// # Example
///
/// ```ignore
/// use calq::{CalqClient, Properties, TrackAction};
///
/// let client = CalqClient::builder()
///     .write_key("allworkandnoplaymakesjackadullboy")
///     .build()?;
///
/// client.track_action(
///     TrackAction::new("test_actor", "Does Amazing Thing")
///         .properties(Properties::new().special("country", "NL"))
///         .ip_address("127.1.2.7"),
/// ).await?;
///
/// client.transfer_user("anonymous_42", "jack@overlook.example").await?;
/// ```
#[derive(Clone)]
pub struct CalqClient {
	inner: Arc<CalqClientInner>,
}

impl CalqClient {
	/// Creates a new builder for constructing a CalqClient.
	pub fn builder() -> CalqClientBuilder {
		CalqClientBuilder::new()
	}

	/// Base URL requests are sent to, without a trailing slash.
	pub fn base_url(&self) -> &str {
		&self.inner.base_url
	}

	/// Records an action. Properties are checked against the action schema.
	pub async fn track_action(&self, action: TrackAction) -> Result<http::Response<Bytes>> {
		let properties = action.properties.into_map();
		self.check_properties(SchemaKind::Action, &properties)?;

		let mut payload = ActionPayload::new(
			action.actor,
			action.action_name,
			self.inner.write_key.expose().as_str(),
			properties,
		);
		if let Some(ip_address) = action.ip_address {
			payload = payload.with_ip_address(ip_address);
		}
		if let Some(timestamp) = action.timestamp {
			payload = payload.with_timestamp(&timestamp);
		}

		self.send(Endpoint::Track, &payload).await
	}

	/// Updates an actor's profile. Properties are checked against the
	/// profile schema.
	pub async fn submit_profile(
		&self,
		actor: &str,
		properties: Properties,
	) -> Result<http::Response<Bytes>> {
		let properties = properties.into_map();
		self.check_properties(SchemaKind::Profile, &properties)?;

		let payload = ProfilePayload::new(actor, self.inner.write_key.expose().as_str(), properties);
		self.send(Endpoint::Profile, &payload).await
	}

	/// Moves everything recorded for `old_actor` onto `new_actor`, e.g. once
	/// an anonymous visitor signs in.
	pub async fn transfer_user(
		&self,
		old_actor: &str,
		new_actor: &str,
	) -> Result<http::Response<Bytes>> {
		let payload =
			TransferPayload::new(old_actor, new_actor, self.inner.write_key.expose().as_str());
		self.send(Endpoint::Transfer, &payload).await
	}

	fn check_properties(&self, kind: SchemaKind, properties: &PropertyMap) -> Result<()> {
		match kind.schema().validate(properties) {
			Ok(()) => Ok(()),
			Err(e) if e.is_schema_defect() => Err(CalqError::SchemaDefect(e)),
			Err(e) => {
				self.inner.reporter.report(kind, &e);
				Ok(())
			}
		}
	}

	async fn send<P: Serialize>(
		&self,
		endpoint: Endpoint,
		payload: &P,
	) -> Result<http::Response<Bytes>> {
		let url = endpoint.url(&self.inner.base_url);
		let request = build_request(&url, payload)?;

		debug!(endpoint = %endpoint, bytes = request.body().len(), "Dispatching Calq request");

		self.inner.transport.send(request).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use calq_core::ValidationError;
	use chrono::NaiveDate;
	use serde_json::{json, Value};
	use std::sync::Mutex;

	const WRITE_KEY: &str = "allworkandnoplaymakesjackadullboy";

	#[derive(Default)]
	struct RecordingTransport {
		requests: Mutex<Vec<(http::Method, String, Option<String>, Value)>>,
		status: u16,
	}

	impl RecordingTransport {
		fn with_status(status: u16) -> Self {
			Self {
				status,
				..Self::default()
			}
		}
	}

	#[async_trait::async_trait]
	impl Transport for Arc<RecordingTransport> {
		async fn send(&self, request: http::Request<Vec<u8>>) -> Result<http::Response<Bytes>> {
			let content_type = request
				.headers()
				.get(http::header::CONTENT_TYPE)
				.and_then(|v| v.to_str().ok())
				.map(str::to_string);
			let body: Value = serde_json::from_slice(request.body())?;
			self.requests.lock().unwrap().push((
				request.method().clone(),
				request.uri().to_string(),
				content_type,
				body,
			));

			let mut response = http::Response::new(Bytes::from_static(b"{}"));
			*response.status_mut() =
				http::StatusCode::from_u16(self.status).unwrap_or(http::StatusCode::OK);
			Ok(response)
		}
	}

	#[derive(Clone, Default)]
	struct RecordingReporter {
		reports: Arc<Mutex<Vec<(SchemaKind, ValidationError)>>>,
	}

	impl ValidationReporter for RecordingReporter {
		fn report(&self, schema: SchemaKind, error: &ValidationError) {
			self.reports.lock().unwrap().push((schema, error.clone()));
		}
	}

	fn client_with(
		transport: &Arc<RecordingTransport>,
		reporter: &RecordingReporter,
	) -> CalqClient {
		CalqClient::builder()
			.write_key(WRITE_KEY)
			.transport(Arc::clone(transport))
			.validation_reporter(reporter.clone())
			.build()
			.unwrap()
	}

	#[test]
	fn test_builder_requires_write_key() {
		let result = CalqClientBuilder::new().build();
		assert!(matches!(result, Err(CalqError::InvalidWriteKey)));
	}

	#[test]
	fn test_builder_rejects_empty_write_key() {
		let result = CalqClientBuilder::new().write_key("").build();
		assert!(matches!(result, Err(CalqError::InvalidWriteKey)));
	}

	#[test]
	fn test_builder_rejects_invalid_base_url() {
		let result = CalqClientBuilder::new()
			.write_key(WRITE_KEY)
			.base_url("not a url")
			.build();
		assert!(matches!(result, Err(CalqError::InvalidBaseUrl(_))));
	}

	#[test]
	fn test_builder_normalizes_base_url() {
		let client = CalqClientBuilder::new()
			.write_key(WRITE_KEY)
			.base_url("https://calq.example.com/")
			.build()
			.unwrap();
		assert_eq!(client.base_url(), "https://calq.example.com");
	}

	#[test]
	fn test_builder_defaults_to_public_api() {
		let client = CalqClientBuilder::new().write_key(WRITE_KEY).build().unwrap();
		assert_eq!(client.base_url(), "http://api.calq.io");
	}

	#[test]
	fn test_builder_from_env() {
		std::env::set_var(WRITE_KEY_ENV, WRITE_KEY);
		std::env::remove_var(format!("{WRITE_KEY_ENV}_FILE"));
		std::env::set_var(API_ENDPOINT_ENV, "https://calq.example.com");

		let client = CalqClientBuilder::from_env().unwrap().build().unwrap();
		assert_eq!(client.base_url(), "https://calq.example.com");
		assert_eq!(client.inner.write_key.expose(), WRITE_KEY);

		std::env::remove_var(WRITE_KEY_ENV);
		std::env::remove_var(API_ENDPOINT_ENV);
	}

	#[tokio::test]
	async fn test_track_action_sends_expected_payload() {
		let transport = Arc::new(RecordingTransport::default());
		let reporter = RecordingReporter::default();
		let client = client_with(&transport, &reporter);

		let timestamp = NaiveDate::from_ymd_opt(2014, 8, 19)
			.and_then(|d| d.and_hms_micro_opt(13, 16, 30, 1))
			.unwrap();
		let action = TrackAction::new("test_actor", "Does Amazing Thing")
			.properties(
				Properties::new()
					.special("country", "NL")
					.insert("custom_property", true),
			)
			.ip_address("127.1.2.7")
			.timestamp(timestamp);

		client.track_action(action).await.unwrap();

		let requests = transport.requests.lock().unwrap();
		assert_eq!(requests.len(), 1);
		let (method, url, content_type, body) = &requests[0];
		assert_eq!(method, http::Method::POST);
		assert_eq!(url, "http://api.calq.io/track");
		assert_eq!(content_type.as_deref(), Some("application/json"));
		assert_eq!(
			body,
			&json!({
				"actor": "test_actor",
				"action_name": "Does Amazing Thing",
				"write_key": WRITE_KEY,
				"properties": {"$country": "NL", "custom_property": true},
				"ip_address": "127.1.2.7",
				"timestamp": "2014-08-19 13:16:30.000001"
			})
		);
		assert!(reporter.reports.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_invalid_properties_are_reported_and_still_sent() {
		let transport = Arc::new(RecordingTransport::default());
		let reporter = RecordingReporter::default();
		let client = client_with(&transport, &reporter);

		let action = TrackAction::new("test_actor", "Does Amazing Thing")
			.properties(Properties::new().special("gender", "I prefer not to say"));
		client.track_action(action).await.unwrap();

		let reports = reporter.reports.lock().unwrap();
		assert_eq!(reports.len(), 1);
		assert_eq!(reports[0].0, SchemaKind::Action);
		assert!(matches!(reports[0].1, ValidationError::InvalidOption { .. }));

		let requests = transport.requests.lock().unwrap();
		assert_eq!(requests.len(), 1);
		assert_eq!(
			requests[0].3["properties"],
			json!({"$gender": "I prefer not to say"})
		);
	}

	#[tokio::test]
	async fn test_schema_defect_aborts_without_sending() {
		let transport = Arc::new(RecordingTransport::default());
		let reporter = RecordingReporter::default();
		let client = client_with(&transport, &reporter);

		let action = TrackAction::new("test_actor", "Buys Thing").properties(
			Properties::new()
				.special("sale_value", 10)
				.special("sale_currency", 978),
		);
		let result = client.track_action(action).await;

		assert!(matches!(result, Err(CalqError::SchemaDefect(_))));
		assert!(transport.requests.lock().unwrap().is_empty());
		assert!(reporter.reports.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_submit_profile_uses_profile_schema() {
		let transport = Arc::new(RecordingTransport::default());
		let reporter = RecordingReporter::default();
		let client = client_with(&transport, &reporter);

		// Valid for profiles, not for actions.
		client
			.submit_profile(
				"test_actor",
				Properties::new().special("email", "jack@overlook.example"),
			)
			.await
			.unwrap();
		assert!(reporter.reports.lock().unwrap().is_empty());

		// Valid for actions, not for profiles.
		client
			.submit_profile("test_actor", Properties::new().special("sale_value", 1))
			.await
			.unwrap();

		let reports = reporter.reports.lock().unwrap();
		assert_eq!(reports.len(), 1);
		assert_eq!(reports[0].0, SchemaKind::Profile);

		let requests = transport.requests.lock().unwrap();
		assert_eq!(requests.len(), 2);
		assert_eq!(requests[0].1, "http://api.calq.io/profile");
		assert_eq!(
			requests[0].3,
			json!({
				"actor": "test_actor",
				"write_key": WRITE_KEY,
				"properties": {"$email": "jack@overlook.example"}
			})
		);
	}

	#[tokio::test]
	async fn test_transfer_user_payload() {
		let transport = Arc::new(RecordingTransport::default());
		let reporter = RecordingReporter::default();
		let client = client_with(&transport, &reporter);

		client
			.transfer_user("test_actor", "test_actor_2")
			.await
			.unwrap();

		let requests = transport.requests.lock().unwrap();
		assert_eq!(requests[0].1, "http://api.calq.io/transfer");
		assert_eq!(
			requests[0].3,
			json!({
				"old_actor": "test_actor",
				"new_actor": "test_actor_2",
				"write_key": WRITE_KEY
			})
		);
	}

	#[tokio::test]
	async fn test_error_status_is_returned_not_raised() {
		let transport = Arc::new(RecordingTransport::with_status(500));
		let reporter = RecordingReporter::default();
		let client = client_with(&transport, &reporter);

		let response = client
			.transfer_user("test_actor", "test_actor_2")
			.await
			.unwrap();
		assert_eq!(response.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[tokio::test]
	async fn test_transport_failure_propagates() {
		struct FailingTransport;

		#[async_trait::async_trait]
		impl Transport for FailingTransport {
			async fn send(&self, _request: http::Request<Vec<u8>>) -> Result<http::Response<Bytes>> {
				Err(CalqError::Transport("connection refused".into()))
			}
		}

		let client = CalqClient::builder()
			.write_key(WRITE_KEY)
			.transport(FailingTransport)
			.build()
			.unwrap();

		let result = client.transfer_user("a", "b").await;
		assert!(matches!(result, Err(CalqError::Transport(_))));
	}
}
