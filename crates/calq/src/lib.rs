// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust client for the Calq analytics API.
//!
//! Tracks actions, updates actor profiles and transfers actors. Special
//! properties (names starting with `$`) are checked against the schemas in
//! [`calq_core`] before anything is sent.
//!
//! # Example
//!
//! ```ignore
//! use calq::{CalqClient, Properties, TracingReporter, TrackAction};
//!
//! let client = CalqClient::builder()
//!     .write_key("allworkandnoplaymakesjackadullboy")
//!     .validation_reporter(TracingReporter)
//!     .build()?;
//!
//! client.track_action(
//!     TrackAction::new("test_actor", "Buys Thing")
//!         .properties(
//!             Properties::new()
//!                 .special("sale_value", 10)
//!                 .special("sale_currency", "EUR"),
//!         ),
//! ).await?;
//!
//! client
//!     .submit_profile("test_actor", Properties::new().special("age", 42))
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod properties;
pub mod report;
pub mod request;
pub mod transport;

pub use client::{CalqClient, CalqClientBuilder, TrackAction};
pub use config::{ClientConfig, API_ENDPOINT_ENV, WRITE_KEY_ENV};
pub use error::{CalqError, Result};
pub use properties::Properties;
pub use report::{NoopReporter, TracingReporter, ValidationReporter};
pub use request::build_request;
pub use transport::{ReqwestTransport, Transport};

pub use calq_common_config::SecretString;
pub use calq_common_http::RetryConfig;
pub use calq_core::{
	Endpoint, PropertyMap, SchemaKind, ValidationError, API_VERSION, DEFAULT_API_ENDPOINT,
};
