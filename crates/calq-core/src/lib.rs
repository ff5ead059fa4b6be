// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Calq analytics client.
//!
//! This crate holds everything about a Calq request that does not involve
//! I/O: the special-property schemas and their validator, the JSON payloads
//! for each endpoint, and timestamp formatting. It is used by the client SDK
//! (`calq`).
//!
//! # Overview
//!
//! Calq treats properties whose names start with `$` as "special": it
//! recognizes a fixed set of them per domain and interprets their values
//! (currency, age, gender, ...). Everything else is a custom property and
//! stored as-is. Validation catches special properties the API would ignore
//! or misread:
//!
//! ```
//! use calq_core::{action_schema, ValidationError};
//! use serde_json::json;
//!
//! let mut props = serde_json::Map::new();
//! props.insert("$sale_currency".to_string(), json!("usd"));
//!
//! let err = action_schema().validate(&props).unwrap_err();
//! assert!(matches!(err, ValidationError::MissingRequiredProperty { .. }));
//! assert_eq!(
//!     err.to_string(),
//!     "$sale_currency cannot be used without including $sale_value as well."
//! );
//! ```

pub mod endpoint;
pub mod error;
pub mod payload;
pub mod rule;
pub mod schema;
pub mod timestamp;

pub use endpoint::{Endpoint, DEFAULT_API_ENDPOINT};
pub use error::{Result, ValidationError};
pub use payload::{ActionPayload, ProfilePayload, TransferPayload};
pub use rule::{value_kind, value_length, Rule, SPECIAL_PROPERTY_PREFIX};
pub use schema::{
	action_schema, profile_schema, Schema, SchemaBuilder, SchemaKind, ACTION_SPECIAL_PROPERTIES,
	PROFILE_SPECIAL_PROPERTIES,
};
pub use timestamp::{format_timestamp, TIMESTAMP_FORMAT};

/// Calq API version the schemas describe.
pub const API_VERSION: &str = "1.0";

/// Version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Property names mapped to their values, as sent in a payload.
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;
