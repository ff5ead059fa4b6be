// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property schemas for the action and profile domains.
//!
//! A [`Schema`] knows which special properties the Calq API recognizes for
//! its domain and carries an ordered list of [`Rule`]s. Validation first
//! scans for unrecognized special properties, then runs the rules in
//! declaration order, and stops at the first failure.
//!
//! The two schemas the API defines are built once and shared:
//!
//! ```
//! use calq_core::{action_schema, SchemaKind};
//!
//! let mut props = serde_json::Map::new();
//! props.insert("$age".to_string(), serde_json::json!(29));
//! props.insert("plan".to_string(), serde_json::json!("pro"));
//!
//! assert!(action_schema().validate(&props).is_ok());
//! assert_eq!(action_schema().kind(), SchemaKind::Action);
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::rule::{Rule, SPECIAL_PROPERTY_PREFIX};
use crate::{PropertyMap, API_VERSION};

/// The domain a schema validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
	/// Properties attached to a tracked action.
	Action,
	/// Properties written to an actor's profile.
	Profile,
}

impl SchemaKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			SchemaKind::Action => "action",
			SchemaKind::Profile => "profile",
		}
	}

	/// Returns the shared schema for this domain.
	pub fn schema(&self) -> &'static Schema {
		match self {
			SchemaKind::Action => action_schema(),
			SchemaKind::Profile => profile_schema(),
		}
	}
}

impl std::fmt::Display for SchemaKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Recognized special properties and rules for one domain.
#[derive(Debug, Clone)]
pub struct Schema {
	kind: SchemaKind,
	special_properties: HashSet<String>,
	rules: Vec<Rule>,
}

impl Schema {
	pub fn builder(kind: SchemaKind) -> SchemaBuilder {
		SchemaBuilder::new(kind)
	}

	pub fn kind(&self) -> SchemaKind {
		self.kind
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Returns true if `suffix` (a special property name without `$`) is
	/// recognized by this schema.
	pub fn recognizes(&self, suffix: &str) -> bool {
		self.special_properties.contains(suffix)
	}

	/// Validates a property map, returning the first failure found.
	pub fn validate(&self, props: &PropertyMap) -> Result<()> {
		self.check_special_properties(props)?;
		for rule in &self.rules {
			rule.check(props)?;
		}
		Ok(())
	}

	/// Fails on the first `$`-prefixed key whose suffix is not recognized.
	/// Custom properties are never inspected.
	pub fn check_special_properties(&self, props: &PropertyMap) -> Result<()> {
		for key in props.keys() {
			let Some(suffix) = key.strip_prefix(SPECIAL_PROPERTY_PREFIX) else {
				continue;
			};
			if !self.recognizes(suffix) {
				return Err(ValidationError::UnrecognizedSpecialProperty {
					property: key.clone(),
					api_version: API_VERSION,
				});
			}
		}
		Ok(())
	}
}

/// Builder for [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
	kind: SchemaKind,
	special_properties: HashSet<String>,
	rules: Vec<Rule>,
}

impl SchemaBuilder {
	pub fn new(kind: SchemaKind) -> Self {
		Self {
			kind,
			special_properties: HashSet::new(),
			rules: Vec::new(),
		}
	}

	/// Marks `$suffix` as a recognized special property.
	pub fn recognize(mut self, suffix: impl Into<String>) -> Self {
		self.special_properties.insert(suffix.into());
		self
	}

	pub fn recognize_all<I, S>(self, suffixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		suffixes.into_iter().fold(self, |b, s| b.recognize(s))
	}

	/// Appends a rule. A rule on a special property also marks it recognized.
	pub fn rule(mut self, rule: Rule) -> Self {
		if let Some(suffix) = rule.name().strip_prefix(SPECIAL_PROPERTY_PREFIX) {
			self.special_properties.insert(suffix.to_string());
		}
		self.rules.push(rule);
		self
	}

	pub fn build(self) -> Schema {
		Schema {
			kind: self.kind,
			special_properties: self.special_properties,
			rules: self.rules,
		}
	}
}

/// Special properties the API recognizes on actions.
pub const ACTION_SPECIAL_PROPERTIES: &[&str] = &[
	"sale_value",
	"sale_currency",
	"device_agent",
	"device_os",
	"device_resolution",
	"device_mobile",
	"country",
	"region",
	"city",
	"gender",
	"age",
	"utm_campaign",
	"utm_source",
	"utm_medium",
	"utm_content",
	"utm_term",
];

/// Special properties the API recognizes on profiles.
pub const PROFILE_SPECIAL_PROPERTIES: &[&str] = &[
	"actor",
	"full_name",
	"image_url",
	"country",
	"region",
	"city",
	"gender",
	"age",
	"email",
	"phone",
	"sms",
];

const GENDER_OPTIONS: [&str; 2] = ["male", "female"];

static ACTION_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
	Schema::builder(SchemaKind::Action)
		.recognize_all(ACTION_SPECIAL_PROPERTIES.iter().copied())
		.rule(
			Rule::special("sale_currency")
				.requires_special("sale_value")
				.max_length(3),
		)
		.rule(Rule::special("gender").options(GENDER_OPTIONS))
		.rule(Rule::special("age").integer_only())
		.build()
});

static PROFILE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
	Schema::builder(SchemaKind::Profile)
		.recognize_all(PROFILE_SPECIAL_PROPERTIES.iter().copied())
		.rule(Rule::special("gender").options(GENDER_OPTIONS))
		.rule(Rule::special("age").integer_only())
		.build()
});

/// The schema for tracked action properties.
pub fn action_schema() -> &'static Schema {
	&ACTION_SCHEMA
}

/// The schema for profile properties.
pub fn profile_schema() -> &'static Schema {
	&PROFILE_SCHEMA
}
