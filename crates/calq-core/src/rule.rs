// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-property rules.
//!
//! A [`Rule`] governs exactly one property name. It can demand that another
//! property is present alongside it, cap the value's length, restrict the
//! value to a fixed list of options, or require an integer. Checks only
//! apply when the governed property is present in the map.

use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::PropertyMap;

/// Prefix marking a property as one the Calq API interprets itself.
pub const SPECIAL_PROPERTY_PREFIX: char = '$';

/// A check definition bound to a single property name.
///
/// # Example
///
/// ```
/// use calq_core::Rule;
///
/// let currency = Rule::special("sale_currency")
///     .requires_special("sale_value")
///     .max_length(3);
///
/// assert_eq!(currency.name(), "$sale_currency");
/// assert_eq!(currency.required_property(), Some("$sale_value"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
	name: String,
	requires: Option<String>,
	max_length: Option<usize>,
	options: Option<Vec<Value>>,
	integer_only: bool,
}

impl Rule {
	/// Creates an unconstrained rule for the given property name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			requires: None,
			max_length: None,
			options: None,
			integer_only: false,
		}
	}

	/// Creates a rule for a special property, adding the `$` prefix.
	pub fn special(suffix: &str) -> Self {
		Self::new(format!("{SPECIAL_PROPERTY_PREFIX}{suffix}"))
	}

	/// Requires `name` to be present whenever this rule's property is.
	pub fn requires(mut self, name: impl Into<String>) -> Self {
		self.requires = Some(name.into());
		self
	}

	/// Requires the special property `$suffix` to be present whenever this
	/// rule's property is.
	pub fn requires_special(self, suffix: &str) -> Self {
		self.requires(format!("{SPECIAL_PROPERTY_PREFIX}{suffix}"))
	}

	/// Caps the length of the value.
	pub fn max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	/// Restricts the value to the given options, kept in declaration order.
	pub fn options<I, V>(mut self, options: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		self.options = Some(options.into_iter().map(Into::into).collect());
		self
	}

	/// Requires the value to be an integer.
	pub fn integer_only(mut self) -> Self {
		self.integer_only = true;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn required_property(&self) -> Option<&str> {
		self.requires.as_deref()
	}

	pub fn max_len(&self) -> Option<usize> {
		self.max_length
	}

	pub fn allowed_options(&self) -> Option<&[Value]> {
		self.options.as_deref()
	}

	pub fn is_integer_only(&self) -> bool {
		self.integer_only
	}

	/// Runs every check in order and returns the first failure.
	pub fn check(&self, props: &PropertyMap) -> Result<()> {
		self.check_requires(props)?;
		self.check_max_length(props)?;
		self.check_options(props)?;
		self.check_integer(props)
	}

	pub fn check_requires(&self, props: &PropertyMap) -> Result<()> {
		let Some(requires) = &self.requires else {
			return Ok(());
		};
		if !props.contains_key(&self.name) || props.contains_key(requires) {
			return Ok(());
		}
		Err(ValidationError::MissingRequiredProperty {
			property: self.name.clone(),
			requires: requires.clone(),
		})
	}

	/// Fails with [`ValidationError::LengthNotApplicable`] when the value is a
	/// boolean, number or null.
	pub fn check_max_length(&self, props: &PropertyMap) -> Result<()> {
		let (Some(max_length), Some(value)) = (self.max_length, props.get(&self.name)) else {
			return Ok(());
		};
		let length = value_length(value).ok_or_else(|| ValidationError::LengthNotApplicable {
			property: self.name.clone(),
			kind: value_kind(value),
			max_length,
		})?;
		if length <= max_length {
			return Ok(());
		}
		Err(ValidationError::MaxLengthExceeded {
			property: self.name.clone(),
			max_length,
		})
	}

	pub fn check_options(&self, props: &PropertyMap) -> Result<()> {
		let (Some(options), Some(value)) = (&self.options, props.get(&self.name)) else {
			return Ok(());
		};
		if options.contains(value) {
			return Ok(());
		}
		Err(ValidationError::InvalidOption {
			property: self.name.clone(),
			value: display_value(value),
			options: options
				.iter()
				.map(display_value)
				.collect::<Vec<_>>()
				.join(", "),
		})
	}

	/// Only JSON integers pass; numeric strings, floats and booleans fail.
	pub fn check_integer(&self, props: &PropertyMap) -> Result<()> {
		if !self.integer_only {
			return Ok(());
		}
		match props.get(&self.name) {
			None => Ok(()),
			Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(()),
			Some(_) => Err(ValidationError::NotAnInteger {
				property: self.name.clone(),
			}),
		}
	}
}

/// Length of a value, counted in characters for strings and in elements for
/// arrays and objects. `None` for values without a length.
pub fn value_length(value: &Value) -> Option<usize> {
	match value {
		Value::String(s) => Some(s.chars().count()),
		Value::Array(items) => Some(items.len()),
		Value::Object(map) => Some(map.len()),
		Value::Null | Value::Bool(_) | Value::Number(_) => None,
	}
}

/// Name of the JSON type of a value.
pub fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

// Strings are shown bare, everything else as JSON.
fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
