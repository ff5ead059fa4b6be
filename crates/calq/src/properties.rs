// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helper for building action and profile properties.

use calq_core::{PropertyMap, SPECIAL_PROPERTY_PREFIX};
use serde_json::Value;

/// A builder for action or profile properties.
///
/// # Example
///
/// ```
/// use calq::Properties;
///
/// let props = Properties::new()
///     .special("country", "NL")
///     .special("age", 29)
///     .insert("custom_property", true);
///
/// assert_eq!(props.get("$country"), Some(&serde_json::json!("NL")));
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
	inner: PropertyMap,
}

impl Properties {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a property under `key` as given.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Inserts a special property, adding the `$` prefix to `suffix`.
	pub fn special<V>(self, suffix: &str, value: V) -> Self
	where
		V: Into<Value>,
	{
		self.insert(format!("{SPECIAL_PROPERTY_PREFIX}{suffix}"), value)
	}

	/// Merges another set of properties into this one; `other` wins on
	/// conflicting keys.
	pub fn merge(mut self, other: Properties) -> Self {
		self.inner.extend(other.inner);
		self
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	pub fn as_map(&self) -> &PropertyMap {
		&self.inner
	}

	pub fn into_map(self) -> PropertyMap {
		self.inner
	}
}

impl From<PropertyMap> for Properties {
	fn from(map: PropertyMap) -> Self {
		Self { inner: map }
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		Value::Object(props.inner)
	}
}

/// Non-object values yield empty properties.
impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn test_special_prefixes_key() {
		let props = Properties::new().special("gender", "female");
		assert_eq!(props.get("$gender"), Some(&json!("female")));
		assert!(props.get("gender").is_none());
	}

	#[test]
	fn test_insert_keeps_key_verbatim() {
		let props = Properties::new().insert("$age", 29).insert("plan", "pro");
		assert_eq!(props.get("$age"), Some(&json!(29)));
		assert_eq!(props.get("plan"), Some(&json!("pro")));
	}

	#[test]
	fn test_merge_prefers_other() {
		let merged = Properties::new()
			.insert("a", 1)
			.insert("b", 2)
			.merge(Properties::new().insert("b", 20).insert("c", 3));

		assert_eq!(merged.len(), 3);
		assert_eq!(merged.get("b"), Some(&json!(20)));
	}

	#[test]
	fn test_from_value() {
		let props = Properties::from(json!({"$country": "NL", "custom_property": true}));
		assert_eq!(props.len(), 2);
		assert!(Properties::from(json!("not an object")).is_empty());
	}

	#[test]
	fn test_into_value() {
		let value: Value = Properties::new().special("city", "Berlin").into();
		assert_eq!(value, json!({"$city": "Berlin"}));
	}

	proptest! {
		#[test]
		fn special_always_yields_prefixed_key(suffix in "[a-z_]{1,20}") {
			let props = Properties::new().special(&suffix, 1);
			let key = format!("${suffix}");
			prop_assert!(props.get(&key).is_some());
			prop_assert!(props.as_map().keys().all(|k| k.starts_with('$')));
		}
	}
}
