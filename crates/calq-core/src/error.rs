// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for property validation.

use thiserror::Error;

/// The first problem found while checking a property map against a schema.
///
/// Every variant except [`ValidationError::LengthNotApplicable`] describes a
/// property the Calq API would accept but likely ignore or misinterpret.
/// `LengthNotApplicable` means a rule was applied to a value it cannot judge,
/// which is a defect in the schema or the caller's data shape rather than a
/// soft warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("{property} is not a valid special property recognized by Calq as of API version {api_version}. It will likely be ignored.")]
	UnrecognizedSpecialProperty {
		property: String,
		api_version: &'static str,
	},

	#[error("{property} cannot be used without including {requires} as well.")]
	MissingRequiredProperty { property: String, requires: String },

	#[error("{property} exceeds the maximum length of {max_length}.")]
	MaxLengthExceeded { property: String, max_length: usize },

	#[error("value >>{value}<< for {property} is not among the valid options: {options}")]
	InvalidOption {
		property: String,
		value: String,
		options: String,
	},

	#[error("{property} has to be an Integer.")]
	NotAnInteger { property: String },

	#[error("{property} holds a {kind} value, which has no length to compare against {max_length}")]
	LengthNotApplicable {
		property: String,
		kind: &'static str,
		max_length: usize,
	},
}

impl ValidationError {
	/// Returns the property the failure refers to.
	pub fn property(&self) -> &str {
		match self {
			ValidationError::UnrecognizedSpecialProperty { property, .. }
			| ValidationError::MissingRequiredProperty { property, .. }
			| ValidationError::MaxLengthExceeded { property, .. }
			| ValidationError::InvalidOption { property, .. }
			| ValidationError::NotAnInteger { property }
			| ValidationError::LengthNotApplicable { property, .. } => property,
		}
	}

	/// Returns `true` when the failure comes from a rule that cannot be
	/// evaluated against the supplied value, as opposed to a property the
	/// service would merely ignore.
	pub fn is_schema_defect(&self) -> bool {
		matches!(self, ValidationError::LengthNotApplicable { .. })
	}
}

/// Result type alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_requires_message_names_both_properties() {
		let err = ValidationError::MissingRequiredProperty {
			property: "$sale_currency".to_string(),
			requires: "$sale_value".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"$sale_currency cannot be used without including $sale_value as well."
		);
	}

	#[test]
	fn test_unrecognized_message_mentions_api_version() {
		let err = ValidationError::UnrecognizedSpecialProperty {
			property: "$nope".to_string(),
			api_version: "1.0",
		};
		let message = err.to_string();
		assert!(message.starts_with("$nope is not a valid special property"));
		assert!(message.contains("API version 1.0"));
	}

	#[test]
	fn test_only_length_mismatch_is_schema_defect() {
		let defect = ValidationError::LengthNotApplicable {
			property: "$sale_currency".to_string(),
			kind: "number",
			max_length: 3,
		};
		assert!(defect.is_schema_defect());

		let soft = ValidationError::NotAnInteger {
			property: "$age".to_string(),
		};
		assert!(!soft.is_schema_defect());
	}

	#[test]
	fn test_property_accessor() {
		let err = ValidationError::MaxLengthExceeded {
			property: "$sale_currency".to_string(),
			max_length: 3,
		};
		assert_eq!(err.property(), "$sale_currency");
	}
}
