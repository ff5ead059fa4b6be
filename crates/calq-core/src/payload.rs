// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request bodies for the tracking, profile and transfer endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_timestamp;
use crate::PropertyMap;

/// Body of a tracked action.
///
/// `ip_address` and `timestamp` are left out of the JSON entirely when unset,
/// in which case the API uses the request's origin and arrival time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPayload {
	pub actor: String,
	pub action_name: String,
	pub write_key: String,
	#[serde(default)]
	pub properties: PropertyMap,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ip_address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<String>,
}

impl ActionPayload {
	pub fn new(
		actor: impl Into<String>,
		action_name: impl Into<String>,
		write_key: impl Into<String>,
		properties: PropertyMap,
	) -> Self {
		Self {
			actor: actor.into(),
			action_name: action_name.into(),
			write_key: write_key.into(),
			properties,
			ip_address: None,
			timestamp: None,
		}
	}

	pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
		self.ip_address = Some(ip_address.into());
		self
	}

	/// Sets when the action happened, formatted for the API.
	pub fn with_timestamp(mut self, timestamp: &NaiveDateTime) -> Self {
		self.timestamp = Some(format_timestamp(timestamp));
		self
	}
}

/// Body of a profile update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePayload {
	pub actor: String,
	pub write_key: String,
	#[serde(default)]
	pub properties: PropertyMap,
}

impl ProfilePayload {
	pub fn new(actor: impl Into<String>, write_key: impl Into<String>, properties: PropertyMap) -> Self {
		Self {
			actor: actor.into(),
			write_key: write_key.into(),
			properties,
		}
	}
}

/// Body of an identity transfer from `old_actor` to `new_actor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
	pub old_actor: String,
	pub new_actor: String,
	pub write_key: String,
}

impl TransferPayload {
	pub fn new(
		old_actor: impl Into<String>,
		new_actor: impl Into<String>,
		write_key: impl Into<String>,
	) -> Self {
		Self {
			old_actor: old_actor.into(),
			new_actor: new_actor.into(),
			write_key: write_key.into(),
		}
	}
}
