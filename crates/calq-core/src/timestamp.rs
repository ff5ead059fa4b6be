// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::NaiveDateTime;

/// Timestamp layout the API expects: `YYYY-MM-DD HH:MM:SS.ffffff`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Formats a point in time for the `timestamp` field of an action.
///
/// The API has no notion of time zones; pass UTC (`DateTime::naive_utc`).
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
	timestamp.format(TIMESTAMP_FORMAT).to_string()
}
