// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Calq API endpoints.

/// Base URL of the public Calq API.
pub const DEFAULT_API_ENDPOINT: &str = "http://api.calq.io";

/// A write endpoint of the Calq API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Records an action performed by an actor.
	Track,
	/// Updates an actor's profile.
	Profile,
	/// Moves everything recorded for one actor onto another.
	Transfer,
}

impl Endpoint {
	pub fn path(&self) -> &'static str {
		match self {
			Endpoint::Track => "/track",
			Endpoint::Profile => "/profile",
			Endpoint::Transfer => "/transfer",
		}
	}

	/// Joins this endpoint onto a base URL, tolerating a trailing slash.
	pub fn url(&self, base_url: &str) -> String {
		format!("{}{}", base_url.trim_end_matches('/'), self.path())
	}
}

impl std::fmt::Display for Endpoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.path())
	}
}
