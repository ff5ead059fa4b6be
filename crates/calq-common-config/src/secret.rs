// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wrapper that keeps credentials such as write keys out of logs.
//!
//! ```
//! use calq_common_config::Secret;
//!
//! let write_key = Secret::new("allworkandnoplaymakesjackadullboy".to_string());
//!
//! assert_eq!(format!("{write_key}"), "[REDACTED]");
//! assert_eq!(format!("{write_key:?}"), "Secret(\"[REDACTED]\")");
//! assert_eq!(write_key.expose(), "allworkandnoplaymakesjackadullboy");
//! ```

use std::fmt;

use zeroize::Zeroize;

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A sensitive value with redacted `Debug`, `Display` and `Serialize`.
///
/// The inner value is zeroed on drop. There is no `Deref`; reading the value
/// takes an explicit [`Secret::expose`] so call sites are easy to audit.
/// `tracing` fields formatted with `%` or `?` go through the redacted impls.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Serialize + Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}
