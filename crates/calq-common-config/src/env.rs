// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading secrets from the environment with `VAR_FILE` support.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::secret::SecretString;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Loads `var` from the environment.
///
/// `{var}_FILE`, when set, names a file holding the secret and wins over
/// `{var}`; one trailing newline is stripped from the file content. Returns
/// `Ok(None)` when neither is set.
///
/// ```no_run
/// use calq_common_config::load_secret_env;
///
/// if let Some(key) = load_secret_env("CALQ_WRITE_KEY")? {
///     println!("write key configured: {key}"); // prints "[REDACTED]"
/// }
/// # Ok::<(), calq_common_config::SecretEnvError>(())
/// ```
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path) = env::var(&file_var) {
		if path.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(path);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let secret = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(secret)));
	}

	Ok(env::var(var).ok().map(SecretString::new))
}
