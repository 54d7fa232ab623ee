// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use widerow_type::{Error, Result};

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
	/// Keyspace whose table schema is loaded on connect.
	pub keyspace: String,
	/// Row count of a filtered list called with a zero limit.
	pub default_limit: usize,
	/// Upper bound on the row count of a filtered list.
	pub max_limit: usize,
}

impl Default for MapperConfig {
	fn default() -> Self {
		Self {
			keyspace: String::new(),
			default_limit: DEFAULT_LIMIT,
			max_limit: MAX_LIMIT,
		}
	}
}

impl MapperConfig {
	pub fn new(keyspace: impl Into<String>) -> Self {
		Self {
			keyspace: keyspace.into(),
			..Self::default()
		}
	}

	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self =
			serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid mapper config: {e}")))?;
		config.validate()?;
		Ok(config)
	}

	pub fn with_keyspace(mut self, keyspace: impl Into<String>) -> Self {
		self.keyspace = keyspace.into();
		self
	}

	pub fn with_default_limit(mut self, limit: usize) -> Self {
		self.default_limit = limit;
		self
	}

	pub fn with_max_limit(mut self, limit: usize) -> Self {
		self.max_limit = limit;
		self
	}

	pub fn validate(&self) -> Result<()> {
		if self.default_limit == 0 {
			return Err(Error::Config("default_limit must be positive".to_string()));
		}
		if self.max_limit < self.default_limit {
			return Err(Error::Config(format!(
				"max_limit {} is below default_limit {}",
				self.max_limit, self.default_limit
			)));
		}
		Ok(())
	}

	/// Normalizes a caller-supplied list limit: zero selects the default,
	/// a negative limit counts by its magnitude, and anything above the
	/// maximum is capped.
	pub fn clamp_limit(&self, limit: i64) -> usize {
		let requested = match limit {
			0 => self.default_limit,
			n => usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX),
		};
		requested.min(self.max_limit)
	}
}
