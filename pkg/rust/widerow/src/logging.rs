// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt};
use widerow_type::{Error, Result};

pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	/// Human-readable single-line events.
	#[default]
	Compact,
	/// One JSON object per event.
	Json,
}

/// Builds the `tracing` subscriber for an application using the mapper.
///
/// Without an explicit filter the `RUST_LOG` environment variable is used,
/// falling back to [`DEFAULT_FILTER`]. Mapper spans are named `mapper::*`
/// and catalog spans `catalog::*`; statements are logged at `debug`.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	filter: Option<String>,
	format: LogFormat,
	with_target: bool,
	with_ansi: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			filter: None,
			format: LogFormat::Compact,
			with_target: true,
			with_ansi: true,
		}
	}

	/// Filter directives in `EnvFilter` syntax, e.g. `"warn,widerow_mapper=debug"`.
	pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
		self.filter = Some(directives.into());
		self
	}

	pub fn with_format(mut self, format: LogFormat) -> Self {
		self.format = format;
		self
	}

	pub fn with_target(mut self, enabled: bool) -> Self {
		self.with_target = enabled;
		self
	}

	pub fn with_ansi(mut self, enabled: bool) -> Self {
		self.with_ansi = enabled;
		self
	}

	fn env_filter(&self) -> Result<EnvFilter> {
		match &self.filter {
			Some(directives) => EnvFilter::try_new(directives)
				.map_err(|e| Error::Config(format!("invalid log filter '{directives}': {e}"))),
			None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
		}
	}

	/// Builds the subscriber without installing it.
	pub fn build(self) -> Result<Box<dyn Subscriber + Send + Sync>> {
		let filter = self.env_filter()?;
		let builder = fmt().with_env_filter(filter).with_target(self.with_target).with_ansi(self.with_ansi);
		Ok(match self.format {
			LogFormat::Compact => Box::new(builder.compact().finish()),
			LogFormat::Json => Box::new(builder.json().finish()),
		})
	}

	/// Installs the subscriber as the global default. Fails if one is
	/// already installed.
	pub fn init(self) -> Result<()> {
		let subscriber = self.build()?;
		tracing::subscriber::set_global_default(subscriber)
			.map_err(|e| Error::Config(format!("failed to install tracing subscriber: {e}")))
	}
}
