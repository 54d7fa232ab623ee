// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	error,
	fmt::{self, Debug, Display, Formatter},
};

use crate::value::Type;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to load column metadata for keyspace '{keyspace}': {source}")]
	Metadata {
		keyspace: String,
		#[source]
		source: StoreError,
	},

	#[error("no row found in table '{table}'")]
	NotFound {
		table: String,
	},

	#[error("failed to encode structured column '{column}': {source}")]
	Encoding {
		column: String,
		#[source]
		source: prost::EncodeError,
	},

	#[error("failed to decode structured column '{column}': {source}")]
	Decoding {
		column: String,
		#[source]
		source: prost::DecodeError,
	},

	#[error("column '{column}' expects {expected} but the store returned {actual}")]
	TypeMismatch {
		column: String,
		expected: Type,
		actual: Type,
	},

	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error(transparent)]
	Store(#[from] StoreError),
}

impl Error {
	/// Stable diagnostic code for this error kind.
	pub fn code(&self) -> &'static str {
		match self {
			Error::Metadata {
				..
			} => "MAPPER_001",
			Error::NotFound {
				..
			} => "MAPPER_002",
			Error::Encoding {
				..
			} => "MAPPER_003",
			Error::Decoding {
				..
			} => "MAPPER_004",
			Error::TypeMismatch {
				..
			} => "MAPPER_005",
			Error::InvalidArgument(_) => "MAPPER_006",
			Error::Config(_) => "MAPPER_007",
			Error::Store(_) => "MAPPER_008",
		}
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Error::NotFound { .. })
	}

	pub fn invalid_argument(message: impl Into<String>) -> Self {
		Error::InvalidArgument(message.into())
	}
}

/// An error raised by the store-session collaborator.
///
/// The mapper never interprets these; they are carried through to the caller
/// as they were produced.
pub struct StoreError(Box<dyn error::Error + Send + Sync>);

impl StoreError {
	pub fn new(source: impl Into<Box<dyn error::Error + Send + Sync>>) -> Self {
		Self(source.into())
	}

	pub fn message(message: impl Into<String>) -> Self {
		Self(message.into().into())
	}

	pub fn inner(&self) -> &(dyn error::Error + Send + Sync + 'static) {
		self.0.as_ref()
	}

	pub fn into_inner(self) -> Box<dyn error::Error + Send + Sync> {
		self.0
	}
}

impl Debug for StoreError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Debug::fmt(&self.0, f)
	}
}

impl Display for StoreError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl error::Error for StoreError {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		self.0.source()
	}
}
