// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

mod get;

pub use get::GetType;

/// The kind of a [`Value`](crate::Value), without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Undefined,
	Boolean,
	Int4,
	Int8,
	Float4,
	Float8,
	Utf8,
	Blob,
	Uuid,
	List,
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Undefined => f.write_str("UNDEFINED"),
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Float4 => f.write_str("FLOAT4"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Blob => f.write_str("BLOB"),
			Type::Uuid => f.write_str("UUID"),
			Type::List => f.write_str("LIST"),
		}
	}
}
