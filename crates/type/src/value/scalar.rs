// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use uuid::Uuid;

use crate::{Blob, GetType, Value};

/// A Rust field type that maps onto a single store-native column.
///
/// `is_default` is the partial-write test: a default-valued field is left out
/// of an upsert so the stored column keeps its previous value.
pub trait ScalarType: GetType + Sized + Send + Sync + 'static {
	fn to_value(&self) -> Value;

	/// Returns `None` when `value` does not have a compatible type.
	fn from_value(value: Value) -> Option<Self>;

	fn is_default(&self) -> bool;
}

impl ScalarType for bool {
	fn to_value(&self) -> Value {
		Value::Boolean(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Boolean(v) => Some(v),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		!*self
	}
}

impl ScalarType for i32 {
	fn to_value(&self) -> Value {
		Value::Int4(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Int4(v) => Some(v),
			Value::Int8(v) => i32::try_from(v).ok(),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		*self == 0
	}
}

impl ScalarType for i64 {
	fn to_value(&self) -> Value {
		Value::Int8(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Int8(v) => Some(v),
			Value::Int4(v) => Some(v as i64),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		*self == 0
	}
}

impl ScalarType for f32 {
	fn to_value(&self) -> Value {
		Value::Float4(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Float4(v) => Some(v),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		*self == 0.0
	}
}

impl ScalarType for f64 {
	fn to_value(&self) -> Value {
		Value::Float8(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Float8(v) => Some(v),
			Value::Float4(v) => Some(v as f64),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		*self == 0.0
	}
}

impl ScalarType for String {
	fn to_value(&self) -> Value {
		Value::Utf8(self.clone())
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Utf8(v) => Some(v),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		self.is_empty()
	}
}

impl ScalarType for Blob {
	fn to_value(&self) -> Value {
		Value::Blob(self.clone())
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Blob(v) => Some(v),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		self.is_empty()
	}
}

impl ScalarType for Uuid {
	fn to_value(&self) -> Value {
		Value::Uuid(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Uuid(v) => Some(v),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		self.is_nil()
	}
}

impl<T: ScalarType> ScalarType for Vec<T> {
	fn to_value(&self) -> Value {
		Value::List(self.iter().map(ScalarType::to_value).collect())
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::List(items) => items.into_iter().map(T::from_value).collect(),
			_ => None,
		}
	}

	fn is_default(&self) -> bool {
		self.is_empty()
	}
}

/// An optional column. `Some` of a zero value is not default and is written.
impl<T: ScalarType> ScalarType for Option<T> {
	fn to_value(&self) -> Value {
		match self {
			Some(v) => v.to_value(),
			None => Value::Undefined,
		}
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Undefined => Some(None),
			value => T::from_value(value).map(Some),
		}
	}

	fn is_default(&self) -> bool {
		self.is_none()
	}
}
