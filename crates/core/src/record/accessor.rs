// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use prost::Message;
use widerow_type::{Blob, Error, Result, ScalarType, Type, Value};

use crate::codec;

/// Type-erased access to one field of `R`.
pub(crate) trait FieldAccessor<R>: Send + Sync {
	fn is_default(&self, record: &R) -> bool;

	fn value(&self, column: &str, record: &R) -> Result<Value>;

	fn assign(&self, column: &str, record: &mut R, value: Value) -> Result<()>;
}

pub(crate) struct ScalarAccessor<R, T> {
	pub(crate) get: fn(&R) -> &T,
	pub(crate) get_mut: fn(&mut R) -> &mut T,
}

impl<R: 'static, T: ScalarType> FieldAccessor<R> for ScalarAccessor<R, T> {
	fn is_default(&self, record: &R) -> bool {
		(self.get)(record).is_default()
	}

	fn value(&self, _column: &str, record: &R) -> Result<Value> {
		Ok((self.get)(record).to_value())
	}

	fn assign(&self, column: &str, record: &mut R, value: Value) -> Result<()> {
		let actual = value.get_type();
		let v = T::from_value(value).ok_or_else(|| Error::TypeMismatch {
			column: column.to_string(),
			expected: T::get_type(),
			actual,
		})?;
		*(self.get_mut)(record) = v;
		Ok(())
	}
}

pub(crate) struct StructuredAccessor<R, M> {
	pub(crate) get: fn(&R) -> &Option<M>,
	pub(crate) get_mut: fn(&mut R) -> &mut Option<M>,
}

impl<R: 'static, M: Message + Default + 'static> FieldAccessor<R> for StructuredAccessor<R, M> {
	fn is_default(&self, record: &R) -> bool {
		(self.get)(record).is_none()
	}

	fn value(&self, column: &str, record: &R) -> Result<Value> {
		match (self.get)(record) {
			Some(message) => Ok(Value::Blob(Blob::new(codec::encode(column, message)?))),
			None => Ok(Value::Undefined),
		}
	}

	fn assign(&self, column: &str, record: &mut R, value: Value) -> Result<()> {
		let bytes = expect_blob(column, value)?;
		*(self.get_mut)(record) = Some(codec::decode(column, &bytes)?);
		Ok(())
	}
}

pub(crate) struct RepeatedAccessor<R, M> {
	pub(crate) get: fn(&R) -> &Vec<M>,
	pub(crate) get_mut: fn(&mut R) -> &mut Vec<M>,
}

impl<R: 'static, M: Message + Default + 'static> FieldAccessor<R> for RepeatedAccessor<R, M> {
	fn is_default(&self, record: &R) -> bool {
		(self.get)(record).is_empty()
	}

	fn value(&self, column: &str, record: &R) -> Result<Value> {
		let payloads = codec::encode_all(column, (self.get)(record))?;
		Ok(Value::List(payloads.into_iter().map(|bytes| Value::Blob(Blob::new(bytes))).collect()))
	}

	fn assign(&self, column: &str, record: &mut R, value: Value) -> Result<()> {
		let items = match value {
			Value::List(items) => items,
			other => {
				return Err(Error::TypeMismatch {
					column: column.to_string(),
					expected: Type::List,
					actual: other.get_type(),
				});
			}
		};

		let payloads = items.into_iter().map(|item| expect_blob(column, item)).collect::<Result<Vec<_>>>()?;
		*(self.get_mut)(record) = codec::decode_all(column, &payloads)?;
		Ok(())
	}
}

fn expect_blob(column: &str, value: Value) -> Result<Blob> {
	match value {
		Value::Blob(bytes) => Ok(bytes),
		other => Err(Error::TypeMismatch {
			column: column.to_string(),
			expected: Type::Blob,
			actual: other.get_type(),
		}),
	}
}
