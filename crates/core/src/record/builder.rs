// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use prost::Message;
use widerow_type::ScalarType;

use super::{
	Field, FieldKind, Record, RecordDescriptor,
	accessor::{RepeatedAccessor, ScalarAccessor, StructuredAccessor},
};

/// Registers the fields of a [`Record`] type in declaration order.
pub struct RecordDescriptorBuilder<R> {
	table: &'static str,
	fields: Vec<Field<R>>,
}

impl<R: Record> RecordDescriptorBuilder<R> {
	pub(crate) fn new(table: &'static str) -> Self {
		Self {
			table,
			fields: Vec::new(),
		}
	}

	pub fn scalar<T: ScalarType>(mut self, name: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self {
		self.fields.push(Field {
			name,
			kind: FieldKind::Scalar,
			accessor: Box::new(ScalarAccessor {
				get,
				get_mut,
			}),
		});
		self
	}

	pub fn structured<M: Message + Default + 'static>(
		mut self,
		name: &'static str,
		get: fn(&R) -> &Option<M>,
		get_mut: fn(&mut R) -> &mut Option<M>,
	) -> Self {
		self.fields.push(Field {
			name,
			kind: FieldKind::Structured,
			accessor: Box::new(StructuredAccessor {
				get,
				get_mut,
			}),
		});
		self
	}

	pub fn repeated<M: Message + Default + 'static>(
		mut self,
		name: &'static str,
		get: fn(&R) -> &Vec<M>,
		get_mut: fn(&mut R) -> &mut Vec<M>,
	) -> Self {
		self.fields.push(Field {
			name,
			kind: FieldKind::RepeatedStructured,
			accessor: Box::new(RepeatedAccessor {
				get,
				get_mut,
			}),
		});
		self
	}

	/// # Panics
	/// Panics if two non-skipped fields share a storage name; that is a
	/// registration bug in the record type.
	pub fn build(self) -> RecordDescriptor<R> {
		for (i, field) in self.fields.iter().enumerate() {
			if field.is_skipped() {
				continue;
			}
			assert!(
				!self.fields[..i].iter().any(|other| other.name == field.name),
				"record for table '{}' declares storage name '{}' twice",
				self.table,
				field.name
			);
		}

		RecordDescriptor {
			table: self.table,
			fields: self.fields,
		}
	}
}
