// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use tracing::trace;
use widerow_core::{Field, RecordDescriptor, escape_identifier};
use widerow_type::{Result, Value};

/// A declared field resolved against a table, paired with the identifier it
/// is emitted as.
pub struct ColumnBinding<'a, R> {
	identifier: String,
	field: &'a Field<R>,
}

impl<'a, R> ColumnBinding<'a, R> {
	fn new(field: &'a Field<R>) -> Self {
		Self {
			identifier: escape_identifier(field.name()).into_owned(),
			field,
		}
	}

	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	pub fn field(&self) -> &'a Field<R> {
		self.field
	}

	/// The value bound for this column when writing `record`.
	pub fn value(&self, record: &R) -> Result<Value> {
		self.field.value(record)
	}
}

/// Fields of `record` that participate in a write: not skip-marked, not
/// holding their default, and present in `columns` when the table's columns
/// are known.
pub fn resolve_for_write<'a, R>(
	columns: Option<&HashSet<String>>,
	descriptor: &'a RecordDescriptor<R>,
	record: &R,
) -> Vec<ColumnBinding<'a, R>> {
	descriptor
		.fields()
		.iter()
		.filter(|field| is_known(columns, field))
		.filter(|field| {
			let default = field.is_default(record);
			if default {
				trace!(field = field.name(), "omitting default-valued field");
			}
			!default
		})
		.map(ColumnBinding::new)
		.collect()
}

/// Fields that participate in a read, in declaration order.
pub fn resolve_for_read<'a, R>(
	columns: Option<&HashSet<String>>,
	descriptor: &'a RecordDescriptor<R>,
) -> Vec<ColumnBinding<'a, R>> {
	descriptor.fields().iter().filter(|field| is_known(columns, field)).map(ColumnBinding::new).collect()
}

fn is_known<R>(columns: Option<&HashSet<String>>, field: &Field<R>) -> bool {
	if field.is_skipped() {
		return false;
	}
	let Some(columns) = columns else {
		return true;
	};
	let name = field.name();
	let known = columns.contains(name) || columns.contains(&format!("\"{name}\""));
	if !known {
		trace!(field = name, "field has no column in table schema");
	}
	known
}

/// Comma-joined identifiers of `bindings`.
pub(crate) fn column_list<R>(bindings: &[ColumnBinding<'_, R>]) -> String {
	bindings.iter().map(ColumnBinding::identifier).collect::<Vec<_>>().join(",")
}
