// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Per-type record descriptors.
//!
//! A [`Record`] type registers, once, the table it maps to and the ordered
//! list of its fields. Each field has a storage name and a value kind, and
//! carries typed accessors that read the field for a write and assign it from
//! a scanned column for a read. Declaration order is the column order of
//! every generated statement.
//!
//! ```ignore
//! impl Record for Account {
//! 	fn descriptor() -> &'static RecordDescriptor<Self> {
//! 		static DESCRIPTOR: Lazy<RecordDescriptor<Account>> = Lazy::new(|| {
//! 			RecordDescriptor::<Account>::builder("accounts")
//! 				.scalar("id", |r| &r.id, |r| &mut r.id)
//! 				.scalar("email", |r| &r.email, |r| &mut r.email)
//! 				.structured("profile", |r| &r.profile, |r| &mut r.profile)
//! 				.scalar(SKIP, |r| &r.cached, |r| &mut r.cached)
//! 				.build()
//! 		});
//! 		&DESCRIPTOR
//! 	}
//! }
//! ```

mod accessor;
mod builder;

use std::fmt::{Debug, Formatter};

pub use builder::RecordDescriptorBuilder;
use widerow_type::{Result, Value};

use self::accessor::FieldAccessor;

/// Storage name that excludes a field from every statement.
pub const SKIP: &str = "-";

/// An application type stored as one row of a table.
pub trait Record: Default + Send + Sync + 'static {
	fn descriptor() -> &'static RecordDescriptor<Self>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
	/// Passed to the store as-is.
	Scalar,
	/// A single nested message, stored as one encoded blob.
	Structured,
	/// A sequence of nested messages, stored as a list of encoded blobs.
	RepeatedStructured,
}

pub struct Field<R> {
	name: &'static str,
	kind: FieldKind,
	accessor: Box<dyn FieldAccessor<R>>,
}

impl<R> Field<R> {
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn is_skipped(&self) -> bool {
		self.name == SKIP
	}

	/// Whether the field holds the zero value of its kind.
	pub fn is_default(&self, record: &R) -> bool {
		self.accessor.is_default(record)
	}

	/// The value bound for this field in a write, with structured kinds
	/// already encoded.
	pub fn value(&self, record: &R) -> Result<Value> {
		self.accessor.value(self.name, record)
	}

	/// Assigns a scanned column to the field, decoding structured kinds.
	/// An undefined (null) column leaves the field untouched.
	pub fn assign(&self, record: &mut R, value: Value) -> Result<()> {
		if value.is_undefined() {
			return Ok(());
		}
		self.accessor.assign(self.name, record, value)
	}
}

impl<R> Debug for Field<R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field").field("name", &self.name).field("kind", &self.kind).finish()
	}
}

pub struct RecordDescriptor<R> {
	table: &'static str,
	fields: Vec<Field<R>>,
}

impl<R: Record> RecordDescriptor<R> {
	pub fn builder(table: &'static str) -> RecordDescriptorBuilder<R> {
		RecordDescriptorBuilder::new(table)
	}
}

impl<R> RecordDescriptor<R> {
	pub fn table(&self) -> &'static str {
		self.table
	}

	/// Fields in declaration order, skip-marked fields included.
	pub fn fields(&self) -> &[Field<R>] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&Field<R>> {
		self.fields.iter().find(|f| !f.is_skipped() && f.name == name)
	}
}

impl<R> Debug for RecordDescriptor<R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RecordDescriptor").field("table", &self.table).field("fields", &self.fields).finish()
	}
}

#[cfg(test)]
mod tests {
	use once_cell::sync::Lazy;
	use widerow_type::{Error, Type};

	use super::*;
	use crate::codec;

	#[derive(Clone, PartialEq, prost::Message)]
	struct Context {
		#[prost(string, tag = "1")]
		event_id: String,
	}

	#[derive(Debug, Default, Clone, PartialEq)]
	struct Note {
		id: String,
		priority: i32,
		tags: Vec<String>,
		ctx: Option<Context>,
		history: Vec<Context>,
		cached: String,
	}

	impl Record for Note {
		fn descriptor() -> &'static RecordDescriptor<Self> {
			static DESCRIPTOR: Lazy<RecordDescriptor<Note>> = Lazy::new(|| {
				RecordDescriptor::<Note>::builder("notes")
					.scalar("id", |r| &r.id, |r| &mut r.id)
					.scalar("priority", |r| &r.priority, |r| &mut r.priority)
					.scalar("tags", |r| &r.tags, |r| &mut r.tags)
					.structured("ctx", |r| &r.ctx, |r| &mut r.ctx)
					.repeated("history", |r| &r.history, |r| &mut r.history)
					.scalar(SKIP, |r| &r.cached, |r| &mut r.cached)
					.build()
			});
			&DESCRIPTOR
		}
	}

	fn context(event_id: &str) -> Context {
		Context {
			event_id: event_id.to_string(),
		}
	}

	#[test]
	fn test_declaration_order() {
		let descriptor = Note::descriptor();
		assert_eq!(descriptor.table(), "notes");
		let names: Vec<_> = descriptor.fields().iter().map(Field::name).collect();
		assert_eq!(names, vec!["id", "priority", "tags", "ctx", "history", SKIP]);
		let kinds: Vec<_> = descriptor.fields().iter().map(Field::kind).collect();
		assert_eq!(
			kinds,
			vec![
				FieldKind::Scalar,
				FieldKind::Scalar,
				FieldKind::Scalar,
				FieldKind::Structured,
				FieldKind::RepeatedStructured,
				FieldKind::Scalar
			]
		);
	}

	#[test]
	fn test_skip_marker() {
		let descriptor = Note::descriptor();
		assert!(descriptor.fields()[5].is_skipped());
		assert!(descriptor.field(SKIP).is_none());
		assert!(descriptor.field("id").is_some());
	}

	#[test]
	fn test_is_default_per_kind() {
		let descriptor = Note::descriptor();
		let empty = Note::default();
		assert!(descriptor.fields().iter().all(|f| f.is_default(&empty)));

		let full = Note {
			id: "n1".to_string(),
			priority: 3,
			tags: vec!["a".to_string()],
			ctx: Some(Context::default()),
			history: vec![context("e1")],
			cached: "x".to_string(),
		};
		assert!(descriptor.fields().iter().all(|f| !f.is_default(&full)));
	}

	#[test]
	fn test_value_encodes_structured_kinds() {
		let descriptor = Note::descriptor();
		let note = Note {
			ctx: Some(context("cool")),
			history: vec![context("a"), context("b")],
			..Default::default()
		};

		let ctx = descriptor.field("ctx").unwrap().value(&note).unwrap();
		assert_eq!(ctx, Value::blob(codec::encode("ctx", &context("cool")).unwrap()));

		let history = descriptor.field("history").unwrap().value(&note).unwrap();
		let Value::List(items) = history else {
			panic!("expected a list")
		};
		assert_eq!(items.len(), 2);
		assert!(items.iter().all(|v| matches!(v, Value::Blob(_))));
	}

	#[test]
	fn test_assign_roundtrip() {
		let descriptor = Note::descriptor();
		let source = Note {
			id: "n1".to_string(),
			priority: 9,
			tags: vec!["x".to_string(), "y".to_string()],
			ctx: Some(context("cool")),
			history: vec![context("a"), context("b")],
			cached: "never stored".to_string(),
		};

		let mut target = Note::default();
		for field in descriptor.fields().iter().filter(|f| !f.is_skipped()) {
			let value = field.value(&source).unwrap();
			field.assign(&mut target, value).unwrap();
		}

		assert_eq!(
			target,
			Note {
				cached: String::new(),
				..source
			}
		);
	}

	#[test]
	fn test_assign_undefined_keeps_default() {
		let descriptor = Note::descriptor();
		let mut note = Note::default();
		for field in descriptor.fields() {
			field.assign(&mut note, Value::Undefined).unwrap();
		}
		assert_eq!(note, Note::default());
	}

	#[test]
	fn test_assign_type_mismatch() {
		let descriptor = Note::descriptor();
		let mut note = Note::default();

		let err = descriptor.field("priority").unwrap().assign(&mut note, Value::utf8("high")).unwrap_err();
		assert!(matches!(
			err,
			Error::TypeMismatch {
				expected: Type::Int4,
				actual: Type::Utf8,
				..
			}
		));

		let err = descriptor.field("ctx").unwrap().assign(&mut note, Value::int8(1)).unwrap_err();
		assert!(matches!(
			err,
			Error::TypeMismatch {
				expected: Type::Blob,
				..
			}
		));

		let err = descriptor
			.field("history")
			.unwrap()
			.assign(&mut note, Value::list([Value::utf8("nope")]))
			.unwrap_err();
		assert!(matches!(
			err,
			Error::TypeMismatch {
				expected: Type::Blob,
				actual: Type::Utf8,
				..
			}
		));
	}

	#[test]
	fn test_assign_malformed_payload() {
		let descriptor = Note::descriptor();
		let mut note = Note::default();
		let err = descriptor.field("ctx").unwrap().assign(&mut note, Value::blob(vec![0xffu8])).unwrap_err();
		assert!(matches!(err, Error::Decoding { ref column, .. } if column == "ctx"));
	}
}
