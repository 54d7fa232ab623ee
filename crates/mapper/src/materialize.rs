// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use tracing::debug;
use widerow_core::{FieldKind, Record, Statement, StoreSession};
use widerow_type::{Result, Value};

use crate::field::ColumnBinding;

/// Runs `statement` and turns each returned row into a fresh `R`.
///
/// Every row is scanned into one staging slot per binding; scalar columns
/// are assigned first, then staged structured columns are decoded. The
/// cursor is always closed, and a close failure is reported unless an
/// earlier assignment already failed.
pub fn materialize<R: Record>(
	session: &impl StoreSession,
	statement: &Statement,
	bindings: &[ColumnBinding<'_, R>],
) -> Result<Vec<R>> {
	let mut cursor = session.query(statement)?;

	let mut records = Vec::new();
	let mut failure = None;
	let mut row = vec![Value::Undefined; bindings.len()];
	while cursor.scan(&mut row) {
		match assign_row(bindings, &mut row) {
			Ok(record) => records.push(record),
			Err(err) => {
				failure = Some(err);
				break;
			}
		}
	}
	let closed = cursor.close();

	if let Some(err) = failure {
		return Err(err);
	}
	closed?;

	debug!(rows = records.len(), "materialized rows");
	Ok(records)
}

fn assign_row<R: Record>(bindings: &[ColumnBinding<'_, R>], row: &mut [Value]) -> Result<R> {
	let mut record = R::default();

	for (binding, value) in bindings.iter().zip(row.iter_mut()) {
		if binding.field().kind() == FieldKind::Scalar {
			binding.field().assign(&mut record, mem::take(value))?;
		}
	}
	for (binding, staged) in bindings.iter().zip(row.iter_mut()) {
		if binding.field().kind() != FieldKind::Scalar {
			binding.field().assign(&mut record, mem::take(staged))?;
		}
	}

	Ok(record)
}

#[cfg(test)]
mod tests {
	use widerow_core::codec;
	use widerow_testing::{
		RecordingSession,
		fixture::{Condition, Context, Rule},
	};
	use widerow_type::{Error, StoreError};

	use super::*;
	use crate::field::resolve_for_read;

	fn statement() -> Statement {
		Statement::new("SELECT account_id,id FROM rules", vec![])
	}

	fn rule_row(id: &str, ctx: Value, conditions: Value) -> Vec<Value> {
		vec![
			Value::utf8("acc"),
			Value::utf8(id),
			Value::Undefined,
			Value::utf8(""),
			Value::int4(1),
			Value::list([Value::utf8("agent1"), Value::utf8("agent2")]),
			conditions,
			ctx,
			Value::int8(42),
		]
	}

	#[test]
	fn test_materialize_rows() {
		let session = RecordingSession::new();
		let ctx = codec::encode("ctx", &Context::event("cool")).unwrap();
		let condition = codec::encode("conditions", &Condition::new("user.email", "superset", "x")).unwrap();
		session.push_rows(vec![
			rule_row("r1", Value::blob(ctx), Value::list([Value::blob(condition)])),
			rule_row("r2", Value::Undefined, Value::Undefined),
		]);

		let bindings = resolve_for_read(None, Rule::descriptor());
		let rules = materialize(&session, &statement(), &bindings).unwrap();
		assert_eq!(rules.len(), 2);

		assert_eq!(
			rules[0],
			Rule {
				strategy: 1,
				assign_tos: vec!["agent1".to_string(), "agent2".to_string()],
				conditions: vec![Condition::new("user.email", "superset", "x")],
				ctx: Some(Context::event("cool")),
				created: 42,
				..Rule::new("acc", "r1")
			}
		);
		assert_eq!(rules[1].ctx, None);
		assert!(rules[1].conditions.is_empty());
		assert!(rules[1].prev_id.is_empty());
	}

	#[test]
	fn test_materialize_empty_blob_is_default_message() {
		let session = RecordingSession::new();
		session.push_rows(vec![rule_row("r1", Value::blob(Vec::<u8>::new()), Value::list([]))]);

		let bindings = resolve_for_read(None, Rule::descriptor());
		let rules = materialize(&session, &statement(), &bindings).unwrap();
		assert_eq!(rules[0].ctx, Some(Context::default()));
	}

	#[test]
	fn test_materialize_no_rows() {
		let session = RecordingSession::new();
		let bindings = resolve_for_read(None, Rule::descriptor());
		assert!(materialize(&session, &statement(), &bindings).unwrap().is_empty());
	}

	#[test]
	fn test_materialize_decode_failure() {
		let session = RecordingSession::new();
		session.push_rows(vec![rule_row("r1", Value::blob(vec![0xffu8, 0xff]), Value::Undefined)]);
		session.fail_next_close(StoreError::message("ignored"));

		let bindings = resolve_for_read(None, Rule::descriptor());
		let err = materialize(&session, &statement(), &bindings).unwrap_err();
		assert!(matches!(err, Error::Decoding { ref column, .. } if column == "ctx"));
	}

	#[test]
	fn test_materialize_close_failure() {
		let session = RecordingSession::new();
		session.push_rows(vec![rule_row("r1", Value::Undefined, Value::Undefined)]);
		session.fail_next_close(StoreError::message("read timeout"));

		let bindings = resolve_for_read(None, Rule::descriptor());
		let err = materialize(&session, &statement(), &bindings).unwrap_err();
		assert_eq!(err.code(), "MAPPER_008");
		assert_eq!(err.to_string(), "read timeout");
	}

	#[test]
	fn test_materialize_query_failure() {
		let session = RecordingSession::new();
		session.fail_next(StoreError::message("no hosts available"));
		let bindings = resolve_for_read(None, Rule::descriptor());
		let err = materialize(&session, &statement(), &bindings).unwrap_err();
		assert!(matches!(err, Error::Store(_)));
	}
}
