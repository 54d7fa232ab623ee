// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::VecDeque;

use parking_lot::Mutex;
use widerow_core::{RowCursor, Statement, StoreSession};
use widerow_type::{StoreError, Value};

use crate::MemoryCursor;

/// Captures every statement it receives and answers queries from result
/// sets queued with [`RecordingSession::push_rows`]. A query with nothing
/// queued returns no rows.
#[derive(Default)]
pub struct RecordingSession {
	state: Mutex<State>,
}

#[derive(Default)]
struct State {
	statements: Vec<Statement>,
	results: VecDeque<Vec<Vec<Value>>>,
	fail_next: Option<StoreError>,
	fail_next_close: Option<StoreError>,
}

impl RecordingSession {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn statements(&self) -> Vec<Statement> {
		self.state.lock().statements.clone()
	}

	/// The most recent statement, if any.
	pub fn last(&self) -> Option<Statement> {
		self.state.lock().statements.last().cloned()
	}

	/// Queues the rows returned by the next query.
	pub fn push_rows(&self, rows: Vec<Vec<Value>>) {
		self.state.lock().results.push_back(rows);
	}

	pub fn fail_next(&self, err: StoreError) {
		self.state.lock().fail_next = Some(err);
	}

	/// Makes the cursor of the next query fail on close.
	pub fn fail_next_close(&self, err: StoreError) {
		self.state.lock().fail_next_close = Some(err);
	}
}

impl StoreSession for RecordingSession {
	fn execute(&self, statement: &Statement) -> Result<(), StoreError> {
		let mut state = self.state.lock();
		state.statements.push(statement.clone());
		match state.fail_next.take() {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}

	fn query(&self, statement: &Statement) -> Result<Box<dyn RowCursor + '_>, StoreError> {
		let mut state = self.state.lock();
		state.statements.push(statement.clone());
		if let Some(err) = state.fail_next.take() {
			return Err(err);
		}

		let mut cursor = MemoryCursor::new(state.results.pop_front().unwrap_or_default());
		if let Some(err) = state.fail_next_close.take() {
			cursor = cursor.failing_close(err);
		}
		Ok(Box::new(cursor))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_records_and_replays() {
		let session = RecordingSession::new();
		session.push_rows(vec![vec![Value::utf8("a")], vec![Value::utf8("b")]]);

		let statement = Statement::new("SELECT id FROM t", vec![]);
		let mut cursor = session.query(&statement).unwrap();
		let mut row = [Value::Undefined];
		let mut ids = Vec::new();
		while cursor.scan(&mut row) {
			ids.push(row[0].clone());
		}
		cursor.close().unwrap();

		assert_eq!(ids, vec![Value::utf8("a"), Value::utf8("b")]);
		assert_eq!(session.statements(), vec![statement.clone()]);
		assert_eq!(session.last(), Some(statement));
	}

	#[test]
	fn test_empty_when_nothing_queued() {
		let session = RecordingSession::new();
		let mut cursor = session.query(&Statement::new("SELECT id FROM t", vec![])).unwrap();
		assert!(!cursor.scan(&mut [Value::Undefined]));
		cursor.close().unwrap();
	}

	#[test]
	fn test_failures() {
		let session = RecordingSession::new();
		session.fail_next(StoreError::message("unavailable"));
		let err = session.execute(&Statement::new("DELETE FROM t WHERE id=?", vec![Value::int8(1)])).unwrap_err();
		assert_eq!(err.to_string(), "unavailable");

		session.fail_next_close(StoreError::message("reset"));
		let cursor = session.query(&Statement::new("SELECT id FROM t", vec![])).unwrap();
		assert_eq!(cursor.close().unwrap_err().to_string(), "reset");
		assert_eq!(session.statements().len(), 2);
	}
}
