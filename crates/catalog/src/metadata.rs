// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use tracing::instrument;
use widerow_core::{MetadataSource, Statement, StoreSession};
use widerow_type::{StoreError, Value};

pub const COLUMNS_QUERY: &str = "SELECT table_name, column_name FROM system_schema.columns WHERE keyspace_name=?";

/// Reads column metadata through an ordinary store session by querying the
/// `system_schema.columns` table.
pub struct SessionMetadata<S> {
	session: S,
}

impl<S: StoreSession> SessionMetadata<S> {
	pub fn new(session: S) -> Self {
		Self {
			session,
		}
	}
}

impl<S: StoreSession> MetadataSource for SessionMetadata<S> {
	#[instrument(name = "catalog::metadata::query_columns", level = "trace", skip(self))]
	fn query_columns(&self, keyspace: &str) -> Result<Vec<(String, String)>, StoreError> {
		let statement = Statement::new(COLUMNS_QUERY, vec![Value::utf8(keyspace)]);
		let mut cursor = self.session.query(&statement)?;

		let mut columns = Vec::new();
		let mut malformed = None;
		let mut row = [Value::Undefined, Value::Undefined];
		while cursor.scan(&mut row) {
			match (mem::take(&mut row[0]), mem::take(&mut row[1])) {
				(Value::Utf8(table), Value::Utf8(column)) => columns.push((table, column)),
				(table, column) => {
					malformed = Some(StoreError::message(format!(
						"unexpected column metadata row ({}, {})",
						table.get_type(),
						column.get_type()
					)));
					break;
				}
			}
		}
		cursor.close()?;

		match malformed {
			Some(err) => Err(err),
			None => Ok(columns),
		}
	}
}
