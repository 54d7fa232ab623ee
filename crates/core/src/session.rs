// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Contracts for the store client the mapper drives.
//!
//! Transport, connection management, retries and timeouts all live behind
//! these traits; the mapper only hands over statement text with its bound
//! parameters.

use std::sync::Arc;

use widerow_type::{StoreError, Value};

use crate::Statement;

pub trait StoreSession: Send + Sync {
	/// Executes a statement that returns no rows.
	fn execute(&self, statement: &Statement) -> Result<(), StoreError>;

	/// Executes a statement and returns a cursor over its rows.
	fn query(&self, statement: &Statement) -> Result<Box<dyn RowCursor + '_>, StoreError>;
}

/// Forward-only cursor over the rows of one query.
pub trait RowCursor {
	/// Writes the next row into `destinations`, one value per projected
	/// column. Returns `false` once the rows are exhausted or the cursor has
	/// failed; the failure is reported by [`RowCursor::close`].
	fn scan(&mut self, destinations: &mut [Value]) -> bool;

	fn close(self: Box<Self>) -> Result<(), StoreError>;
}

/// Source of `(table, column)` pairs for one keyspace.
pub trait MetadataSource {
	fn query_columns(&self, keyspace: &str) -> Result<Vec<(String, String)>, StoreError>;
}

impl<S: StoreSession + ?Sized> StoreSession for Arc<S> {
	fn execute(&self, statement: &Statement) -> Result<(), StoreError> {
		(**self).execute(statement)
	}

	fn query(&self, statement: &Statement) -> Result<Box<dyn RowCursor + '_>, StoreError> {
		(**self).query(statement)
	}
}

impl<S: StoreSession + ?Sized> StoreSession for &S {
	fn execute(&self, statement: &Statement) -> Result<(), StoreError> {
		(**self).execute(statement)
	}

	fn query(&self, statement: &Statement) -> Result<Box<dyn RowCursor + '_>, StoreError> {
		(**self).query(statement)
	}
}

impl<M: MetadataSource + ?Sized> MetadataSource for Arc<M> {
	fn query_columns(&self, keyspace: &str) -> Result<Vec<(String, String)>, StoreError> {
		(**self).query_columns(keyspace)
	}
}

impl<M: MetadataSource + ?Sized> MetadataSource for &M {
	fn query_columns(&self, keyspace: &str) -> Result<Vec<(String, String)>, StoreError> {
		(**self).query_columns(keyspace)
	}
}
