// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Record mapping for wide-column stores.
//!
//! A [`Mapper`] turns typed [`Record`]s into parameterized insert-or-update,
//! read, list, batch-list and delete statements, hands them to a
//! [`StoreSession`], and turns returned rows back into records. Which fields
//! take part is decided per call from the record descriptor and the table
//! schema loaded once at connect time.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
pub mod field;
pub mod materialize;
pub mod statement;

use std::{collections::HashSet, sync::Arc};

pub use config::{DEFAULT_LIMIT, MAX_LIMIT, MapperConfig};
use tracing::{debug, instrument};
use widerow_catalog::{SessionMetadata, TableSchema};
use widerow_core::{FilterSpec, Record, StoreSession};
use widerow_type::{Error, Result};

use crate::{
	field::{resolve_for_read, resolve_for_write},
	materialize::materialize,
};

pub struct Mapper<S> {
	session: S,
	schema: Arc<TableSchema>,
	config: MapperConfig,
}

impl<S: StoreSession> Mapper<S> {
	pub fn new(session: S, schema: Arc<TableSchema>, config: MapperConfig) -> Self {
		Self {
			session,
			schema,
			config,
		}
	}

	/// Loads the schema of the configured keyspace through `session` and
	/// returns a mapper over it. Fails if the column metadata cannot be read.
	#[instrument(name = "mapper::connect", level = "debug", skip_all, fields(keyspace = %config.keyspace))]
	pub fn connect(session: S, config: MapperConfig) -> Result<Self> {
		config.validate()?;
		let metadata = SessionMetadata::new(&session);
		let schema = TableSchema::load(&metadata, &config.keyspace, &[])?;
		Ok(Self::new(session, Arc::new(schema), config))
	}

	pub fn session(&self) -> &S {
		&self.session
	}

	pub fn schema(&self) -> &Arc<TableSchema> {
		&self.schema
	}

	pub fn config(&self) -> &MapperConfig {
		&self.config
	}

	/// Writes every non-default field of `record`. Columns not written keep
	/// their stored value.
	#[instrument(name = "mapper::upsert", level = "debug", skip_all, fields(table = R::descriptor().table()))]
	pub fn upsert<R: Record>(&self, record: &R) -> Result<()> {
		let descriptor = R::descriptor();
		let bindings = resolve_for_write(self.columns_of(descriptor.table()), descriptor, record);
		match statement::upsert(descriptor.table(), &bindings, record)? {
			Some(statement) => {
				debug!(statement = statement.text(), params = statement.params().len(), "executing upsert");
				self.session.execute(&statement)?;
			}
			None => debug!("no column to write, skipping upsert"),
		}
		Ok(())
	}

	/// Reads the first row matching `filter`.
	///
	/// Returns `Ok(None)` without contacting the store when `filter` holds no
	/// predicate, and [`Error::NotFound`] when no row matches.
	#[instrument(name = "mapper::read", level = "debug", skip_all, fields(table = R::descriptor().table()))]
	pub fn read<R: Record>(&self, filter: FilterSpec) -> Result<Option<R>> {
		let descriptor = R::descriptor();
		let bindings = resolve_for_read(self.columns_of(descriptor.table()), descriptor);
		let Some(statement) = statement::point_read(descriptor.table(), &bindings, filter)? else {
			debug!("no predicate, skipping read");
			return Ok(None);
		};

		debug!(statement = statement.text(), params = statement.params().len(), "executing point read");
		let mut records = materialize(&self.session, &statement, &bindings)?;
		if records.is_empty() {
			return Err(Error::NotFound {
				table: descriptor.table().to_string(),
			});
		}
		Ok(Some(records.swap_remove(0)))
	}

	/// Lists up to `limit` rows matching `filter`, honoring an `"order by"`
	/// entry. A zero limit selects the configured default, a negative limit
	/// counts by its magnitude, and the configured maximum caps it.
	#[instrument(name = "mapper::list", level = "debug", skip_all, fields(table = R::descriptor().table(), limit = limit))]
	pub fn list<R: Record>(&self, filter: FilterSpec, limit: i64) -> Result<Vec<R>> {
		let descriptor = R::descriptor();
		let bindings = resolve_for_read(self.columns_of(descriptor.table()), descriptor);
		let limit = self.config.clamp_limit(limit);
		let statement = statement::list(descriptor.table(), &bindings, filter, limit)?;

		debug!(statement = statement.text(), params = statement.params().len(), "executing list");
		materialize(&self.session, &statement, &bindings)
	}

	/// Lists every row matching `filter`, where sequence values select rows
	/// whose column is any of the elements.
	#[instrument(name = "mapper::list_batch", level = "debug", skip_all, fields(table = R::descriptor().table()))]
	pub fn list_batch<R: Record>(&self, filter: FilterSpec) -> Result<Vec<R>> {
		let descriptor = R::descriptor();
		let bindings = resolve_for_read(self.columns_of(descriptor.table()), descriptor);
		let statement = statement::batch(descriptor.table(), &bindings, filter)?;

		debug!(statement = statement.text(), params = statement.params().len(), "executing batch list");
		materialize(&self.session, &statement, &bindings)
	}

	/// Deletes the rows matching `filter`. Without a predicate nothing is
	/// deleted.
	#[instrument(name = "mapper::delete", level = "debug", skip_all, fields(table = R::descriptor().table()))]
	pub fn delete<R: Record>(&self, filter: FilterSpec) -> Result<()> {
		let table = R::descriptor().table();
		match statement::delete(table, filter)? {
			Some(statement) => {
				debug!(statement = statement.text(), params = statement.params().len(), "executing delete");
				self.session.execute(&statement)?;
			}
			None => debug!("no predicate, skipping delete"),
		}
		Ok(())
	}

	fn columns_of(&self, table: &str) -> Option<&HashSet<String>> {
		let columns = self.schema.columns_of(table);
		if columns.is_none() {
			debug!(table, "no schema for table, every field participates");
		}
		columns
	}
}

#[cfg(test)]
mod tests {
	use widerow_core::Value;
	use widerow_testing::{
		RecordingSession,
		fixture::{Account, Rule},
	};
	use widerow_type::StoreError;

	use super::*;

	fn mapper(session: RecordingSession) -> Mapper<RecordingSession> {
		let schema = TableSchema::from_columns([("accounts", "id"), ("accounts", "email")]);
		Mapper::new(session, Arc::new(schema), MapperConfig::new("shop"))
	}

	#[test]
	fn test_upsert_uses_schema() {
		let mapper = mapper(RecordingSession::new());
		mapper
			.upsert(&Account {
				id: "7".to_string(),
				email: String::new(),
				extra: "ignored".to_string(),
			})
			.unwrap();

		let statement = mapper.session().last().unwrap();
		assert_eq!(statement.text(), "INSERT INTO accounts(id) VALUES (?)");
		assert_eq!(statement.params(), &[Value::utf8("7")]);
	}

	#[test]
	fn test_upsert_without_columns_is_noop() {
		let mapper = mapper(RecordingSession::new());
		mapper.upsert(&Account::default()).unwrap();
		assert!(mapper.session().statements().is_empty());
	}

	#[test]
	fn test_read_without_predicates() {
		let mapper = mapper(RecordingSession::new());
		assert_eq!(mapper.read::<Account>(FilterSpec::new()).unwrap(), None);
		assert!(mapper.session().statements().is_empty());
	}

	#[test]
	fn test_read_not_found() {
		let mapper = mapper(RecordingSession::new());
		let err = mapper.read::<Account>(FilterSpec::new().eq("id", "7")).unwrap_err();
		assert!(err.is_not_found());
		assert_eq!(err.code(), "MAPPER_002");
	}

	#[test]
	fn test_read_first_row() {
		let session = RecordingSession::new();
		session.push_rows(vec![
			vec![Value::utf8("7"), Value::utf8("a@b.c")],
			vec![Value::utf8("8"), Value::utf8("d@e.f")],
		]);
		let mapper = mapper(session);

		let account = mapper.read::<Account>(FilterSpec::new().eq("id", "7")).unwrap().unwrap();
		assert_eq!(
			account,
			Account {
				id: "7".to_string(),
				email: "a@b.c".to_string(),
				extra: String::new(),
			}
		);
		assert_eq!(mapper.session().last().unwrap().text(), "SELECT id,email FROM accounts WHERE id=? LIMIT 1");
	}

	#[test]
	fn test_list_clamps_limit() {
		let mapper = mapper(RecordingSession::new());
		for (requested, emitted) in [(0, 20), (-7, 7), (5000, 1000), (1000, 1000), (1, 1)] {
			mapper.list::<Account>(FilterSpec::new(), requested).unwrap();
			let text = mapper.session().last().unwrap().text().to_string();
			assert!(text.ends_with(&format!(" LIMIT {emitted}")), "{requested}: {text}");
		}
	}

	#[test]
	fn test_missing_schema_entry_includes_every_field() {
		let mapper = mapper(RecordingSession::new());
		mapper.list_batch::<Rule>(FilterSpec::new().eq("account_id", "acc")).unwrap();
		assert_eq!(
			mapper.session().last().unwrap().text(),
			"SELECT account_id,id,prev_id,next_id,strategy,assign_tos,conditions,ctx,created FROM rules WHERE account_id=?"
		);
	}

	#[test]
	fn test_delete_without_predicates_is_noop() {
		let mapper = mapper(RecordingSession::new());
		mapper.delete::<Rule>(FilterSpec::new()).unwrap();
		assert!(mapper.session().statements().is_empty());
	}

	#[test]
	fn test_store_errors_propagate() {
		let session = RecordingSession::new();
		session.fail_next(StoreError::message("write timeout"));
		let mapper = mapper(session);
		let err = mapper.delete::<Rule>(FilterSpec::new().eq("id", "r1")).unwrap_err();
		assert!(matches!(err, Error::Store(_)));
		assert_eq!(err.to_string(), "write timeout");
	}

	#[test]
	fn test_connect_fails_on_metadata_error() {
		let session = RecordingSession::new();
		session.fail_next(StoreError::message("no hosts available"));
		let err = Mapper::connect(session, MapperConfig::new("shop")).err().unwrap();
		assert_eq!(err.code(), "MAPPER_001");
	}

	#[test]
	fn test_connect_rejects_invalid_config() {
		let config = MapperConfig::new("shop").with_default_limit(0);
		let err = Mapper::connect(RecordingSession::new(), config).err().unwrap();
		assert_eq!(err.code(), "MAPPER_007");
	}
}
