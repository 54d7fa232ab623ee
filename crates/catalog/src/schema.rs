// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};
use widerow_core::MetadataSource;
use widerow_type::{Error, Result};

/// The column names the store reports for each table of one keyspace.
///
/// Built once when the mapper connects and never mutated afterwards, so a
/// shared reference can be read from any number of threads without locking.
/// A table without an entry is not filtered by schema at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSchema {
	tables: HashMap<String, HashSet<String>>,
}

impl TableSchema {
	/// Loads the columns of `tables` in `keyspace`, or of every table when
	/// `tables` is empty.
	#[instrument(name = "catalog::schema::load", level = "debug", skip(source))]
	pub fn load(source: &impl MetadataSource, keyspace: &str, tables: &[&str]) -> Result<Self> {
		let columns = source.query_columns(keyspace).map_err(|source| Error::Metadata {
			keyspace: keyspace.to_string(),
			source,
		})?;

		let schema = Self::from_columns(
			columns.into_iter().filter(|(table, _)| tables.is_empty() || tables.contains(&table.as_str())),
		);

		debug!(keyspace, tables = schema.len(), "loaded table schema");
		Ok(schema)
	}

	pub fn from_columns<T, C>(columns: impl IntoIterator<Item = (T, C)>) -> Self
	where
		T: Into<String>,
		C: Into<String>,
	{
		let mut tables: HashMap<String, HashSet<String>> = HashMap::new();
		for (table, column) in columns {
			tables.entry(table.into()).or_default().insert(column.into());
		}
		Self {
			tables,
		}
	}

	pub fn columns_of(&self, table: &str) -> Option<&HashSet<String>> {
		self.tables.get(table)
	}

	pub fn tables(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.tables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}
}
