// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod parse;
mod token;

use std::{
	cmp::Ordering,
	collections::{BTreeMap, VecDeque},
};

use parking_lot::Mutex;
use widerow_core::{MetadataSource, RowCursor, Statement, StoreSession};
use widerow_type::{StoreError, Value};

use self::parse::{Condition, Operator, Parsed, TableRef, parse};

const SYSTEM_KEYSPACE: &str = "system_schema";
const COLUMNS_TABLE: &str = "columns";

type Row = BTreeMap<String, Value>;

/// A single-keyspace store held in memory.
///
/// Tables are declared up front with [`MemoryStore::create_table`]; a
/// declared column written as `"name"` is reported quoted by the metadata
/// table, exactly as declared, and addressed by its bare name in rows.
/// Inserts behave as upserts keyed by the primary key, merging the written
/// columns into an existing row.
pub struct MemoryStore {
	keyspace: String,
	state: Mutex<State>,
}

#[derive(Default)]
struct State {
	tables: BTreeMap<String, Table>,
	statements: Vec<Statement>,
	fail_next: Option<StoreError>,
}

struct Table {
	primary_key: Vec<String>,
	declared: Vec<String>,
	columns: Vec<String>,
	rows: Vec<Row>,
}

impl MemoryStore {
	pub fn new(keyspace: impl Into<String>) -> Self {
		Self {
			keyspace: keyspace.into(),
			state: Mutex::new(State::default()),
		}
	}

	/// Declares a table, replacing any table of the same name.
	pub fn create_table(&self, name: &str, primary_key: &[&str], columns: &[&str]) {
		let table = Table {
			primary_key: primary_key.iter().map(|c| unquote(c).to_string()).collect(),
			declared: columns.iter().map(|c| c.to_string()).collect(),
			columns: columns.iter().map(|c| unquote(c).to_string()).collect(),
			rows: Vec::new(),
		};
		self.state.lock().tables.insert(name.to_string(), table);
	}

	/// Every statement received so far, in order.
	pub fn statements(&self) -> Vec<Statement> {
		self.state.lock().statements.clone()
	}

	/// Number of rows currently stored in `table`.
	pub fn row_count(&self, table: &str) -> usize {
		self.state.lock().tables.get(table).map_or(0, |t| t.rows.len())
	}

	/// The stored value of `column` in every row of `table`, in insertion
	/// order. A column never written reads as [`Value::Undefined`].
	pub fn column_values(&self, table: &str, column: &str) -> Vec<Value> {
		let state = self.state.lock();
		let Some(table) = state.tables.get(table) else {
			return Vec::new();
		};
		table.rows.iter().map(|row| row.get(column).cloned().unwrap_or_default()).collect()
	}

	/// Makes the next statement fail with `err` before it is applied.
	pub fn fail_next(&self, err: StoreError) {
		self.state.lock().fail_next = Some(err);
	}

	fn run(&self, statement: &Statement) -> Result<Vec<Vec<Value>>, StoreError> {
		let mut state = self.state.lock();
		state.statements.push(statement.clone());

		if let Some(err) = state.fail_next.take() {
			return Err(err);
		}

		let parsed = parse(statement.text()).map_err(|e| StoreError::message(format!("syntax error: {e}")))?;
		let params = statement.params();
		if parsed.placeholders() != params.len() {
			return Err(StoreError::message(format!(
				"statement has {} placeholders but {} parameters were bound",
				parsed.placeholders(),
				params.len()
			)));
		}

		match parsed {
			Parsed::Insert {
				table,
				columns,
			} => {
				let table = state.table_mut(&table)?;
				table.upsert(&columns, params)?;
				Ok(Vec::new())
			}
			Parsed::Select {
				columns,
				table,
				conditions,
				order_by,
				limit,
			} => {
				let system;
				let source = if self.is_columns_table(&table)? {
					system = state.columns_table(&self.keyspace);
					&system
				} else {
					state.table(&table.name)?
				};
				source.select(&columns, &conditions, params, order_by.as_ref(), limit)
			}
			Parsed::Delete {
				table,
				conditions,
			} => {
				let table = state.table_mut(&table)?;
				table.check_columns(conditions.iter().map(|c| c.column.as_str()))?;
				table.rows.retain(|row| !matches_all(row, &conditions, params));
				Ok(Vec::new())
			}
		}
	}

	fn is_columns_table(&self, table: &TableRef) -> Result<bool, StoreError> {
		match table.keyspace.as_deref() {
			None => Ok(false),
			Some(SYSTEM_KEYSPACE) if table.name == COLUMNS_TABLE => Ok(true),
			Some(keyspace) if keyspace == self.keyspace => Ok(false),
			Some(keyspace) => Err(StoreError::message(format!("unknown table {keyspace}.{}", table.name))),
		}
	}
}

impl State {
	fn table(&self, name: &str) -> Result<&Table, StoreError> {
		self.tables.get(name).ok_or_else(|| StoreError::message(format!("unconfigured table {name}")))
	}

	fn table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
		self.tables.get_mut(name).ok_or_else(|| StoreError::message(format!("unconfigured table {name}")))
	}

	fn columns_table(&self, keyspace: &str) -> Table {
		let columns = vec!["keyspace_name".to_string(), "table_name".to_string(), "column_name".to_string()];
		let rows = self
			.tables
			.iter()
			.flat_map(|(name, table)| {
				table.declared.iter().map(move |column| {
					Row::from([
						("keyspace_name".to_string(), Value::utf8(keyspace)),
						("table_name".to_string(), Value::utf8(name.as_str())),
						("column_name".to_string(), Value::utf8(column.as_str())),
					])
				})
			})
			.collect();
		Table {
			primary_key: columns.clone(),
			declared: columns.clone(),
			columns,
			rows,
		}
	}
}

impl Table {
	fn check_columns<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> Result<(), StoreError> {
		for column in columns {
			if !self.columns.iter().any(|c| c == column) {
				return Err(StoreError::message(format!("undefined column name {column}")));
			}
		}
		Ok(())
	}

	fn upsert(&mut self, columns: &[String], params: &[Value]) -> Result<(), StoreError> {
		self.check_columns(columns.iter().map(String::as_str))?;

		let mut written = Row::new();
		for (column, value) in columns.iter().zip(params) {
			written.insert(column.clone(), value.clone());
		}

		for key in &self.primary_key {
			match written.get(key) {
				Some(value) if !value.is_undefined() => {}
				_ => {
					return Err(StoreError::message(format!("missing primary key column {key}")));
				}
			}
		}

		let primary_key = &self.primary_key;
		let existing = self.rows.iter_mut().find(|row| primary_key.iter().all(|key| row.get(key) == written.get(key)));
		match existing {
			Some(row) => row.extend(written),
			None => self.rows.push(written),
		}
		Ok(())
	}

	fn select(
		&self,
		columns: &[String],
		conditions: &[Condition],
		params: &[Value],
		order_by: Option<&(String, bool)>,
		limit: Option<usize>,
	) -> Result<Vec<Vec<Value>>, StoreError> {
		self.check_columns(columns.iter().map(String::as_str))?;
		self.check_columns(conditions.iter().map(|c| c.column.as_str()))?;
		if let Some((column, _)) = order_by {
			self.check_columns([column.as_str()])?;
		}

		let mut rows: Vec<&Row> = self.rows.iter().filter(|row| matches_all(row, conditions, params)).collect();

		if let Some((column, descending)) = order_by {
			rows.sort_by(|l, r| {
				let ordering = compare(field(l, column), field(r, column)).unwrap_or(Ordering::Equal);
				if *descending { ordering.reverse() } else { ordering }
			});
		}

		Ok(rows
			.into_iter()
			.take(limit.unwrap_or(usize::MAX))
			.map(|row| columns.iter().map(|c| field(row, c).clone()).collect())
			.collect())
	}
}

fn unquote(column: &str) -> &str {
	column.strip_prefix('"').and_then(|c| c.strip_suffix('"')).unwrap_or(column)
}

fn field<'a>(row: &'a Row, column: &str) -> &'a Value {
	static UNDEFINED: Value = Value::Undefined;
	row.get(column).unwrap_or(&UNDEFINED)
}

fn matches_all(row: &Row, conditions: &[Condition], params: &[Value]) -> bool {
	conditions.iter().all(|condition| matches(field(row, &condition.column), condition, params))
}

fn matches(value: &Value, condition: &Condition, params: &[Value]) -> bool {
	let mut bound = condition.params.iter().map(|&i| &params[i]);
	if condition.operator == Operator::In {
		return bound.any(|p| compare(value, p) == Some(Ordering::Equal));
	}

	let Some(ordering) = bound.next().and_then(|p| compare(value, p)) else {
		return false;
	};
	matches!(
		(condition.operator, ordering),
		(Operator::Eq, Ordering::Equal)
			| (Operator::Lt, Ordering::Less)
			| (Operator::LtEq, Ordering::Less | Ordering::Equal)
			| (Operator::Gt, Ordering::Greater)
			| (Operator::GtEq, Ordering::Greater | Ordering::Equal)
	)
}

/// Orders two stored values, widening integers and floats of different
/// width. Undefined compares with nothing.
fn compare(l: &Value, r: &Value) -> Option<Ordering> {
	match (l, r) {
		(Value::Undefined, _) | (_, Value::Undefined) => None,
		(Value::Int4(l), Value::Int8(r)) => i64::from(*l).partial_cmp(r),
		(Value::Int8(l), Value::Int4(r)) => l.partial_cmp(&i64::from(*r)),
		(Value::Float4(l), Value::Float8(r)) => f64::from(*l).partial_cmp(r),
		(Value::Float8(l), Value::Float4(r)) => l.partial_cmp(&f64::from(*r)),
		(l, r) if l.get_type() == r.get_type() => l.partial_cmp(r),
		_ => None,
	}
}

impl StoreSession for MemoryStore {
	fn execute(&self, statement: &Statement) -> Result<(), StoreError> {
		self.run(statement).map(|_| ())
	}

	fn query(&self, statement: &Statement) -> Result<Box<dyn RowCursor + '_>, StoreError> {
		let rows = self.run(statement)?;
		Ok(Box::new(MemoryCursor::new(rows)))
	}
}

impl MetadataSource for MemoryStore {
	fn query_columns(&self, keyspace: &str) -> Result<Vec<(String, String)>, StoreError> {
		if keyspace != self.keyspace {
			return Ok(Vec::new());
		}
		let state = self.state.lock();
		Ok(state
			.tables
			.iter()
			.flat_map(|(name, table)| table.declared.iter().map(move |column| (name.clone(), column.clone())))
			.collect())
	}
}

/// Cursor over rows materialized up front.
pub(crate) struct MemoryCursor {
	rows: VecDeque<Vec<Value>>,
	error: Option<StoreError>,
	close_error: Option<StoreError>,
}

impl MemoryCursor {
	pub(crate) fn new(rows: impl Into<VecDeque<Vec<Value>>>) -> Self {
		Self {
			rows: rows.into(),
			error: None,
			close_error: None,
		}
	}

	/// Fails `close` with `err` once every row has been scanned.
	pub(crate) fn failing_close(mut self, err: StoreError) -> Self {
		self.close_error = Some(err);
		self
	}
}

impl RowCursor for MemoryCursor {
	fn scan(&mut self, destinations: &mut [Value]) -> bool {
		if self.error.is_some() {
			return false;
		}
		let Some(row) = self.rows.pop_front() else {
			return false;
		};
		if row.len() != destinations.len() {
			self.error = Some(StoreError::message(format!(
				"row has {} columns but {} destinations were given",
				row.len(),
				destinations.len()
			)));
			return false;
		}
		for (destination, value) in destinations.iter_mut().zip(row) {
			*destination = value;
		}
		true
	}

	fn close(self: Box<Self>) -> Result<(), StoreError> {
		match self.error.or(self.close_error) {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> MemoryStore {
		let store = MemoryStore::new("shop");
		store.create_table("orders", &["account_id", "id"], &["account_id", "id", "total", "\"key\""]);
		store
	}

	fn exec(store: &MemoryStore, text: &str, params: Vec<Value>) {
		store.execute(&Statement::new(text, params)).unwrap();
	}

	fn rows(store: &MemoryStore, text: &str, params: Vec<Value>, width: usize) -> Vec<Vec<Value>> {
		let mut cursor = store.query(&Statement::new(text, params)).unwrap();
		let mut result = Vec::new();
		let mut row = vec![Value::Undefined; width];
		while cursor.scan(&mut row) {
			result.push(row.clone());
		}
		cursor.close().unwrap();
		result
	}

	fn insert(store: &MemoryStore, id: &str, total: i64) {
		exec(
			store,
			"INSERT INTO orders(account_id,id,total) VALUES (?,?,?)",
			vec![Value::utf8("acc"), Value::utf8(id), Value::int8(total)],
		);
	}

	#[test]
	fn test_insert_merges_by_primary_key() {
		let store = store();
		insert(&store, "o1", 10);
		exec(
			&store,
			"INSERT INTO orders(account_id,id,\"key\") VALUES (?,?,?)",
			vec![Value::utf8("acc"), Value::utf8("o1"), Value::utf8("k")],
		);
		assert_eq!(store.row_count("orders"), 1);

		let result = rows(
			&store,
			"SELECT total,\"key\" FROM orders WHERE account_id=? AND id=?",
			vec![Value::utf8("acc"), Value::utf8("o1")],
			2,
		);
		assert_eq!(result, vec![vec![Value::int8(10), Value::utf8("k")]]);
	}

	#[test]
	fn test_insert_requires_primary_key() {
		let store = store();
		let err = store
			.execute(&Statement::new("INSERT INTO orders(id,total) VALUES (?,?)", vec![Value::utf8("o1"), Value::int8(1)]))
			.unwrap_err();
		assert!(err.to_string().contains("missing primary key column account_id"));
	}

	#[test]
	fn test_unknown_column_and_table() {
		let store = store();
		let err = store
			.execute(&Statement::new("INSERT INTO orders(account_id,id,x) VALUES (?,?,?)", vec![Value::utf8("a"), Value::utf8("b"), Value::utf8("c")]))
			.unwrap_err();
		assert!(err.to_string().contains("undefined column name x"));

		let err = store.query(&Statement::new("SELECT id FROM nowhere", vec![])).err().unwrap();
		assert!(err.to_string().contains("unconfigured table nowhere"));
	}

	#[test]
	fn test_parameter_count_checked() {
		let store = store();
		let err = store.query(&Statement::new("SELECT id FROM orders WHERE id=?", vec![])).err().unwrap();
		assert!(err.to_string().contains("1 placeholders but 0 parameters"));
	}

	#[test]
	fn test_where_order_limit() {
		let store = store();
		for (id, total) in [("o1", 30), ("o2", 10), ("o3", 20), ("o4", 40)] {
			insert(&store, id, total);
		}

		let result = rows(
			&store,
			"SELECT id FROM orders WHERE account_id=? AND total>=? ORDER BY total DESC LIMIT 2",
			vec![Value::utf8("acc"), Value::int4(20)],
			1,
		);
		assert_eq!(result, vec![vec![Value::utf8("o4")], vec![Value::utf8("o1")]]);

		let result = rows(
			&store,
			"SELECT id FROM orders WHERE id IN (?,?) ORDER BY id",
			vec![Value::utf8("o3"), Value::utf8("o2")],
			1,
		);
		assert_eq!(result, vec![vec![Value::utf8("o2")], vec![Value::utf8("o3")]]);
	}

	#[test]
	fn test_delete() {
		let store = store();
		insert(&store, "o1", 1);
		insert(&store, "o2", 2);
		exec(&store, "DELETE FROM orders WHERE account_id=? AND id=?", vec![Value::utf8("acc"), Value::utf8("o1")]);
		assert_eq!(store.column_values("orders", "id"), vec![Value::utf8("o2")]);
	}

	#[test]
	fn test_columns_table() {
		let store = store();
		let result = rows(
			&store,
			"SELECT table_name, column_name FROM system_schema.columns WHERE keyspace_name=?",
			vec![Value::utf8("shop")],
			2,
		);
		assert_eq!(result.len(), 4);
		assert!(result.contains(&vec![Value::utf8("orders"), Value::utf8("\"key\"")]));

		let result = rows(
			&store,
			"SELECT table_name, column_name FROM system_schema.columns WHERE keyspace_name=?",
			vec![Value::utf8("billing")],
			2,
		);
		assert!(result.is_empty());
	}

	#[test]
	fn test_cursor_width_mismatch() {
		let store = store();
		insert(&store, "o1", 1);
		let mut cursor = store.query(&Statement::new("SELECT id,total FROM orders", vec![])).unwrap();
		let mut row = vec![Value::Undefined; 1];
		assert!(!cursor.scan(&mut row));
		assert!(cursor.close().is_err());
	}

	#[test]
	fn test_fail_next() {
		let store = store();
		store.fail_next(StoreError::message("timeout"));
		let err = store.execute(&Statement::new("SELECT id FROM orders", vec![])).unwrap_err();
		assert_eq!(err.to_string(), "timeout");
		assert!(store.execute(&Statement::new("SELECT id FROM orders", vec![])).is_ok());
		assert_eq!(store.statements().len(), 2);
	}
}
