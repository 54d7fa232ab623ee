// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Statement text and parameters for each operation shape.
//!
//! Identifiers and placeholders are the only things ever interpolated into
//! the text. Predicates render in key order so the same filter always
//! produces the same statement.

use tracing::debug;
use widerow_core::{Comparison, FilterSpec, FilterValue, ORDER_BY, Predicate, Statement};
use widerow_type::{Error, Result, Value};

use crate::field::{ColumnBinding, column_list};

/// `INSERT INTO <table>(<cols>) VALUES (<placeholders>)`, or `None` when no
/// column participates.
pub fn upsert<R>(table: &str, bindings: &[ColumnBinding<'_, R>], record: &R) -> Result<Option<Statement>> {
	if bindings.is_empty() {
		return Ok(None);
	}

	let params = bindings.iter().map(|b| b.value(record)).collect::<Result<Vec<_>>>()?;
	let placeholders = vec!["?"; bindings.len()].join(",");
	let text = format!("INSERT INTO {table}({}) VALUES ({placeholders})", column_list(bindings));
	Ok(Some(Statement::new(text, params)))
}

/// `SELECT <cols> FROM <table> WHERE <preds> LIMIT 1`, or `None` without
/// predicates.
pub fn point_read<R>(table: &str, bindings: &[ColumnBinding<'_, R>], mut filter: FilterSpec) -> Result<Option<Statement>> {
	ignore_order_by(&mut filter, "point read");
	let mut params = Vec::new();
	let predicates = where_clause(&filter, false, &mut params)?;
	if predicates.is_empty() {
		return Ok(None);
	}

	let columns = select_list(table, bindings)?;
	let text = format!("SELECT {columns} FROM {table} WHERE {predicates} LIMIT 1");
	Ok(Some(Statement::new(text, params)))
}

/// `SELECT <cols> FROM <table> [WHERE <preds>] [ORDER BY <clause>] LIMIT <n>`
/// with `limit` already clamped.
pub fn list<R>(table: &str, bindings: &[ColumnBinding<'_, R>], mut filter: FilterSpec, limit: usize) -> Result<Statement> {
	let order_by = filter.take_order_by()?;
	let mut params = Vec::new();
	let predicates = where_clause(&filter, false, &mut params)?;

	let mut text = format!("SELECT {} FROM {table}", select_list(table, bindings)?);
	if !predicates.is_empty() {
		text.push_str(" WHERE ");
		text.push_str(&predicates);
	}
	if let Some(order_by) = order_by {
		text.push_str(&format!(" ORDER BY {order_by}"));
	}
	text.push_str(&format!(" LIMIT {limit}"));
	Ok(Statement::new(text, params))
}

/// `SELECT <cols> FROM <table> [WHERE <preds>]`, where sequence values
/// render as `IN` lists with one parameter per element.
pub fn batch<R>(table: &str, bindings: &[ColumnBinding<'_, R>], mut filter: FilterSpec) -> Result<Statement> {
	ignore_order_by(&mut filter, "batch list");
	let mut params = Vec::new();
	let predicates = where_clause(&filter, true, &mut params)?;

	let mut text = format!("SELECT {} FROM {table}", select_list(table, bindings)?);
	if !predicates.is_empty() {
		text.push_str(" WHERE ");
		text.push_str(&predicates);
	}
	Ok(Statement::new(text, params))
}

/// `DELETE FROM <table> WHERE <preds>`, or `None` without predicates.
pub fn delete(table: &str, mut filter: FilterSpec) -> Result<Option<Statement>> {
	ignore_order_by(&mut filter, "delete");
	let mut params = Vec::new();
	let predicates = where_clause(&filter, false, &mut params)?;
	if predicates.is_empty() {
		return Ok(None);
	}
	Ok(Some(Statement::new(format!("DELETE FROM {table} WHERE {predicates}"), params)))
}

fn select_list<R>(table: &str, bindings: &[ColumnBinding<'_, R>]) -> Result<String> {
	if bindings.is_empty() {
		return Err(Error::invalid_argument(format!("no readable column for table '{table}'")));
	}
	Ok(column_list(bindings))
}

fn ignore_order_by(filter: &mut FilterSpec, shape: &str) {
	if let Some(clause) = filter.remove(ORDER_BY) {
		debug!(shape, ?clause, "ignoring order by");
	}
}

/// Renders the predicates of `filter` joined by `AND`, appending their
/// parameters to `params`. Empty sequences contribute nothing.
fn where_clause(filter: &FilterSpec, allow_many: bool, params: &mut Vec<Value>) -> Result<String> {
	let mut rendered = Vec::new();
	for predicate in filter.predicates()? {
		let identifier = predicate.identifier();
		let Predicate {
			column,
			comparison,
			value,
		} = predicate;

		match value {
			FilterValue::Single(value) => {
				rendered.push(format!("{identifier}{comparison}?"));
				params.push(value);
			}
			FilterValue::Many(_) if !allow_many => {
				return Err(Error::invalid_argument(format!(
					"'{column}' holds a sequence, which only a batch list accepts"
				)));
			}
			FilterValue::Many(_) if comparison != Comparison::Eq => {
				return Err(Error::invalid_argument(format!(
					"'{column}' holds a sequence but uses the '{comparison}' operator"
				)));
			}
			FilterValue::Many(values) if values.is_empty() => {}
			FilterValue::Many(values) => {
				let placeholders = vec!["?"; values.len()].join(",");
				rendered.push(format!("{identifier} IN ({placeholders})"));
				params.extend(values);
			}
		}
	}
	Ok(rendered.join(" AND "))
}

#[cfg(test)]
mod tests {
	use widerow_core::Record;
	use widerow_testing::fixture::{Account, Condition, Rule, Setting};

	use super::*;
	use crate::field::{resolve_for_read, resolve_for_write};

	#[test]
	fn test_upsert() {
		let rule = Rule {
			strategy: 1,
			assign_tos: vec!["agent1".to_string()],
			conditions: vec![Condition::new("user.name", "eq", "thanh")],
			..Rule::new("acc", "r1")
		};
		let bindings = resolve_for_write(None, Rule::descriptor(), &rule);
		let statement = upsert("rules", &bindings, &rule).unwrap().unwrap();

		assert_eq!(
			statement.text(),
			"INSERT INTO rules(account_id,id,strategy,assign_tos,conditions) VALUES (?,?,?,?,?)"
		);
		assert_eq!(statement.params().len(), 5);
		assert_eq!(statement.params()[0], Value::utf8("acc"));
		assert_eq!(statement.params()[2], Value::int4(1));
		assert_eq!(statement.params()[3], Value::list([Value::utf8("agent1")]));
		assert!(matches!(&statement.params()[4], Value::List(items) if items.len() == 1));
	}

	#[test]
	fn test_upsert_nothing_to_write() {
		let bindings = resolve_for_write(None, Account::descriptor(), &Account::default());
		assert!(upsert("accounts", &bindings, &Account::default()).unwrap().is_none());
	}

	#[test]
	fn test_upsert_quotes_reserved() {
		let setting = Setting {
			key: "theme".to_string(),
			order: 2,
			value: Some("dark".to_string()),
		};
		let bindings = resolve_for_write(None, Setting::descriptor(), &setting);
		let statement = upsert("settings", &bindings, &setting).unwrap().unwrap();
		assert_eq!(statement.text(), "INSERT INTO settings(\"key\",\"order\",value) VALUES (?,?,?)");
	}

	#[test]
	fn test_point_read() {
		let bindings = resolve_for_read(None, Account::descriptor());
		let filter = FilterSpec::new().eq("id", "7").order_by("email desc");
		let statement = point_read("accounts", &bindings, filter).unwrap().unwrap();
		assert_eq!(statement.text(), "SELECT id,email,x FROM accounts WHERE id=? LIMIT 1");
		assert_eq!(statement.params(), &[Value::utf8("7")]);
	}

	#[test]
	fn test_point_read_without_predicates() {
		let bindings = resolve_for_read(None, Account::descriptor());
		assert!(point_read("accounts", &bindings, FilterSpec::new()).unwrap().is_none());
		assert!(point_read("accounts", &bindings, FilterSpec::new().order_by("id")).unwrap().is_none());
	}

	#[test]
	fn test_point_read_rejects_sequence() {
		let bindings = resolve_for_read(None, Account::descriptor());
		let err = point_read("accounts", &bindings, FilterSpec::new().is_in("id", ["1", "2"])).unwrap_err();
		assert_eq!(err.code(), "MAPPER_006");
	}

	#[test]
	fn test_predicates_render_in_key_order() {
		let bindings = resolve_for_read(None, Rule::descriptor());
		let filter = FilterSpec::new().eq("id", "r1").eq("account_id", "acc");
		let statement = point_read("rules", &bindings, filter).unwrap().unwrap();
		assert!(statement.text().ends_with("WHERE account_id=? AND id=? LIMIT 1"));
		assert_eq!(statement.params(), &[Value::utf8("acc"), Value::utf8("r1")]);
	}

	#[test]
	fn test_list() {
		let bindings = resolve_for_read(None, Rule::descriptor());
		let filter = FilterSpec::new()
			.eq("account_id", "acc")
			.compare("created", Comparison::Gt, 100i64)
			.order_by("created DESC");
		let statement = list("rules", &bindings, filter, 20).unwrap();
		assert_eq!(
			statement.text(),
			"SELECT account_id,id,prev_id,next_id,strategy,assign_tos,conditions,ctx,created FROM rules \
			 WHERE account_id=? AND created>? ORDER BY created DESC LIMIT 20"
		);
		assert_eq!(statement.params(), &[Value::utf8("acc"), Value::int8(100)]);
	}

	#[test]
	fn test_list_without_predicates() {
		let bindings = resolve_for_read(None, Account::descriptor());
		let statement = list("accounts", &bindings, FilterSpec::new(), 1000).unwrap();
		assert_eq!(statement.text(), "SELECT id,email,x FROM accounts LIMIT 1000");
		assert!(statement.params().is_empty());
	}

	#[test]
	fn test_list_escapes_reserved() {
		let bindings = resolve_for_read(None, Setting::descriptor());
		let filter = FilterSpec::new().eq("key", "theme").order_by("order asc");
		let statement = list("settings", &bindings, filter, 5).unwrap();
		assert_eq!(
			statement.text(),
			"SELECT \"key\",\"order\",value FROM settings WHERE \"key\"=? ORDER BY \"order\" ASC LIMIT 5"
		);
	}

	#[test]
	fn test_list_rejects_bad_order_by() {
		let bindings = resolve_for_read(None, Account::descriptor());
		let err = list("accounts", &bindings, FilterSpec::new().order_by("id sideways"), 20).unwrap_err();
		assert_eq!(err.code(), "MAPPER_006");
	}

	#[test]
	fn test_batch() {
		let bindings = resolve_for_read(None, Rule::descriptor());
		let filter = FilterSpec::new().eq("account_id", "acc").is_in("id", ["r1", "r2", "r3"]);
		let statement = batch("rules", &bindings, filter).unwrap();
		assert!(statement.text().ends_with("FROM rules WHERE account_id=? AND id IN (?,?,?)"));
		assert_eq!(statement.params().len(), 4);
	}

	#[test]
	fn test_batch_empty_sequence_contributes_nothing() {
		let bindings = resolve_for_read(None, Account::descriptor());
		let filter = FilterSpec::new().is_in("id", Vec::<Value>::new()).order_by("id");
		let statement = batch("accounts", &bindings, filter).unwrap();
		assert_eq!(statement.text(), "SELECT id,email,x FROM accounts");
		assert!(statement.params().is_empty());
	}

	#[test]
	fn test_batch_rejects_sequence_comparison() {
		let bindings = resolve_for_read(None, Account::descriptor());
		let filter = FilterSpec::new().with("id >", vec![Value::utf8("1")]);
		assert!(batch("accounts", &bindings, filter).is_err());
	}

	#[test]
	fn test_delete() {
		let filter = FilterSpec::new().eq("id", "r1").eq("account_id", "acc");
		let statement = delete("rules", filter).unwrap().unwrap();
		assert_eq!(statement.text(), "DELETE FROM rules WHERE account_id=? AND id=?");
		assert_eq!(statement.params().len(), 2);

		assert!(delete("rules", FilterSpec::new()).unwrap().is_none());
		assert!(delete("rules", FilterSpec::new().is_in("id", ["r1"])).is_err());
	}

	#[test]
	fn test_no_readable_columns() {
		let schema = ["unrelated".to_string()].into_iter().collect();
		let bindings = resolve_for_read(Some(&schema), Account::descriptor());
		assert!(bindings.is_empty());
		assert!(list("accounts", &bindings, FilterSpec::new(), 1).is_err());
	}
}
