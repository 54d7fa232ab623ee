// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Predicate and ordering input for read and delete statements.
//!
//! A [`FilterSpec`] maps a column key to a value. The key is a column name,
//! optionally followed by a comparison operator (`"created >"`); without one
//! the predicate is an equality. The pseudo-key [`ORDER_BY`] holds the
//! ordering clause of a filtered list and never becomes a predicate.

use std::{
	collections::BTreeMap,
	fmt::{Display, Formatter},
};

use uuid::Uuid;
use widerow_type::{Error, Result, Value};

use crate::keyword::escape_identifier;

pub const ORDER_BY: &str = "order by";

#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
	/// Compared with the predicate's operator.
	Single(Value),
	/// Membership; only batch lists accept it.
	Many(Vec<Value>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
	Eq,
	Lt,
	LtEq,
	Gt,
	GtEq,
}

impl Comparison {
	pub fn as_str(&self) -> &'static str {
		match self {
			Comparison::Eq => "=",
			Comparison::Lt => "<",
			Comparison::LtEq => "<=",
			Comparison::Gt => ">",
			Comparison::GtEq => ">=",
		}
	}
}

impl Display for Comparison {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
	pub column: String,
	pub comparison: Comparison,
	pub value: FilterValue,
}

impl Predicate {
	/// The column identifier as it appears in statement text.
	pub fn identifier(&self) -> String {
		escape_identifier(&self.column).into_owned()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Asc,
	Desc,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
	pub column: String,
	pub direction: Option<Direction>,
}

impl OrderBy {
	/// Parses `"<column> [ASC|DESC]"`.
	pub fn parse(clause: &str) -> Result<Self> {
		let mut parts = clause.split_whitespace();
		let column = parts.next().ok_or_else(|| Error::invalid_argument("order by clause is empty"))?;

		let direction = match parts.next() {
			None => None,
			Some(d) if d.eq_ignore_ascii_case("asc") => Some(Direction::Asc),
			Some(d) if d.eq_ignore_ascii_case("desc") => Some(Direction::Desc),
			Some(d) => {
				return Err(Error::invalid_argument(format!(
					"unknown order by direction '{d}' in '{clause}'"
				)));
			}
		};

		if parts.next().is_some() {
			return Err(Error::invalid_argument(format!(
				"order by accepts a single column, got '{clause}'"
			)));
		}

		Ok(Self {
			column: column.to_string(),
			direction,
		})
	}
}

impl Display for OrderBy {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&escape_identifier(&self.column))?;
		match self.direction {
			Some(Direction::Asc) => f.write_str(" ASC"),
			Some(Direction::Desc) => f.write_str(" DESC"),
			None => Ok(()),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
	entries: BTreeMap<String, FilterValue>,
}

impl FilterSpec {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`, returning the previous value for that key.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Option<FilterValue> {
		self.entries.insert(key.into(), value.into())
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
		self.with(column, FilterValue::Single(value.into()))
	}

	pub fn compare(self, column: &str, comparison: Comparison, value: impl Into<Value>) -> Self {
		self.with(format!("{column} {comparison}"), FilterValue::Single(value.into()))
	}

	pub fn is_in<V: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
		self.with(column, FilterValue::Many(values.into_iter().map(Into::into).collect()))
	}

	pub fn order_by(self, clause: &str) -> Self {
		self.with(ORDER_BY, Value::utf8(clause))
	}

	pub fn get(&self, key: &str) -> Option<&FilterValue> {
		self.entries.get(key)
	}

	pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
		self.entries.remove(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes the [`ORDER_BY`] entry and parses it.
	pub fn take_order_by(&mut self) -> Result<Option<OrderBy>> {
		match self.entries.remove(ORDER_BY) {
			None => Ok(None),
			Some(FilterValue::Single(Value::Utf8(clause))) => OrderBy::parse(&clause).map(Some),
			Some(other) => Err(Error::invalid_argument(format!(
				"'{ORDER_BY}' expects a text clause, got {other:?}"
			))),
		}
	}

	/// Parses every remaining key into a predicate, in key order.
	pub fn predicates(&self) -> Result<Vec<Predicate>> {
		self.entries
			.iter()
			.map(|(key, value)| {
				let (column, comparison) = parse_key(key)?;
				Ok(Predicate {
					column: column.to_string(),
					comparison,
					value: value.clone(),
				})
			})
			.collect()
	}
}

fn parse_key(key: &str) -> Result<(&str, Comparison)> {
	const OPERATORS: [(&str, Comparison); 5] = [
		("<=", Comparison::LtEq),
		(">=", Comparison::GtEq),
		("=", Comparison::Eq),
		("<", Comparison::Lt),
		(">", Comparison::Gt),
	];

	let key = key.trim();
	let (column, comparison) = OPERATORS
		.iter()
		.find_map(|(op, comparison)| key.strip_suffix(*op).map(|column| (column.trim_end(), *comparison)))
		.unwrap_or((key, Comparison::Eq));

	if column.is_empty() || column.contains(char::is_whitespace) {
		return Err(Error::invalid_argument(format!("'{key}' is not a valid filter key")));
	}
	Ok((column, comparison))
}

impl From<Value> for FilterValue {
	fn from(v: Value) -> Self {
		FilterValue::Single(v)
	}
}

impl From<Vec<Value>> for FilterValue {
	fn from(v: Vec<Value>) -> Self {
		FilterValue::Many(v)
	}
}

impl From<&str> for FilterValue {
	fn from(v: &str) -> Self {
		FilterValue::Single(Value::utf8(v))
	}
}

impl From<String> for FilterValue {
	fn from(v: String) -> Self {
		FilterValue::Single(Value::Utf8(v))
	}
}

impl From<bool> for FilterValue {
	fn from(v: bool) -> Self {
		FilterValue::Single(Value::Boolean(v))
	}
}

impl From<i32> for FilterValue {
	fn from(v: i32) -> Self {
		FilterValue::Single(Value::Int4(v))
	}
}

impl From<i64> for FilterValue {
	fn from(v: i64) -> Self {
		FilterValue::Single(Value::Int8(v))
	}
}

impl From<Uuid> for FilterValue {
	fn from(v: Uuid) -> Self {
		FilterValue::Single(Value::Uuid(v))
	}
}
