// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use widerow_type::Value;

/// Statement text with its positional `?` parameters.
///
/// Only identifiers and placeholders are ever written into `text`; every
/// field or filter value travels in `params`.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
	text: String,
	params: Vec<Value>,
}

impl Statement {
	pub fn new(text: impl Into<String>, params: Vec<Value>) -> Self {
		Self {
			text: text.into(),
			params,
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn params(&self) -> &[Value] {
		&self.params
	}
}

impl Display for Statement {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.text)
	}
}
