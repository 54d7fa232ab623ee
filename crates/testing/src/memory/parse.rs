// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::token::{Token, tokenize};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Parsed {
	Insert {
		table: String,
		columns: Vec<String>,
	},
	Select {
		columns: Vec<String>,
		table: TableRef,
		conditions: Vec<Condition>,
		order_by: Option<(String, bool)>,
		limit: Option<usize>,
	},
	Delete {
		table: String,
		conditions: Vec<Condition>,
	},
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TableRef {
	pub keyspace: Option<String>,
	pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Operator {
	Eq,
	Lt,
	LtEq,
	Gt,
	GtEq,
	In,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Condition {
	pub column: String,
	pub operator: Operator,
	/// Indices into the statement parameters.
	pub params: Vec<usize>,
}

impl Parsed {
	pub(crate) fn placeholders(&self) -> usize {
		match self {
			Parsed::Insert {
				columns,
				..
			} => columns.len(),
			Parsed::Select {
				conditions,
				..
			}
			| Parsed::Delete {
				conditions,
				..
			} => conditions.iter().map(|c| c.params.len()).sum(),
		}
	}
}

pub(crate) fn parse(text: &str) -> Result<Parsed, String> {
	let tokens = tokenize(text)?;
	let mut parser = Parser {
		tokens,
		pos: 0,
		next_param: 0,
	};
	let parsed = parser.parse_statement()?;
	if parser.pos != parser.tokens.len() {
		return Err(format!("unexpected trailing input at token {:?}", parser.tokens[parser.pos]));
	}
	Ok(parsed)
}

struct Parser {
	tokens: Vec<Token>,
	pos: usize,
	next_param: usize,
}

impl Parser {
	fn parse_statement(&mut self) -> Result<Parsed, String> {
		if self.consume_keyword("INSERT") {
			self.parse_insert()
		} else if self.consume_keyword("SELECT") {
			self.parse_select()
		} else if self.consume_keyword("DELETE") {
			self.parse_delete()
		} else {
			Err(format!("unsupported statement starting at {:?}", self.peek()))
		}
	}

	fn parse_insert(&mut self) -> Result<Parsed, String> {
		self.expect_keyword("INTO")?;
		let table = self.parse_identifier()?;

		self.expect(Token::OpenParen)?;
		let columns = self.parse_identifier_list()?;
		self.expect(Token::CloseParen)?;

		self.expect_keyword("VALUES")?;
		self.expect(Token::OpenParen)?;
		let mut values = 0;
		loop {
			self.expect(Token::Placeholder)?;
			values += 1;
			if !self.consume(&Token::Comma) {
				break;
			}
		}
		self.expect(Token::CloseParen)?;

		if values != columns.len() {
			return Err(format!("{} columns but {} values", columns.len(), values));
		}
		Ok(Parsed::Insert {
			table,
			columns,
		})
	}

	fn parse_select(&mut self) -> Result<Parsed, String> {
		let columns = self.parse_identifier_list()?;
		self.expect_keyword("FROM")?;
		let table = self.parse_table_ref()?;
		let conditions = self.parse_where()?;

		let mut order_by = None;
		if self.consume_keyword("ORDER") {
			self.expect_keyword("BY")?;
			let column = self.parse_identifier()?;
			let descending = if self.consume_keyword("DESC") {
				true
			} else {
				self.consume_keyword("ASC");
				false
			};
			order_by = Some((column, descending));
		}

		let mut limit = None;
		if self.consume_keyword("LIMIT") {
			match self.next() {
				Some(Token::Integer(n)) if n > 0 => limit = Some(n as usize),
				other => return Err(format!("expected a positive limit, got {other:?}")),
			}
		}

		Ok(Parsed::Select {
			columns,
			table,
			conditions,
			order_by,
			limit,
		})
	}

	fn parse_delete(&mut self) -> Result<Parsed, String> {
		self.expect_keyword("FROM")?;
		let table = self.parse_identifier()?;
		let conditions = self.parse_where()?;
		if conditions.is_empty() {
			return Err("DELETE requires a WHERE clause".into());
		}
		Ok(Parsed::Delete {
			table,
			conditions,
		})
	}

	fn parse_where(&mut self) -> Result<Vec<Condition>, String> {
		let mut conditions = Vec::new();
		if !self.consume_keyword("WHERE") {
			return Ok(conditions);
		}
		loop {
			conditions.push(self.parse_condition()?);
			if !self.consume_keyword("AND") {
				break;
			}
		}
		Ok(conditions)
	}

	fn parse_condition(&mut self) -> Result<Condition, String> {
		let column = self.parse_identifier()?;

		if self.consume_keyword("IN") {
			self.expect(Token::OpenParen)?;
			let mut params = Vec::new();
			loop {
				self.expect(Token::Placeholder)?;
				params.push(self.param());
				if !self.consume(&Token::Comma) {
					break;
				}
			}
			self.expect(Token::CloseParen)?;
			return Ok(Condition {
				column,
				operator: Operator::In,
				params,
			});
		}

		let operator = match self.next() {
			Some(Token::Eq) => Operator::Eq,
			Some(Token::Lt) => Operator::Lt,
			Some(Token::LtEq) => Operator::LtEq,
			Some(Token::Gt) => Operator::Gt,
			Some(Token::GtEq) => Operator::GtEq,
			other => return Err(format!("expected a comparison after '{column}', got {other:?}")),
		};
		self.expect(Token::Placeholder)?;
		Ok(Condition {
			column,
			operator,
			params: vec![self.param()],
		})
	}

	fn parse_table_ref(&mut self) -> Result<TableRef, String> {
		let first = self.parse_identifier()?;
		if self.consume(&Token::Dot) {
			let name = self.parse_identifier()?;
			return Ok(TableRef {
				keyspace: Some(first),
				name,
			});
		}
		Ok(TableRef {
			keyspace: None,
			name: first,
		})
	}

	fn parse_identifier_list(&mut self) -> Result<Vec<String>, String> {
		let mut identifiers = vec![self.parse_identifier()?];
		while self.consume(&Token::Comma) {
			identifiers.push(self.parse_identifier()?);
		}
		Ok(identifiers)
	}

	fn parse_identifier(&mut self) -> Result<String, String> {
		match self.next() {
			Some(Token::Quoted(name)) => Ok(name),
			Some(Token::Word(word)) if widerow_core::is_reserved(&word) => {
				Err(format!("reserved keyword '{word}' used as an identifier"))
			}
			Some(Token::Word(word)) => Ok(word),
			other => Err(format!("expected an identifier, got {other:?}")),
		}
	}

	fn param(&mut self) -> usize {
		let index = self.next_param;
		self.next_param += 1;
		index
	}

	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.pos)
	}

	fn next(&mut self) -> Option<Token> {
		let token = self.tokens.get(self.pos).cloned();
		if token.is_some() {
			self.pos += 1;
		}
		token
	}

	fn consume(&mut self, expected: &Token) -> bool {
		if self.peek() == Some(expected) {
			self.pos += 1;
			return true;
		}
		false
	}

	fn expect(&mut self, expected: Token) -> Result<(), String> {
		if self.consume(&expected) {
			return Ok(());
		}
		Err(format!("expected {expected:?}, got {:?}", self.peek()))
	}

	fn consume_keyword(&mut self, keyword: &str) -> bool {
		match self.peek() {
			Some(Token::Word(word)) if word.eq_ignore_ascii_case(keyword) => {
				self.pos += 1;
				true
			}
			_ => false,
		}
	}

	fn expect_keyword(&mut self, keyword: &str) -> Result<(), String> {
		if self.consume_keyword(keyword) {
			return Ok(());
		}
		Err(format!("expected {keyword}, got {:?}", self.peek()))
	}
}
