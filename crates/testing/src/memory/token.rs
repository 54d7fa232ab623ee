// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
	// Bare words; keywords are matched case-insensitively by the parser
	Word(String),
	// Double-quoted identifiers
	Quoted(String),
	Integer(i64),
	Placeholder, // ?
	Comma,       // ,
	Dot,         // .
	OpenParen,   // (
	CloseParen,  // )
	Eq,          // =
	Lt,          // <
	Gt,          // >
	LtEq,        // <=
	GtEq,        // >=
}

pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, String> {
	let mut tokens = Vec::new();
	let chars: Vec<char> = text.chars().collect();
	let len = chars.len();
	let mut i = 0;

	while i < len {
		let c = chars[i];

		if c.is_ascii_whitespace() {
			i += 1;
			continue;
		}

		match c {
			'?' => {
				tokens.push(Token::Placeholder);
				i += 1;
				continue;
			}
			',' => {
				tokens.push(Token::Comma);
				i += 1;
				continue;
			}
			'.' => {
				tokens.push(Token::Dot);
				i += 1;
				continue;
			}
			'(' => {
				tokens.push(Token::OpenParen);
				i += 1;
				continue;
			}
			')' => {
				tokens.push(Token::CloseParen);
				i += 1;
				continue;
			}
			'=' => {
				tokens.push(Token::Eq);
				i += 1;
				continue;
			}
			'<' => {
				if i + 1 < len && chars[i + 1] == '=' {
					tokens.push(Token::LtEq);
					i += 2;
				} else {
					tokens.push(Token::Lt);
					i += 1;
				}
				continue;
			}
			'>' => {
				if i + 1 < len && chars[i + 1] == '=' {
					tokens.push(Token::GtEq);
					i += 2;
				} else {
					tokens.push(Token::Gt);
					i += 1;
				}
				continue;
			}
			_ => {}
		}

		// Quoted identifiers, "" escapes a quote
		if c == '"' {
			i += 1;
			let mut s = String::new();
			while i < len {
				if chars[i] == '"' {
					if i + 1 < len && chars[i + 1] == '"' {
						s.push('"');
						i += 2;
					} else {
						break;
					}
				} else {
					s.push(chars[i]);
					i += 1;
				}
			}
			if i >= len {
				return Err("unterminated quoted identifier".into());
			}
			i += 1;
			tokens.push(Token::Quoted(s));
			continue;
		}

		if c.is_ascii_digit() {
			let start = i;
			while i < len && chars[i].is_ascii_digit() {
				i += 1;
			}
			let text: String = chars[start..i].iter().collect();
			let n: i64 = text.parse().map_err(|e| format!("invalid integer: {e}"))?;
			tokens.push(Token::Integer(n));
			continue;
		}

		if c.is_ascii_alphabetic() || c == '_' {
			let start = i;
			while i < len && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
				i += 1;
			}
			tokens.push(Token::Word(chars[start..i].iter().collect()));
			continue;
		}

		return Err(format!("unexpected character '{c}' at position {i}"));
	}

	Ok(tokens)
}
