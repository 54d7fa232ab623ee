// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use super::Blob;

impl Blob {
	pub fn to_hex(&self) -> String {
		let mut out = String::with_capacity(2 + self.len() * 2);
		out.push_str("0x");
		for byte in self.as_bytes() {
			let _ = write!(out, "{byte:02x}");
		}
		out
	}
}
