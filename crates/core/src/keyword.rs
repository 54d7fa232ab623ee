// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{borrow::Cow, collections::HashSet};

use once_cell::sync::Lazy;

/// Identifiers of the statement grammar that must be double-quoted when used
/// as a column name. Matched case-insensitively.
pub const RESERVED_KEYWORDS: &[&str] = &[
	"ALL",
	"ALLOW",
	"ALTER",
	"AND",
	"ANY",
	"APPLY",
	"AS",
	"ASC",
	"ASCII",
	"AUTHORIZE",
	"BATCH",
	"BEGIN",
	"BIGINT",
	"BLOB",
	"BOOLEAN",
	"BY",
	"CLUSTERING",
	"COLUMNFAMILY",
	"COMPACT",
	"CONSISTENCY",
	"COUNT",
	"COUNTER",
	"CREATE",
	"CUSTOM",
	"DECIMAL",
	"DELETE",
	"DESC",
	"DISTINCT",
	"DOUBLE",
	"DROP",
	"EACH",
	"EXISTS",
	"FILTERING",
	"FLOAT",
	"FROM",
	"FROZEN",
	"FULL",
	"GRANT",
	"IF",
	"IN",
	"INDEX",
	"INET",
	"INFINITY",
	"INSERT",
	"INT",
	"INTO",
	"KEY",
	"KEYSPACE",
	"KEYSPACES",
	"LEVEL",
	"LIMIT",
	"LIST",
	"LOCAL",
	"MAP",
	"MODIFY",
	"NAN",
	"NORECURSIVE",
	"NOSUPERUSER",
	"NOT",
	"OF",
	"ON",
	"ONE",
	"ORDER",
	"PASSWORD",
	"PERMISSION",
	"PERMISSIONS",
	"PRIMARY",
	"QUORUM",
	"RENAME",
	"REVOKE",
	"SCHEMA",
	"SELECT",
	"SET",
	"STATIC",
	"STORAGE",
	"SUPERUSER",
	"TABLE",
	"TEXT",
	"TIMESTAMP",
	"TIMEUUID",
	"THREE",
	"TO",
	"TOKEN",
	"TRUNCATE",
	"TTL",
	"TUPLE",
	"TWO",
	"UNLOGGED",
	"UPDATE",
	"USE",
	"USER",
	"USERS",
	"USING",
	"UUID",
	"VALUES",
	"VARCHAR",
	"VARINT",
	"WHERE",
	"WITH",
	"WRITETIME",
	"VIEW",
];

static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| RESERVED_KEYWORDS.iter().copied().collect());

pub fn is_reserved(identifier: &str) -> bool {
	RESERVED.contains(identifier.to_ascii_uppercase().as_str())
}

/// Quotes `identifier` if it collides with a reserved keyword.
pub fn escape_identifier(identifier: &str) -> Cow<'_, str> {
	if is_reserved(identifier) {
		Cow::Owned(quote(identifier))
	} else {
		Cow::Borrowed(identifier)
	}
}

pub fn quote(identifier: &str) -> String {
	format!("\"{}\"", identifier.replace('"', "\"\""))
}
