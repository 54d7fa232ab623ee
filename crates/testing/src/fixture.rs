// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Records shared by the mapper and end-to-end tests.

use once_cell::sync::Lazy;
use widerow_core::{Record, RecordDescriptor, SKIP};

use crate::MemoryStore;

pub const KEYSPACE: &str = "casstest";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum AssignStrategy {
	Unspecified = 0,
	RoundRobinAgents = 1,
	AllAgents = 2,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Condition {
	#[prost(string, tag = "1")]
	pub key: String,
	#[prost(string, tag = "2")]
	pub operator: String,
	#[prost(string, tag = "3")]
	pub value: String,
}

impl Condition {
	pub fn new(key: &str, operator: &str, value: &str) -> Self {
		Self {
			key: key.to_string(),
			operator: operator.to_string(),
			value: value.to_string(),
		}
	}
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Context {
	#[prost(string, tag = "1")]
	pub event_id: String,
	#[prost(string, tag = "2")]
	pub by: String,
}

impl Context {
	pub fn event(event_id: &str) -> Self {
		Self {
			event_id: event_id.to_string(),
			by: String::new(),
		}
	}
}

/// A routing rule: scalars, a repeated nested message, a single nested
/// message and a field that is never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rule {
	pub account_id: String,
	pub id: String,
	pub prev_id: String,
	pub next_id: String,
	pub strategy: i32,
	pub assign_tos: Vec<String>,
	pub conditions: Vec<Condition>,
	pub ctx: Option<Context>,
	pub created: i64,
	pub cached: String,
}

impl Rule {
	pub fn new(account_id: &str, id: &str) -> Self {
		Self {
			account_id: account_id.to_string(),
			id: id.to_string(),
			..Default::default()
		}
	}
}

impl Record for Rule {
	fn descriptor() -> &'static RecordDescriptor<Self> {
		static DESCRIPTOR: Lazy<RecordDescriptor<Rule>> = Lazy::new(|| {
			RecordDescriptor::<Rule>::builder("rules")
				.scalar("account_id", |r| &r.account_id, |r| &mut r.account_id)
				.scalar("id", |r| &r.id, |r| &mut r.id)
				.scalar("prev_id", |r| &r.prev_id, |r| &mut r.prev_id)
				.scalar("next_id", |r| &r.next_id, |r| &mut r.next_id)
				.scalar("strategy", |r| &r.strategy, |r| &mut r.strategy)
				.scalar("assign_tos", |r| &r.assign_tos, |r| &mut r.assign_tos)
				.repeated("conditions", |r| &r.conditions, |r| &mut r.conditions)
				.structured("ctx", |r| &r.ctx, |r| &mut r.ctx)
				.scalar("created", |r| &r.created, |r| &mut r.created)
				.scalar(SKIP, |r| &r.cached, |r| &mut r.cached)
				.build()
		});
		&DESCRIPTOR
	}
}

/// An account whose `extra` field maps to a column the table lacks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Account {
	pub id: String,
	pub email: String,
	pub extra: String,
}

impl Record for Account {
	fn descriptor() -> &'static RecordDescriptor<Self> {
		static DESCRIPTOR: Lazy<RecordDescriptor<Account>> = Lazy::new(|| {
			RecordDescriptor::<Account>::builder("accounts")
				.scalar("id", |r| &r.id, |r| &mut r.id)
				.scalar("email", |r| &r.email, |r| &mut r.email)
				.scalar("x", |r| &r.extra, |r| &mut r.extra)
				.build()
		});
		&DESCRIPTOR
	}
}

/// A setting whose storage names are reserved words.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Setting {
	pub key: String,
	pub order: i64,
	pub value: Option<String>,
}

impl Record for Setting {
	fn descriptor() -> &'static RecordDescriptor<Self> {
		static DESCRIPTOR: Lazy<RecordDescriptor<Setting>> = Lazy::new(|| {
			RecordDescriptor::<Setting>::builder("settings")
				.scalar("key", |r| &r.key, |r| &mut r.key)
				.scalar("order", |r| &r.order, |r| &mut r.order)
				.scalar("value", |r| &r.value, |r| &mut r.value)
				.build()
		});
		&DESCRIPTOR
	}
}

/// Declares the tables backing [`Rule`], [`Account`] and [`Setting`].
pub fn create_tables(store: &MemoryStore) {
	store.create_table(
		"rules",
		&["account_id", "id"],
		&[
			"account_id",
			"id",
			"prev_id",
			"next_id",
			"strategy",
			"assign_tos",
			"conditions",
			"ctx",
			"created",
		],
	);
	store.create_table("accounts", &["id"], &["id", "email"]);
	store.create_table("settings", &["\"key\""], &["\"key\"", "\"order\"", "value"]);
}

/// A store in [`KEYSPACE`] with every fixture table declared.
pub fn store() -> MemoryStore {
	let store = MemoryStore::new(KEYSPACE);
	create_tables(&store);
	store
}
