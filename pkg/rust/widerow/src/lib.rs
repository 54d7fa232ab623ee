// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Typed record mapping for wide-column stores.
//!
//! ```ignore
//! let mapper = Mapper::connect(session, MapperConfig::new("shop"))?;
//! mapper.upsert(&Account { id: "7".into(), ..Default::default() })?;
//! let account: Option<Account> = mapper.read(FilterSpec::new().eq("id", "7"))?;
//! ```

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod logging;

pub use logging::{LogFormat, TracingBuilder};
pub use widerow_catalog as catalog;
pub use widerow_catalog::{SessionMetadata, TableSchema};
pub use widerow_core as core;
pub use widerow_core::{
	Comparison, Direction, Field, FieldKind, FilterSpec, FilterValue, MetadataSource, ORDER_BY, OrderBy, Record,
	RecordDescriptor, RowCursor, SKIP, Statement, StoreSession, codec,
};
pub use widerow_mapper as mapper;
pub use widerow_mapper::{Mapper, MapperConfig};
pub use widerow_type::{Blob, Error, Result, ScalarType, StoreError, Type, Value};
