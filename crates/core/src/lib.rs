// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod codec;
pub mod filter;
pub mod keyword;
pub mod record;
pub mod session;
pub mod statement;

pub use filter::{Comparison, Direction, FilterSpec, FilterValue, ORDER_BY, OrderBy, Predicate};
pub use keyword::{escape_identifier, is_reserved};
pub use record::{Field, FieldKind, Record, RecordDescriptor, RecordDescriptorBuilder, SKIP};
pub use session::{MetadataSource, RowCursor, StoreSession};
pub use statement::Statement;
pub use widerow_type::{Blob, Error, Result, ScalarType, StoreError, Type, Value};
