// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod metadata;
mod schema;

pub use metadata::{COLUMNS_QUERY, SessionMetadata};
pub use schema::TableSchema;
