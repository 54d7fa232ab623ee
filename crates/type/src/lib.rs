// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Store-native values and the error taxonomy shared by every widerow crate.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod value;

pub use error::{Error, Result, StoreError};
pub use value::{Blob, GetType, ScalarType, Type, Value};
