// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test support for widerow.
//!
//! [`MemoryStore`] stands in for a real cluster: it understands the statement
//! subset the mapper emits and keeps rows in memory with the store's upsert
//! semantics. [`RecordingSession`] captures statements and serves canned rows
//! for tests that care about the exact text sent to the store.

pub mod fixture;
mod memory;
mod recording;

pub use memory::MemoryStore;
use memory::MemoryCursor;
pub use recording::RecordingSession;
