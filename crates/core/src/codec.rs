// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binary envelope for structured column values.
//!
//! A structured field holds a nested message; it is stored as one opaque
//! blob column in protobuf wire format. A repeated-structured field is stored
//! as a list of such blobs. Scalars never pass through here.
//!
//! Failures are not retried: a payload that does not decode means the stored
//! bytes and the declared message type disagree.

use prost::Message;
use widerow_type::{Error, Result};

pub fn encode<M: Message>(column: &str, message: &M) -> Result<Vec<u8>> {
	let mut buf = Vec::with_capacity(message.encoded_len());
	message.encode(&mut buf).map_err(|source| Error::Encoding {
		column: column.to_string(),
		source,
	})?;
	Ok(buf)
}

pub fn encode_all<M: Message>(column: &str, messages: &[M]) -> Result<Vec<Vec<u8>>> {
	messages.iter().map(|message| encode(column, message)).collect()
}

pub fn decode<M: Message + Default>(column: &str, bytes: &[u8]) -> Result<M> {
	M::decode(bytes).map_err(|source| Error::Decoding {
		column: column.to_string(),
		source,
	})
}

pub fn decode_all<M, B>(column: &str, payloads: &[B]) -> Result<Vec<M>>
where
	M: Message + Default,
	B: AsRef<[u8]>,
{
	payloads.iter().map(|bytes| decode(column, bytes.as_ref())).collect()
}
