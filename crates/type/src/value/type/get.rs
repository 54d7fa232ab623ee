// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use uuid::Uuid;

use crate::{Blob, Type};

pub trait GetType {
	fn get_type() -> Type;
}

impl GetType for bool {
	fn get_type() -> Type {
		Type::Boolean
	}
}

impl GetType for i32 {
	fn get_type() -> Type {
		Type::Int4
	}
}

impl GetType for i64 {
	fn get_type() -> Type {
		Type::Int8
	}
}

impl GetType for f32 {
	fn get_type() -> Type {
		Type::Float4
	}
}

impl GetType for f64 {
	fn get_type() -> Type {
		Type::Float8
	}
}

impl GetType for String {
	fn get_type() -> Type {
		Type::Utf8
	}
}

impl GetType for Blob {
	fn get_type() -> Type {
		Type::Blob
	}
}

impl GetType for Uuid {
	fn get_type() -> Type {
		Type::Uuid
	}
}

impl<T: GetType> GetType for Vec<T> {
	fn get_type() -> Type {
		Type::List
	}
}

impl<T: GetType> GetType for Option<T> {
	fn get_type() -> Type {
		T::get_type()
	}
}
