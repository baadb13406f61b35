// AttrMap
// Copyright (C) 2025 AttrMap contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Shared wire-value contract for the AttrMap code generator.
//!
//! This crate owns the two types every other layer agrees on: the closed
//! [`AttributeKind`] set and the tagged-union [`AttributeValue`] that models a
//! document-store attribute map entry. The code generator resolves mapping
//! plans against these kinds; generated conversion routines produce and consume
//! these values.

pub mod kind;
pub mod value;

pub use kind::AttributeKind;
pub use value::{AttributeValue, ValueAccessError};
