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

//! The immutable type-graph snapshot
//!
//! The resolver never inspects raw source syntax. A Type Introspection Provider
//! produces one [`TypeSnapshot`] per generation pass (type identities, member
//! lists, declared type shapes, and nullability facts) and every analysis
//! reads only that snapshot.

pub mod snapshot;
pub mod types;

pub use snapshot::{EnumDef, MemberDef, ModelDef, TypeDef, TypeIntrospection, TypeSnapshot};
pub use types::{ScalarType, TypeId, TypeRef};
