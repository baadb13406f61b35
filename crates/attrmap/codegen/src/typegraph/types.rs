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

//! Type identities and declared type shapes

use attrmap_common::AttributeKind;
use serde::{Deserialize, Serialize};

/// Identity of a named type in the snapshot (fully qualified name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(String);

impl TypeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The closed set of scalar families the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    Text,
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    DateTime,
    OffsetDateTime,
    Duration,
    /// Opaque identifier (GUID/UUID analog), stored as text.
    Identifier,
    Binary,
}

impl ScalarType {
    /// The attribute kind this scalar family maps to.
    pub fn attribute_kind(&self) -> AttributeKind {
        match self {
            Self::Text | Self::Identifier => AttributeKind::String,
            Self::Boolean => AttributeKind::Bool,
            Self::Int32 | Self::Int64 | Self::Float32 | Self::Float64 | Self::Decimal => AttributeKind::Number,
            Self::DateTime | Self::OffsetDateTime | Self::Duration => AttributeKind::String,
            Self::Binary => AttributeKind::Binary,
        }
    }

    /// Whether this family honors a format string (temporal, duration,
    /// identifier). Formats on other families are silently ignored.
    pub fn supports_format(&self) -> bool {
        matches!(self, Self::DateTime | Self::OffsetDateTime | Self::Duration | Self::Identifier)
    }

    /// Whether a map keyed by this scalar is representable. Attribute-map keys
    /// are text on the wire.
    pub fn is_string_like(&self) -> bool {
        matches!(self, Self::Text | Self::Identifier)
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Decimal => "decimal",
            Self::DateTime => "date-time",
            Self::OffsetDateTime => "offset-date-time",
            Self::Duration => "duration",
            Self::Identifier => "identifier",
            Self::Binary => "binary",
        };
        f.write_str(name)
    }
}

/// A declared type reference as the introspection provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Scalar(ScalarType),
    /// A closed enumeration declared in the snapshot.
    Enum(TypeId),
    /// A model type declared in the snapshot.
    Model(TypeId),
    /// Iterable with a fixed element type.
    List(Box<TypeRef>),
    /// Fixed-shape array; classified like a list, flagged for the emitter.
    Array(Box<TypeRef>),
    /// Keyed iterable.
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
    /// Unordered collection of distinct elements.
    Set(Box<TypeRef>),
}

impl TypeRef {
    pub fn list(element: TypeRef) -> Self {
        Self::List(Box::new(element))
    }

    pub fn array(element: TypeRef) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map { key: Box::new(key), value: Box::new(value) }
    }

    pub fn set(element: TypeRef) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn model(id: impl Into<TypeId>) -> Self {
        Self::Model(id.into())
    }

    /// Whether this reference is collection-shaped.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Array(_) | Self::Map { .. } | Self::Set(_))
    }

    /// Human-readable rendering for diagnostics.
    pub fn display_name(&self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.to_string(),
            Self::Enum(id) | Self::Model(id) => id.to_string(),
            Self::List(el) => format!("list<{}>", el.display_name()),
            Self::Array(el) => format!("array<{}>", el.display_name()),
            Self::Map { key, value } => format!("map<{}, {}>", key.display_name(), value.display_name()),
            Self::Set(el) => format!("set<{}>", el.display_name()),
        }
    }
}

impl From<ScalarType> for TypeRef {
    fn from(scalar: ScalarType) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        Self::Model(id)
    }
}
