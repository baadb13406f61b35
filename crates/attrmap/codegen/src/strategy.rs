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

//! Resolved mapping plans
//!
//! These are the types the resolver produces and the code emitter consumes.
//! Everything here is plain serializable data: identical inputs must yield
//! byte-identical serialized plans, which is what makes incremental
//! re-generation sound.

use crate::config::{ConverterRef, Direction, Hooks, OmissionPolicy};
use crate::registry::MapperReference;
use crate::typegraph::{TypeId, TypeRef};
use attrmap_common::AttributeKind;
use serde::{Deserialize, Serialize};

/// Which of the two directions a member participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSet {
    pub serialize: bool,
    pub deserialize: bool,
}

impl DirectionSet {
    pub const BOTH: Self = Self { serialize: true, deserialize: true };
    pub const NONE: Self = Self { serialize: false, deserialize: false };

    pub fn any(&self) -> bool {
        self.serialize || self.deserialize
    }

    pub fn contains(&self, direction: Direction) -> bool {
        match direction {
            Direction::Serialize => self.serialize,
            Direction::Deserialize => self.deserialize,
        }
    }
}

/// Structural collection category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionCategory {
    List,
    Map,
    Set,
}

impl std::fmt::Display for CollectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Map => "map",
            Self::Set => "set",
        };
        f.write_str(name)
    }
}

/// Classified collection shape for a collection-shaped member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub category: CollectionCategory,
    pub element: TypeRef,
    /// Map key type; always string-like, absent for non-maps.
    pub key: Option<TypeRef>,
    pub is_array: bool,
    /// Attribute kind derived from category and element family.
    pub target_kind: AttributeKind,
}

/// How a nested model member converts: through another mapper, or inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NestedMappingInfo {
    /// Delegate to a registered mapper covering the needed directions.
    Reference(MapperReference),
    /// No qualifying mapper; the nested type's members are mapped in place.
    Inline(Vec<MemberStrategy>),
}

/// Base conversion family of a resolved member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionFamily {
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
    Identifier,
    Binary,
    Enumeration,
    Nested,
    Collection(CollectionCategory),
}

impl ConversionFamily {
    /// Whether this family resolves to a single scalar attribute.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Nested | Self::Collection(_))
    }

    /// Whether a format string applies to this family.
    pub fn supports_format(&self) -> bool {
        matches!(self, Self::DateTime | Self::OffsetDateTime | Self::Duration | Self::Identifier | Self::Enumeration)
    }

    /// Default attribute kind for this family, before overrides. Collection
    /// families defer to [`CollectionInfo::target_kind`].
    pub fn base_kind(&self) -> AttributeKind {
        match self {
            Self::Text | Self::Identifier | Self::Enumeration => AttributeKind::String,
            Self::DateTime | Self::OffsetDateTime | Self::Duration => AttributeKind::String,
            Self::Boolean => AttributeKind::Bool,
            Self::Int32 | Self::Int64 | Self::Float32 | Self::Float64 | Self::Decimal => AttributeKind::Number,
            Self::Binary => AttributeKind::Binary,
            Self::Nested => AttributeKind::Map,
            Self::Collection(CollectionCategory::Map) => AttributeKind::Map,
            Self::Collection(_) => AttributeKind::List,
        }
    }
}

impl std::fmt::Display for ConversionFamily {
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
            Self::Enumeration => "enumeration",
            Self::Nested => "nested",
            Self::Collection(category) => return category.fmt(f),
        };
        f.write_str(name)
    }
}

/// Direction-specific extra arguments for the emitted conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectionArgs {
    /// Resolved format string; never an ambient locale.
    pub format: Option<String>,
}

/// The resolved per-member plan: which kind, which conversion family, and how
/// nullability, overrides, and nesting are handled in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMappingStrategy {
    pub family: ConversionFamily,
    /// Element strategy for collection-shaped members.
    pub element: Option<Box<TypeMappingStrategy>>,
    /// Nullable modifier: absence of a value is representable.
    pub nullable: bool,
    /// Missing attribute on deserialize is an error.
    pub required: bool,
    pub directions: DirectionSet,
    pub serialize_args: DirectionArgs,
    pub deserialize_args: DirectionArgs,
    pub kind_override: Option<AttributeKind>,
    pub nested: Option<NestedMappingInfo>,
    pub collection: Option<CollectionInfo>,
    pub omission: OmissionPolicy,
    /// External converter reference, carried orthogonally to the family.
    pub converter: Option<ConverterRef>,
}

impl TypeMappingStrategy {
    /// Minimal strategy for a family; the resolver fills in the rest.
    pub fn for_family(family: ConversionFamily) -> Self {
        Self {
            family,
            element: None,
            nullable: false,
            required: false,
            directions: DirectionSet::BOTH,
            serialize_args: DirectionArgs::default(),
            deserialize_args: DirectionArgs::default(),
            kind_override: None,
            nested: None,
            collection: None,
            omission: OmissionPolicy::default(),
            converter: None,
        }
    }

    /// The attribute kind this member resolves to, after overrides.
    pub fn attribute_kind(&self) -> AttributeKind {
        if let Some(kind) = self.kind_override {
            return kind;
        }
        if let Some(collection) = &self.collection {
            return collection.target_kind;
        }
        self.family.base_kind()
    }
}

/// One member of a resolved plan: model member, attribute key, and strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStrategy {
    pub member: String,
    pub attribute_name: String,
    pub strategy: TypeMappingStrategy,
}

/// The complete resolved plan for one mapper, in member declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperPlan {
    pub mapper: String,
    pub model: TypeId,
    pub directions: DirectionSet,
    pub hooks: Hooks,
    pub members: Vec<MemberStrategy>,
}
