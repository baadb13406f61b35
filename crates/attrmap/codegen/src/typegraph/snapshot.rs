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

//! Snapshot of the type universe for one generation pass

use super::types::{TypeId, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One member of a model type, with nullability and accessibility facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDef {
    pub name: String,
    pub ty: TypeRef,
    /// Declared optional (nullable value type or annotated-nullable).
    pub is_optional: bool,
    /// Reference-like declaration: absence is representable without an
    /// explicit optional marker.
    pub is_reference_like: bool,
    /// Readable: usable for the serialize direction.
    pub has_getter: bool,
    /// Writable: usable for the deserialize direction.
    pub has_setter: bool,
}

impl MemberDef {
    /// A readable+writable, non-optional member.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_optional: false,
            is_reference_like: false,
            has_getter: true,
            has_setter: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn reference_like(mut self) -> Self {
        self.is_reference_like = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.has_setter = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.has_getter = false;
        self
    }

    /// Whether absence of a value is representable for this member.
    pub fn is_nullable(&self) -> bool {
        self.is_optional || self.is_reference_like
    }
}

/// A model type: identity plus ordered member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDef {
    pub id: TypeId,
    pub members: Vec<MemberDef>,
}

impl ModelDef {
    pub fn new(id: impl Into<TypeId>) -> Self {
        Self { id: id.into(), members: Vec::new() }
    }

    pub fn with_member(mut self, member: MemberDef) -> Self {
        self.members.push(member);
        self
    }

    /// Look up a member by name.
    pub fn member(&self, name: &str) -> Option<&MemberDef> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// A closed enumeration: identity plus ordered variant names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    pub id: TypeId,
    pub variants: Vec<String>,
}

impl EnumDef {
    pub fn new(id: impl Into<TypeId>, variants: Vec<String>) -> Self {
        Self { id: id.into(), variants }
    }
}

/// A named type definition in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDef {
    Model(ModelDef),
    Enum(EnumDef),
}

impl TypeDef {
    pub fn id(&self) -> &TypeId {
        match self {
            Self::Model(model) => &model.id,
            Self::Enum(en) => &en.id,
        }
    }
}

/// Read-only access to the type universe.
///
/// The Type Introspection Provider implements this; [`TypeSnapshot`] is the
/// in-memory implementation every test and host build uses.
pub trait TypeIntrospection {
    fn type_def(&self, id: &TypeId) -> Option<&TypeDef>;

    fn model(&self, id: &TypeId) -> Option<&ModelDef> {
        match self.type_def(id) {
            Some(TypeDef::Model(model)) => Some(model),
            _ => None,
        }
    }

    fn enum_def(&self, id: &TypeId) -> Option<&EnumDef> {
        match self.type_def(id) {
            Some(TypeDef::Enum(en)) => Some(en),
            _ => None,
        }
    }
}

/// Immutable in-memory type-graph snapshot, built once per generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSnapshot {
    types: BTreeMap<TypeId, TypeDef>,
}

impl TypeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: ModelDef) -> Self {
        self.types.insert(model.id.clone(), TypeDef::Model(model));
        self
    }

    pub fn with_enum(mut self, en: EnumDef) -> Self {
        self.types.insert(en.id.clone(), TypeDef::Enum(en));
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeIntrospection for TypeSnapshot {
    fn type_def(&self, id: &TypeId) -> Option<&TypeDef> {
        self.types.get(id)
    }
}
