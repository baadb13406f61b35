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

//! Mapper declarations and the registry pre-pass
//!
//! The registry is a shallow scan over every mapper declaration in the build
//! unit, recording which mapper claims which model type and which directions it
//! implements. No member resolution happens here; the snapshot is built once
//! and read by every full resolution pass, so inline-vs-reference decisions do
//! not depend on declaration order.

use crate::config::{MapperOptions, MemberOverride, OverrideMap};
use crate::typegraph::TypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One mapper declaration: the per-model-type unit implementing the two
/// conversion directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperDeclaration {
    pub name: String,
    pub model: TypeId,
    pub supports_serialize: bool,
    pub supports_deserialize: bool,
    pub options: MapperOptions,
    /// Per-member overrides keyed by dot path from the root model.
    pub overrides: OverrideMap,
}

impl MapperDeclaration {
    /// A bidirectional mapper with default options.
    pub fn new(name: impl Into<String>, model: impl Into<TypeId>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            supports_serialize: true,
            supports_deserialize: true,
            options: MapperOptions::default(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn serialize_only(mut self) -> Self {
        self.supports_deserialize = false;
        self
    }

    pub fn deserialize_only(mut self) -> Self {
        self.supports_serialize = false;
        self
    }

    pub fn with_options(mut self, options: MapperOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_override(mut self, path: impl Into<String>, member_override: MemberOverride) -> Self {
        self.overrides.insert(path.into(), member_override);
        self
    }
}

/// Registry entry: which mapper claims a model type and what it implements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperReference {
    pub mapper: String,
    pub model: TypeId,
    pub supports_serialize: bool,
    pub supports_deserialize: bool,
}

impl MapperReference {
    /// Whether this mapper implements every direction the caller needs.
    pub fn covers(&self, needs_serialize: bool, needs_deserialize: bool) -> bool {
        (!needs_serialize || self.supports_serialize) && (!needs_deserialize || self.supports_deserialize)
    }
}

/// Immutable snapshot mapping model-type identity to its claiming mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperRegistry {
    entries: BTreeMap<TypeId, MapperReference>,
}

impl MapperRegistry {
    /// Shallow pre-pass over all declarations in the build unit.
    ///
    /// When two mappers claim the same model type the lexicographically first
    /// mapper name wins, so the snapshot is identical for any declaration
    /// order.
    pub fn build(declarations: &[MapperDeclaration]) -> Self {
        let mut entries: BTreeMap<TypeId, MapperReference> = BTreeMap::new();
        for decl in declarations {
            let candidate = MapperReference {
                mapper: decl.name.clone(),
                model: decl.model.clone(),
                supports_serialize: decl.supports_serialize,
                supports_deserialize: decl.supports_deserialize,
            };
            match entries.get(&decl.model) {
                Some(existing) if existing.mapper <= candidate.mapper => {}
                _ => {
                    entries.insert(decl.model.clone(), candidate);
                }
            }
        }
        Self { entries }
    }

    pub fn lookup(&self, model: &TypeId) -> Option<&MapperReference> {
        self.entries.get(model)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
