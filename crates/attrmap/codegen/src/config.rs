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

//! Mapper-level options and per-member overrides
//!
//! Configuration is plain data handed to the resolver, never introspected at
//! runtime. Member overrides are keyed by dot path so nested members can be
//! addressed from the root mapper declaration.

use attrmap_common::AttributeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One of the two fixed mapping directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Model → attribute map.
    Serialize,
    /// Attribute map → model.
    Deserialize,
}

/// Direction-specific ignore configuration. Ignoring may be asymmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ignore {
    #[default]
    None,
    Serialize,
    Deserialize,
    Both,
}

impl Ignore {
    pub fn covers(&self, direction: Direction) -> bool {
        match self {
            Self::None => false,
            Self::Both => true,
            Self::Serialize => direction == Direction::Serialize,
            Self::Deserialize => direction == Direction::Deserialize,
        }
    }
}

/// How an absent optional value is represented on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OmissionPolicy {
    /// Emit a Null attribute for the key.
    #[default]
    WriteNull,
    /// Leave the key out of the attribute map entirely.
    Omit,
}

/// Reference to an external converter type implementing both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterRef(pub String);

/// A pair of user-supplied conversion methods on the mapper itself.
///
/// Both halves are required together; supplying only one is a configuration
/// conflict.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodPair {
    pub serialize_with: Option<String>,
    pub deserialize_with: Option<String>,
}

impl MethodPair {
    pub fn is_empty(&self) -> bool {
        self.serialize_with.is_none() && self.deserialize_with.is_none()
    }

    pub fn is_partial(&self) -> bool {
        self.serialize_with.is_some() != self.deserialize_with.is_some()
    }

    pub fn covers_both(&self) -> bool {
        self.serialize_with.is_some() && self.deserialize_with.is_some()
    }

    pub fn half_for(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Serialize => self.serialize_with.as_deref(),
            Direction::Deserialize => self.deserialize_with.as_deref(),
        }
    }
}

/// Field-level configuration overrides, merged over mapper-level defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberOverride {
    /// Explicit attribute key; member name otherwise.
    pub attribute_name: Option<String>,
    /// Missing-attribute handling on deserialize.
    pub required: Option<bool>,
    /// Explicit attribute kind, validated against the resolved category.
    pub kind: Option<AttributeKind>,
    pub omission: Option<OmissionPolicy>,
    /// Format string for families that support formatting.
    pub format: Option<String>,
    pub converter: Option<ConverterRef>,
    #[serde(default)]
    pub methods: MethodPair,
    #[serde(default)]
    pub ignore: Ignore,
}

impl MemberOverride {
    /// Whether anything other than the ignore directive is configured.
    pub fn has_configuration(&self) -> bool {
        self.attribute_name.is_some()
            || self.required.is_some()
            || self.kind.is_some()
            || self.omission.is_some()
            || self.format.is_some()
            || self.converter.is_some()
            || !self.methods.is_empty()
    }
}

/// Mapper-level format defaults per formattable family.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatDefaults {
    pub date_time: Option<String>,
    pub offset_date_time: Option<String>,
    pub duration: Option<String>,
    pub identifier: Option<String>,
    pub enumeration: Option<String>,
}

/// Optional generated-code hook references. Absence is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hooks {
    /// Called on the model before serialization.
    pub before_serialize: Option<String>,
    /// Called on the freshly built model after deserialization.
    pub after_deserialize: Option<String>,
}

/// Mapper-level defaults applied to every member unless overridden.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapperOptions {
    pub formats: FormatDefaults,
    pub omission: OmissionPolicy,
    pub hooks: Hooks,
}

/// Per-member overrides keyed by dot path from the root model.
pub type OverrideMap = BTreeMap<String, MemberOverride>;
