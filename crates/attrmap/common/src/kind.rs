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

//! The closed attribute-kind set

use serde::{Deserialize, Serialize};

/// The closed set of attribute kinds a member can map to.
///
/// Scalar members resolve only to the scalar kinds, collection-shaped members
/// only to the composite kinds. That partition is an invariant the resolver
/// enforces when validating explicit kind overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    String,
    Number,
    Bool,
    Null,
    Binary,
    Map,
    List,
    StringSet,
    NumberSet,
    BinarySet,
}

impl AttributeKind {
    /// Whether this kind holds a single scalar payload.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Bool | Self::Null | Self::Binary)
    }

    /// Whether this kind holds a composite payload (list, map, or set).
    pub fn is_collection(&self) -> bool {
        !self.is_scalar()
    }

    /// Whether this kind is one of the three homogeneous set kinds.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::StringSet | Self::NumberSet | Self::BinarySet)
    }

    /// Wire tag for this kind, matching common document-store formats.
    pub fn wire_tag(&self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::Bool => "BOOL",
            Self::Null => "NULL",
            Self::Binary => "B",
            Self::Map => "M",
            Self::List => "L",
            Self::StringSet => "SS",
            Self::NumberSet => "NS",
            Self::BinarySet => "BS",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AttributeKind; 10] = [
        AttributeKind::String,
        AttributeKind::Number,
        AttributeKind::Bool,
        AttributeKind::Null,
        AttributeKind::Binary,
        AttributeKind::Map,
        AttributeKind::List,
        AttributeKind::StringSet,
        AttributeKind::NumberSet,
        AttributeKind::BinarySet,
    ];

    #[test]
    fn scalar_collection_partition_is_total() {
        for kind in ALL {
            assert_ne!(kind.is_scalar(), kind.is_collection(), "{kind} must be exactly one of scalar/collection");
        }
    }

    #[test]
    fn set_kinds_are_collections() {
        for kind in ALL {
            if kind.is_set() {
                assert!(kind.is_collection());
            }
        }
    }

    #[test]
    fn wire_tags_are_unique() {
        let mut tags: Vec<_> = ALL.iter().map(|k| k.wire_tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), ALL.len());
    }
}
