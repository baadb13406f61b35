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

//! The tagged-union attribute value
//!
//! Numbers are carried as invariant decimal text, never as binary floats, so a
//! value survives encode/decode without locale or precision drift. Composite
//! variants use ordered containers so equal values always serialize
//! identically.

use crate::kind::AttributeKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Error returned by the typed accessors when the value holds a different kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected attribute kind {expected}, found {found}")]
pub struct ValueAccessError {
    pub expected: AttributeKind,
    pub found: AttributeKind,
}

/// A single attribute-map value: the document-store wire value analog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// UTF-8 string payload.
    #[serde(rename = "S")]
    String(String),
    /// Number as invariant-culture decimal text.
    #[serde(rename = "N")]
    Number(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null,
    #[serde(rename = "B")]
    Binary(Vec<u8>),
    /// Nested attribute map.
    #[serde(rename = "M")]
    Map(BTreeMap<String, AttributeValue>),
    /// Heterogeneous ordered list.
    #[serde(rename = "L")]
    List(Vec<AttributeValue>),
    #[serde(rename = "SS")]
    StringSet(BTreeSet<String>),
    /// Set of numbers, each as invariant decimal text.
    #[serde(rename = "NS")]
    NumberSet(BTreeSet<String>),
    #[serde(rename = "BS")]
    BinarySet(BTreeSet<Vec<u8>>),
}

impl AttributeValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::String(_) => AttributeKind::String,
            Self::Number(_) => AttributeKind::Number,
            Self::Bool(_) => AttributeKind::Bool,
            Self::Null => AttributeKind::Null,
            Self::Binary(_) => AttributeKind::Binary,
            Self::Map(_) => AttributeKind::Map,
            Self::List(_) => AttributeKind::List,
            Self::StringSet(_) => AttributeKind::StringSet,
            Self::NumberSet(_) => AttributeKind::NumberSet,
            Self::BinarySet(_) => AttributeKind::BinarySet,
        }
    }

    /// Build a Number value from a signed integer.
    pub fn from_i64(value: i64) -> Self {
        Self::Number(value.to_string())
    }

    /// Build a Number value from a 64-bit float, using invariant formatting.
    ///
    /// Non-finite floats have no decimal-text representation; callers must
    /// reject them before encoding.
    pub fn from_f64(value: f64) -> Self {
        debug_assert!(value.is_finite(), "non-finite numbers are not representable");
        let mut text = value.to_string();
        // `to_string` on a whole float yields e.g. "3", keep it as-is; the
        // invariant contract only requires decimal text, not a forced point.
        if text == "-0" {
            text = "0".to_string();
        }
        Self::Number(text)
    }

    pub fn as_str(&self) -> Result<&str, ValueAccessError> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(other.access_error(AttributeKind::String)),
        }
    }

    pub fn as_number(&self) -> Result<&str, ValueAccessError> {
        match self {
            Self::Number(n) => Ok(n),
            other => Err(other.access_error(AttributeKind::Number)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ValueAccessError> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(other.access_error(AttributeKind::Bool)),
        }
    }

    pub fn as_binary(&self) -> Result<&[u8], ValueAccessError> {
        match self {
            Self::Binary(b) => Ok(b),
            other => Err(other.access_error(AttributeKind::Binary)),
        }
    }

    pub fn as_map(&self) -> Result<&BTreeMap<String, AttributeValue>, ValueAccessError> {
        match self {
            Self::Map(m) => Ok(m),
            other => Err(other.access_error(AttributeKind::Map)),
        }
    }

    pub fn as_list(&self) -> Result<&[AttributeValue], ValueAccessError> {
        match self {
            Self::List(l) => Ok(l),
            other => Err(other.access_error(AttributeKind::List)),
        }
    }

    pub fn as_string_set(&self) -> Result<&BTreeSet<String>, ValueAccessError> {
        match self {
            Self::StringSet(s) => Ok(s),
            other => Err(other.access_error(AttributeKind::StringSet)),
        }
    }

    pub fn as_number_set(&self) -> Result<&BTreeSet<String>, ValueAccessError> {
        match self {
            Self::NumberSet(s) => Ok(s),
            other => Err(other.access_error(AttributeKind::NumberSet)),
        }
    }

    /// Whether this value is the Null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn access_error(&self, expected: AttributeKind) -> ValueAccessError {
        ValueAccessError { expected, found: self.kind() }
    }
}
