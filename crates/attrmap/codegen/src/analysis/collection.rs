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

//! Collection type analysis
//!
//! Classifies a declared type as List-like, Map-like, or Set-like by
//! structural shape and derives the default attribute kind. Rejection rules:
//! map keys must be string-like, set elements must be primitive scalars, and
//! an element may not itself be a raw collection.

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticResult, MemberPath};
use crate::strategy::{CollectionCategory, CollectionInfo};
use crate::typegraph::TypeRef;
use attrmap_common::AttributeKind;

/// Classify a declared type, returning `None` for non-collection shapes.
pub fn classify(ty: &TypeRef, path: &MemberPath) -> DiagnosticResult<Option<CollectionInfo>> {
    let shape_error = |detail: String| Diagnostic::at(DiagnosticCode::InvalidCollectionShape, path.clone(), vec![detail]);

    let info = match ty {
        TypeRef::List(element) | TypeRef::Array(element) => {
            validate_element(element, path)?;
            CollectionInfo {
                category: CollectionCategory::List,
                element: (**element).clone(),
                key: None,
                is_array: matches!(ty, TypeRef::Array(_)),
                target_kind: AttributeKind::List,
            }
        }
        TypeRef::Map { key, value } => {
            match &**key {
                TypeRef::Scalar(scalar) if scalar.is_string_like() => {}
                other => {
                    return Err(shape_error(format!("map key type `{}` is not string-like", other.display_name())));
                }
            }
            validate_element(value, path)?;
            CollectionInfo {
                category: CollectionCategory::Map,
                element: (**value).clone(),
                key: Some((**key).clone()),
                is_array: false,
                target_kind: AttributeKind::Map,
            }
        }
        TypeRef::Set(element) => {
            let scalar = match &**element {
                TypeRef::Scalar(scalar) => *scalar,
                TypeRef::Model(id) => {
                    return Err(shape_error(format!("set element `{id}` is a nested model type; sets hold primitive scalars only")));
                }
                other => {
                    return Err(shape_error(format!("set element `{}` is not a primitive scalar", other.display_name())));
                }
            };
            CollectionInfo {
                category: CollectionCategory::Set,
                element: (**element).clone(),
                key: None,
                is_array: false,
                target_kind: set_kind_for(scalar.attribute_kind()),
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(info))
}

/// An element may be anything except a raw collection; a nested model element
/// is handled recursively by nested-object analysis.
fn validate_element(element: &TypeRef, path: &MemberPath) -> DiagnosticResult<()> {
    if element.is_collection() {
        return Err(Diagnostic::at(
            DiagnosticCode::InvalidCollectionShape,
            path.clone(),
            vec![format!("element type `{}` is itself a collection", element.display_name())],
        ));
    }
    Ok(())
}

/// Default set kind from the element's scalar family.
fn set_kind_for(element_kind: AttributeKind) -> AttributeKind {
    match element_kind {
        AttributeKind::String => AttributeKind::StringSet,
        AttributeKind::Number => AttributeKind::NumberSet,
        AttributeKind::Binary => AttributeKind::BinarySet,
        // No homogeneous set kind exists for this element; fall back to List.
        _ => AttributeKind::List,
    }
}
