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

//! Build-time mapping-plan resolution for model ↔ attribute-map conversion
//!
//! Given an immutable type-graph snapshot and a set of mapper declarations,
//! this crate derives an unambiguous, bidirectional mapping plan per mapper:
//! for every member, recursively through nested models and collections: the
//! attribute kind, conversion family, nullability and omission handling, and
//! any naming/format/kind overrides. Cyclic type graphs are rejected with a
//! diagnostic instead of looping.
//!
//! # Example
//!
//! ```rust
//! use attrmap_codegen::engine::GenerationPass;
//! use attrmap_codegen::registry::MapperDeclaration;
//! use attrmap_codegen::typegraph::{MemberDef, ModelDef, ScalarType, TypeSnapshot};
//!
//! let snapshot = TypeSnapshot::new().with_model(
//!     ModelDef::new("Person")
//!         .with_member(MemberDef::new("name", ScalarType::Text.into()))
//!         .with_member(MemberDef::new("age", ScalarType::Int32.into())),
//! );
//! let declarations = vec![MapperDeclaration::new("PersonMapper", "Person")];
//!
//! let output = GenerationPass::new(&snapshot).run(&declarations).unwrap();
//! assert_eq!(output.plans().count(), 1);
//! ```

pub mod analysis;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod engine;
pub mod registry;
pub mod strategy;
pub mod typegraph;

// Re-export main types for convenience
pub use analysis::{CancelFlag, Cancelled};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticResult, Diagnostics, MemberPath, Severity};
pub use engine::{GenerationOutput, GenerationPass, MapperOutcome};
pub use registry::{MapperDeclaration, MapperReference, MapperRegistry};
pub use strategy::{
    CollectionCategory, CollectionInfo, ConversionFamily, DirectionSet, MapperPlan, MemberStrategy,
    NestedMappingInfo, TypeMappingStrategy,
};
pub use typegraph::{MemberDef, ModelDef, ScalarType, TypeId, TypeRef, TypeSnapshot};

pub use attrmap_common::{AttributeKind, AttributeValue};
