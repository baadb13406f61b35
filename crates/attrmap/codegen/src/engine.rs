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

//! Generation pass facade
//!
//! One pass = one immutable snapshot + one registry pre-pass + one full
//! resolution per mapper declaration. The pass is a synchronous, CPU-bound
//! pure function of its inputs: identical inputs yield identical plans and
//! identical diagnostics, which is what lets the host skip recomputation for
//! unchanged declarations. A mapper-fatal failure affects only its own mapper;
//! siblings resolve independently.

use crate::analysis::{CancelFlag, Cancelled, resolver};
use crate::diagnostics::Diagnostics;
use crate::registry::{MapperDeclaration, MapperRegistry};
use crate::strategy::MapperPlan;
use crate::typegraph::{TypeId, TypeSnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome for one mapper: its resolved plan, or the aggregated diagnostics
/// that blocked emission. Emission is all-or-nothing per mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperOutcome {
    pub mapper: String,
    pub model: TypeId,
    pub result: Result<MapperPlan, Diagnostics>,
}

impl MapperOutcome {
    pub fn plan(&self) -> Option<&MapperPlan> {
        self.result.as_ref().ok()
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.result.as_ref().err()
    }
}

/// All outcomes of one generation pass, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub mappers: Vec<MapperOutcome>,
}

impl GenerationOutput {
    /// Plans eligible for emission.
    pub fn plans(&self) -> impl Iterator<Item = &MapperPlan> {
        self.mappers.iter().filter_map(MapperOutcome::plan)
    }

    /// Whether any mapper was blocked by diagnostics.
    pub fn has_failures(&self) -> bool {
        self.mappers.iter().any(|m| m.result.is_err())
    }
}

/// The engine entry point for one generation pass over a build unit.
pub struct GenerationPass<'a> {
    snapshot: &'a TypeSnapshot,
    cancel: CancelFlag,
}

impl<'a> GenerationPass<'a> {
    pub fn new(snapshot: &'a TypeSnapshot) -> Self {
        Self { snapshot, cancel: CancelFlag::new() }
    }

    /// Attach a cancellation flag shared with the host build system.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the pass: one shallow registry scan, then a full resolution per
    /// declaration. Declarations are independent; only the shared immutable
    /// snapshot and registry are read.
    pub fn run(&self, declarations: &[MapperDeclaration]) -> Result<GenerationOutput, Cancelled> {
        let registry = MapperRegistry::build(declarations);
        debug!(mappers = declarations.len(), registered = registry.len(), "generation pass started");

        let mut mappers = Vec::with_capacity(declarations.len());
        for decl in declarations {
            self.cancel_check()?;
            let result = resolver::resolve_mapper(decl, self.snapshot, &registry, self.cancel.clone())?;
            mappers.push(MapperOutcome {
                mapper: decl.name.clone(),
                model: decl.model.clone(),
                result,
            });
        }

        let output = GenerationOutput { mappers };
        debug!(
            succeeded = output.plans().count(),
            failed = output.mappers.len() - output.plans().count(),
            "generation pass finished"
        );
        Ok(output)
    }

    fn cancel_check(&self) -> Result<(), Cancelled> {
        if self.cancel.is_cancelled() { Err(Cancelled) } else { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typegraph::{MemberDef, ModelDef, ScalarType, TypeRef};

    fn snapshot() -> TypeSnapshot {
        TypeSnapshot::new()
            .with_model(
                ModelDef::new("Person")
                    .with_member(MemberDef::new("name", ScalarType::Text.into()))
                    .with_member(MemberDef::new("home", TypeRef::model("Address"))),
            )
            .with_model(
                ModelDef::new("Address")
                    .with_member(MemberDef::new("line1", ScalarType::Text.into())),
            )
            .with_model(
                ModelDef::new("Broken")
                    .with_member(MemberDef::new("lookup", TypeRef::map(ScalarType::Int64.into(), ScalarType::Text.into()))),
            )
    }

    #[test]
    fn failing_mapper_leaves_siblings_unaffected() {
        let snapshot = snapshot();
        let declarations = vec![
            MapperDeclaration::new("PersonMapper", "Person"),
            MapperDeclaration::new("BrokenMapper", "Broken"),
        ];
        let output = GenerationPass::new(&snapshot).run(&declarations).unwrap();

        assert!(output.has_failures());
        assert_eq!(output.plans().count(), 1);
        assert_eq!(output.mappers[0].mapper, "PersonMapper");
        assert!(output.mappers[0].plan().is_some());
        assert!(output.mappers[1].diagnostics().is_some());
    }

    #[test]
    fn identical_inputs_yield_identical_outputs() {
        let snapshot = snapshot();
        let declarations = vec![
            MapperDeclaration::new("PersonMapper", "Person"),
            MapperDeclaration::new("AddressMapper", "Address"),
        ];
        let pass = GenerationPass::new(&snapshot);
        let first = pass.run(&declarations).unwrap();
        let second = pass.run(&declarations).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn registered_sibling_is_referenced_not_inlined() {
        let snapshot = snapshot();
        let declarations = vec![
            MapperDeclaration::new("PersonMapper", "Person"),
            MapperDeclaration::new("AddressMapper", "Address"),
        ];
        let output = GenerationPass::new(&snapshot).run(&declarations).unwrap();
        let person = output.mappers[0].plan().unwrap();
        let home = person.members.iter().find(|m| m.member == "home").unwrap();
        let nested = home.strategy.nested.as_ref().unwrap();
        assert!(matches!(nested, crate::strategy::NestedMappingInfo::Reference(r) if r.mapper == "AddressMapper"));
    }

    #[test]
    fn cancelled_pass_aborts_immediately() {
        let snapshot = snapshot();
        let cancel = CancelFlag::new();
        cancel.cancel();
        let pass = GenerationPass::new(&snapshot).with_cancel(cancel);
        let result = pass.run(&[MapperDeclaration::new("PersonMapper", "Person")]);
        assert_eq!(result.unwrap_err(), Cancelled);
    }
}
