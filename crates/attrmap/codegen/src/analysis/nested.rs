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

//! Nested object type analysis
//!
//! A type that is neither scalar nor collection is either delegated to a
//! registered mapper covering the needed directions, or expanded inline by
//! recursively analyzing its own members. Every descent is guarded by the
//! ancestor chain: a revisit of any type currently being expanded is
//! Cycle-Detected, whether the cycle is direct, indirect, or reachable only
//! through a collection element type.

use super::context::{AnalysisContext, StepResult};
use super::{member, resolver};
use crate::config::{MapperOptions, OverrideMap};
use crate::diagnostics::{Diagnostic, DiagnosticCode, MemberPath};
use crate::strategy::{DirectionSet, MemberStrategy, NestedMappingInfo};
use crate::typegraph::{ModelDef, TypeId, TypeIntrospection};
use tracing::trace;

/// Resolve how a nested model type converts.
///
/// `overrides` must be rooted at the nested model (dot-path prefixes already
/// stripped by the caller).
pub fn resolve_nested(
    ctx: &mut AnalysisContext<'_>,
    options: &MapperOptions,
    overrides: &OverrideMap,
    id: &TypeId,
    needs: DirectionSet,
    path: &MemberPath,
) -> StepResult<NestedMappingInfo> {
    ctx.check_cancelled()?;

    if ctx.ancestors.contains(id) {
        return Ok(Err(Diagnostic::at(
            DiagnosticCode::CycleDetected,
            path.clone(),
            vec![id.to_string(), ctx.ancestors.render()],
        )));
    }

    if let Some(reference) = ctx.registry.lookup(id) {
        if reference.covers(needs.serialize, needs.deserialize) {
            trace!(model = %id, mapper = %reference.mapper, "nested type delegated to registered mapper");
            return Ok(Ok(NestedMappingInfo::Reference(reference.clone())));
        }
    }

    let snapshot = ctx.snapshot;
    let Some(model) = snapshot.model(id) else {
        return Ok(Err(Diagnostic::at(DiagnosticCode::UnsupportedType, path.clone(), vec![id.to_string()])));
    };

    trace!(model = %id, depth = ctx.ancestors.depth(), "expanding nested type inline");
    ctx.ancestors.push(id.clone());
    let result = resolve_inline(ctx, options, overrides, model, needs, path);
    ctx.ancestors.pop();

    match result? {
        Ok(members) => Ok(Ok(NestedMappingInfo::Inline(members))),
        Err(diagnostic) => Ok(Err(diagnostic)),
    }
}

/// Build the inline member strategies for a nested model. The first structural
/// diagnostic of any sub-member fails the whole nested member.
fn resolve_inline(
    ctx: &mut AnalysisContext<'_>,
    options: &MapperOptions,
    overrides: &OverrideMap,
    model: &ModelDef,
    needs: DirectionSet,
    path: &MemberPath,
) -> StepResult<Vec<MemberStrategy>> {
    let mut members = Vec::new();
    for def in &model.members {
        ctx.check_cancelled()?;
        let member_path = path.child(&def.name);
        let config = overrides.get(&def.name).cloned().unwrap_or_default();

        let analyzed = match member::analyze_member(def, config, needs, &member_path) {
            Ok(Some(analyzed)) => analyzed,
            Ok(None) => continue,
            Err(diagnostic) => return Ok(Err(diagnostic)),
        };
        match resolver::resolve_member(ctx, options, &analyzed, overrides, &member_path)? {
            Ok(strategy) => members.push(MemberStrategy {
                member: def.name.clone(),
                attribute_name: analyzed.attribute_name,
                strategy,
            }),
            Err(diagnostic) => return Ok(Err(diagnostic)),
        }
    }
    Ok(Ok(members))
}
