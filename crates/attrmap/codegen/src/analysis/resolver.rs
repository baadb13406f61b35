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

//! Type-mapping strategy resolution
//!
//! The orchestrator. Each member runs through a linear decision chain:
//! ignore-check → collection → nested → scalar → override-validate →
//! format-merge → emit. Per-member failures are collected, never thrown; only
//! a mapper-fatal diagnostic stops the member loop, and it stops it for that
//! mapper alone.

use super::context::{AnalysisContext, CancelFlag, Cancelled, StepResult};
use super::member::{self, AnalyzedMember};
use super::{collection, nested};
use crate::config::{MapperOptions, OverrideMap};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticResult, Diagnostics, MemberPath};
use crate::registry::{MapperDeclaration, MapperRegistry};
use crate::strategy::{
    CollectionInfo, ConversionFamily, DirectionSet, MapperPlan, MemberStrategy, TypeMappingStrategy,
};
use crate::typegraph::{ScalarType, TypeIntrospection, TypeRef, TypeSnapshot};
use tracing::debug;

/// Resolve the full plan for one mapper declaration.
///
/// The outer error is cancellation; the inner result is either the plan or the
/// aggregated diagnostics for this mapper. Emission is all-or-nothing: any
/// Error-severity diagnostic means no plan.
pub fn resolve_mapper(
    decl: &MapperDeclaration,
    snapshot: &TypeSnapshot,
    registry: &MapperRegistry,
    cancel: CancelFlag,
) -> Result<Result<MapperPlan, Diagnostics>, Cancelled> {
    let mut diagnostics = Diagnostics::new();

    if !decl.supports_serialize && !decl.supports_deserialize {
        diagnostics.push(Diagnostic::mapper_level(DiagnosticCode::NoMappingMethodsFound, vec![decl.name.clone()]));
        return Ok(Err(diagnostics));
    }
    let Some(model) = snapshot.model(&decl.model) else {
        diagnostics.push(Diagnostic::mapper_level(DiagnosticCode::UnsupportedType, vec![decl.model.to_string()]));
        return Ok(Err(diagnostics));
    };

    for diagnostic in member::validate_override_paths(snapshot, model, &decl.overrides) {
        diagnostics.push(diagnostic);
    }

    let mapper_directions = DirectionSet {
        serialize: decl.supports_serialize,
        deserialize: decl.supports_deserialize,
    };
    let mut ctx = AnalysisContext::new(snapshot, registry, cancel, decl.model.clone());
    let mut members = Vec::new();

    for def in &model.members {
        ctx.check_cancelled()?;
        let path = MemberPath::root().child(&def.name);
        let config = decl.overrides.get(&def.name).cloned().unwrap_or_default();

        let analyzed = match member::analyze_member(def, config, mapper_directions, &path) {
            Ok(Some(analyzed)) => analyzed,
            Ok(None) => continue,
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                continue;
            }
        };
        match resolve_member(&mut ctx, &decl.options, &analyzed, &decl.overrides, &path)? {
            Ok(strategy) => members.push(MemberStrategy {
                member: def.name.clone(),
                attribute_name: analyzed.attribute_name,
                strategy,
            }),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    debug!(
        mapper = %decl.name,
        members = members.len(),
        diagnostics = diagnostics.len(),
        "mapper resolution finished"
    );

    if diagnostics.has_errors() {
        Ok(Err(diagnostics))
    } else {
        Ok(Ok(MapperPlan {
            mapper: decl.name.clone(),
            model: decl.model.clone(),
            directions: mapper_directions,
            hooks: decl.options.hooks.clone(),
            members,
        }))
    }
}

/// Resolve the strategy for one analyzed member.
///
/// `overrides` is rooted at the model the member belongs to; deeper scoping
/// happens here before any nested descent.
pub fn resolve_member(
    ctx: &mut AnalysisContext<'_>,
    options: &MapperOptions,
    analyzed: &AnalyzedMember<'_>,
    overrides: &OverrideMap,
    path: &MemberPath,
) -> StepResult<TypeMappingStrategy> {
    ctx.check_cancelled()?;
    let scoped = member::scoped_overrides(overrides, &analyzed.def.name);

    // Collection shapes take priority over flat nested objects.
    let classified = match collection::classify(&analyzed.def.ty, path) {
        Ok(classified) => classified,
        Err(diagnostic) => return Ok(Err(diagnostic)),
    };

    let mut strategy = if let Some(info) = classified {
        match resolve_collection(ctx, options, &scoped, info, analyzed.config.format.as_deref(), analyzed.directions, path)? {
            Ok(strategy) => strategy,
            Err(diagnostic) => return Ok(Err(diagnostic)),
        }
    } else {
        match resolve_flat(ctx, options, &scoped, &analyzed.def.ty, analyzed.directions, path)? {
            Ok(strategy) => strategy,
            Err(diagnostic) => return Ok(Err(diagnostic)),
        }
    };

    strategy.nullable = analyzed.def.is_nullable();
    strategy.required = analyzed.config.required.unwrap_or(false);
    strategy.directions = analyzed.directions;
    strategy.omission = analyzed.config.omission.unwrap_or(options.omission);
    strategy.converter = analyzed.config.converter.clone();

    if let Some(kind) = analyzed.config.kind {
        if let Err(diagnostic) = validate_kind_override(strategy.family, kind, path) {
            return Ok(Err(diagnostic));
        }
        strategy.kind_override = Some(kind);
    }

    merge_format(&mut strategy, analyzed.config.format.as_deref(), options);
    Ok(Ok(strategy))
}

/// A collection member: resolve the element strategy and wrap it.
///
/// A member-level format override applies to the element, since the wrapper
/// itself has no format of its own.
fn resolve_collection(
    ctx: &mut AnalysisContext<'_>,
    options: &MapperOptions,
    scoped: &OverrideMap,
    info: CollectionInfo,
    member_format: Option<&str>,
    needs: DirectionSet,
    path: &MemberPath,
) -> StepResult<TypeMappingStrategy> {
    let element_ty = info.element.clone();
    let mut element = match resolve_flat(ctx, options, scoped, &element_ty, needs, path)? {
        Ok(element) => element,
        Err(diagnostic) => return Ok(Err(diagnostic)),
    };
    merge_format(&mut element, member_format, options);

    let mut strategy = TypeMappingStrategy::for_family(ConversionFamily::Collection(info.category));
    strategy.element = Some(Box::new(element));
    strategy.collection = Some(info);
    Ok(Ok(strategy))
}

/// A non-collection type: nested model, enumeration, or a closed scalar
/// family.
fn resolve_flat(
    ctx: &mut AnalysisContext<'_>,
    options: &MapperOptions,
    scoped: &OverrideMap,
    ty: &TypeRef,
    needs: DirectionSet,
    path: &MemberPath,
) -> StepResult<TypeMappingStrategy> {
    match ty {
        TypeRef::Scalar(scalar) => {
            let mut strategy = TypeMappingStrategy::for_family(family_for_scalar(*scalar));
            merge_format(&mut strategy, None, options);
            Ok(Ok(strategy))
        }
        TypeRef::Enum(id) => {
            let snapshot = ctx.snapshot;
            if snapshot.enum_def(id).is_none() {
                return Ok(Err(Diagnostic::at(DiagnosticCode::UnsupportedType, path.clone(), vec![id.to_string()])));
            }
            let mut strategy = TypeMappingStrategy::for_family(ConversionFamily::Enumeration);
            merge_format(&mut strategy, None, options);
            Ok(Ok(strategy))
        }
        TypeRef::Model(id) => match nested::resolve_nested(ctx, options, scoped, id, needs, path)? {
            Ok(info) => {
                let mut strategy = TypeMappingStrategy::for_family(ConversionFamily::Nested);
                strategy.nested = Some(info);
                Ok(Ok(strategy))
            }
            Err(diagnostic) => Ok(Err(diagnostic)),
        },
        // Collection shapes were classified before this point; reaching one
        // here means a collection element slipped through shape validation.
        other => Ok(Err(Diagnostic::at(
            DiagnosticCode::UnsupportedType,
            path.clone(),
            vec![other.display_name()],
        ))),
    }
}

fn family_for_scalar(scalar: ScalarType) -> ConversionFamily {
    match scalar {
        ScalarType::Text => ConversionFamily::Text,
        ScalarType::Boolean => ConversionFamily::Boolean,
        ScalarType::Int32 => ConversionFamily::Int32,
        ScalarType::Int64 => ConversionFamily::Int64,
        ScalarType::Float32 => ConversionFamily::Float32,
        ScalarType::Float64 => ConversionFamily::Float64,
        ScalarType::Decimal => ConversionFamily::Decimal,
        ScalarType::DateTime => ConversionFamily::DateTime,
        ScalarType::OffsetDateTime => ConversionFamily::OffsetDateTime,
        ScalarType::Duration => ConversionFamily::Duration,
        ScalarType::Identifier => ConversionFamily::Identifier,
        ScalarType::Binary => ConversionFamily::Binary,
    }
}

/// An explicit kind override is compatible only when the resolved category is
/// scalar and the target kind is itself scalar (an integer stored as text is
/// legal; a list stored as a string is not).
fn validate_kind_override(
    family: ConversionFamily,
    kind: attrmap_common::AttributeKind,
    path: &MemberPath,
) -> DiagnosticResult<()> {
    if family.is_scalar() && kind.is_scalar() {
        return Ok(());
    }
    Err(Diagnostic::at(
        DiagnosticCode::IncompatibleKindOverride,
        path.clone(),
        vec![kind.to_string(), family.to_string()],
    ))
}

/// Member-level format supersedes the mapper-level default; families that do
/// not support formatting ignore both silently.
fn merge_format(strategy: &mut TypeMappingStrategy, member_format: Option<&str>, options: &MapperOptions) {
    if !strategy.family.supports_format() {
        return;
    }
    let default = match strategy.family {
        ConversionFamily::DateTime => options.formats.date_time.as_deref(),
        ConversionFamily::OffsetDateTime => options.formats.offset_date_time.as_deref(),
        ConversionFamily::Duration => options.formats.duration.as_deref(),
        ConversionFamily::Identifier => options.formats.identifier.as_deref(),
        ConversionFamily::Enumeration => options.formats.enumeration.as_deref(),
        _ => None,
    };
    let resolved = member_format.or(default).map(str::to_string);
    strategy.serialize_args.format = resolved.clone();
    strategy.deserialize_args.format = resolved;
}
