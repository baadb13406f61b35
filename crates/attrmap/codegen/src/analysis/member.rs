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

//! Member/property analysis
//!
//! Enumerates eligible members, merges mapper-level defaults with per-member
//! overrides, validates dot-path override targets, and rejects conflicting
//! configuration before any strategy resolution runs.

use crate::config::{Direction, Ignore, MemberOverride, OverrideMap};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticResult, MemberPath};
use crate::strategy::DirectionSet;
use crate::typegraph::{MemberDef, ModelDef, TypeIntrospection, TypeRef, TypeSnapshot};
use std::collections::BTreeMap;

/// A member with its merged configuration, ready for strategy resolution.
#[derive(Debug)]
pub struct AnalyzedMember<'a> {
    pub def: &'a MemberDef,
    pub config: MemberOverride,
    /// Directions this member actually participates in.
    pub directions: DirectionSet,
    pub attribute_name: String,
}

/// Analyze one member against the directions its mapper implements.
///
/// Returns `Ok(None)` when the member is skipped entirely: it participates in
/// neither direction, or a full custom method pair covers both directions and
/// the emitter just calls the user's methods.
pub fn analyze_member<'a>(
    def: &'a MemberDef,
    config: MemberOverride,
    mapper_directions: DirectionSet,
    path: &MemberPath,
) -> DiagnosticResult<Option<AnalyzedMember<'a>>> {
    validate_configuration(&config, path)?;

    let directions = DirectionSet {
        serialize: mapper_directions.serialize && def.has_getter && !config.ignore.covers(Direction::Serialize),
        deserialize: mapper_directions.deserialize && def.has_setter && !config.ignore.covers(Direction::Deserialize),
    };
    if !directions.any() || config.methods.covers_both() {
        return Ok(None);
    }

    let attribute_name = config.attribute_name.clone().unwrap_or_else(|| def.name.clone());
    Ok(Some(AnalyzedMember { def, config, directions, attribute_name }))
}

fn validate_configuration(config: &MemberOverride, path: &MemberPath) -> DiagnosticResult<()> {
    let conflict = |detail: &str| {
        Diagnostic::at(DiagnosticCode::ConflictingConfiguration, path.clone(), vec![detail.to_string()])
    };

    if config.methods.is_partial() {
        return Err(conflict("only one half of the custom method pair is supplied"));
    }
    if config.converter.is_some() && !config.methods.is_empty() {
        return Err(conflict("a converter reference and a custom method pair are both supplied"));
    }
    match config.ignore {
        Ignore::Both if config.has_configuration() => {
            Err(conflict("member is ignored in both directions but carries other configuration"))
        }
        Ignore::Serialize if config.methods.serialize_with.is_some() => {
            Err(conflict("member is ignored for serialization but configures a serialize method"))
        }
        Ignore::Deserialize if config.methods.deserialize_with.is_some() => {
            Err(conflict("member is ignored for deserialization but configures a deserialize method"))
        }
        _ => Ok(()),
    }
}

/// Validate every override dot path against the type graph.
///
/// A path is valid when each segment names a member of the model reached so
/// far; segments step through nested model types, including the element type
/// of a collection of models.
pub fn validate_override_paths(snapshot: &TypeSnapshot, root: &ModelDef, overrides: &OverrideMap) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for path in overrides.keys() {
        if let Err(diagnostic) = validate_path(snapshot, root, path) {
            diagnostics.push(diagnostic);
        }
    }
    diagnostics
}

fn validate_path(snapshot: &TypeSnapshot, root: &ModelDef, path: &str) -> DiagnosticResult<()> {
    let invalid = |segment: &str| {
        Diagnostic::at(
            DiagnosticCode::InvalidDotPath,
            MemberPath::parse(path),
            vec![path.to_string(), segment.to_string()],
        )
    };

    let mut model = root;
    let segments: Vec<&str> = path.split('.').collect();
    for (index, segment) in segments.iter().enumerate() {
        let member = model.member(segment).ok_or_else(|| invalid(segment))?;
        if index + 1 == segments.len() {
            return Ok(());
        }
        // More segments follow; the member must lead to another model.
        match nested_model_of(&member.ty) {
            Some(id) => match snapshot.model(id) {
                Some(next) => model = next,
                None => return Err(invalid(segments[index + 1])),
            },
            None => return Err(invalid(segments[index + 1])),
        }
    }
    Ok(())
}

/// The model type a member's declared type leads dot-path traversal into.
fn nested_model_of(ty: &TypeRef) -> Option<&crate::typegraph::TypeId> {
    match ty {
        TypeRef::Model(id) => Some(id),
        TypeRef::List(el) | TypeRef::Array(el) | TypeRef::Set(el) => nested_model_of(el),
        TypeRef::Map { value, .. } => nested_model_of(value),
        _ => None,
    }
}

/// Overrides addressed one level below the given member: strips the leading
/// `member.` segment so nested analysis sees paths rooted at the nested model.
pub fn scoped_overrides(overrides: &OverrideMap, member: &str) -> OverrideMap {
    let prefix = format!("{member}.");
    let mut scoped = BTreeMap::new();
    for (path, config) in overrides {
        if let Some(rest) = path.strip_prefix(&prefix) {
            scoped.insert(rest.to_string(), config.clone());
        }
    }
    scoped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConverterRef, MethodPair};
    use crate::typegraph::ScalarType;

    fn plain_member() -> MemberDef {
        MemberDef::new("age", ScalarType::Int32.into())
    }

    fn address_snapshot() -> (TypeSnapshot, ModelDef) {
        let address = ModelDef::new("Address")
            .with_member(MemberDef::new("line1", ScalarType::Text.into()))
            .with_member(MemberDef::new("city", ScalarType::Text.into()));
        let person = ModelDef::new("Person")
            .with_member(MemberDef::new("name", ScalarType::Text.into()))
            .with_member(MemberDef::new("address", TypeRef::model("Address")))
            .with_member(MemberDef::new("previous", TypeRef::list(TypeRef::model("Address"))));
        let snapshot = TypeSnapshot::new().with_model(address).with_model(person.clone());
        (snapshot, person)
    }

    #[test]
    fn unconfigured_member_participates_in_both_directions() {
        let def = plain_member();
        let analyzed = analyze_member(&def, MemberOverride::default(), DirectionSet::BOTH, &MemberPath::root())
            .unwrap()
            .unwrap();
        assert!(analyzed.directions.serialize && analyzed.directions.deserialize);
        assert_eq!(analyzed.attribute_name, "age");
    }

    #[test]
    fn read_only_member_skips_deserialize_direction() {
        let def = plain_member().read_only();
        let analyzed = analyze_member(&def, MemberOverride::default(), DirectionSet::BOTH, &MemberPath::root())
            .unwrap()
            .unwrap();
        assert!(analyzed.directions.serialize);
        assert!(!analyzed.directions.deserialize);
    }

    #[test]
    fn member_with_no_usable_direction_is_skipped() {
        let def = plain_member().read_only();
        let config = MemberOverride { ignore: Ignore::Serialize, ..Default::default() };
        let result = analyze_member(&def, config, DirectionSet::BOTH, &MemberPath::root()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn full_method_pair_skips_strategy_resolution() {
        let def = plain_member();
        let config = MemberOverride {
            methods: MethodPair {
                serialize_with: Some("write_age".into()),
                deserialize_with: Some("read_age".into()),
            },
            ..Default::default()
        };
        assert!(analyze_member(&def, config, DirectionSet::BOTH, &MemberPath::root()).unwrap().is_none());
    }

    #[test]
    fn partial_method_pair_is_a_conflict() {
        let def = plain_member();
        let config = MemberOverride {
            methods: MethodPair { serialize_with: Some("write_age".into()), deserialize_with: None },
            ..Default::default()
        };
        let err = analyze_member(&def, config, DirectionSet::BOTH, &MemberPath::root()).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::ConflictingConfiguration);
    }

    #[test]
    fn converter_plus_methods_is_a_conflict() {
        let def = plain_member();
        let config = MemberOverride {
            converter: Some(ConverterRef("AgeConverter".into())),
            methods: MethodPair {
                serialize_with: Some("write_age".into()),
                deserialize_with: Some("read_age".into()),
            },
            ..Default::default()
        };
        let err = analyze_member(&def, config, DirectionSet::BOTH, &MemberPath::root()).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::ConflictingConfiguration);
    }

    #[test]
    fn ignored_both_with_extra_configuration_is_a_conflict() {
        let def = plain_member();
        let config = MemberOverride {
            ignore: Ignore::Both,
            attribute_name: Some("Age".into()),
            ..Default::default()
        };
        let err = analyze_member(&def, config, DirectionSet::BOTH, &MemberPath::root()).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::ConflictingConfiguration);
    }

    #[test]
    fn dot_paths_resolve_through_models_and_collection_elements() {
        let (snapshot, person) = address_snapshot();
        let mut overrides = OverrideMap::new();
        overrides.insert("address.city".into(), MemberOverride::default());
        overrides.insert("previous.line1".into(), MemberOverride::default());
        assert!(validate_override_paths(&snapshot, &person, &overrides).is_empty());
    }

    #[test]
    fn dot_path_to_missing_member_fails_at_the_bad_segment() {
        let (snapshot, person) = address_snapshot();
        let mut overrides = OverrideMap::new();
        overrides.insert("address.zip".into(), MemberOverride::default());
        let diagnostics = validate_override_paths(&snapshot, &person, &overrides);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidDotPath);
        assert_eq!(diagnostics[0].args, vec!["address.zip".to_string(), "zip".to_string()]);
    }

    #[test]
    fn dot_path_through_a_scalar_fails() {
        let (snapshot, person) = address_snapshot();
        let mut overrides = OverrideMap::new();
        overrides.insert("name.length".into(), MemberOverride::default());
        let diagnostics = validate_override_paths(&snapshot, &person, &overrides);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].args[1], "length");
    }

    #[test]
    fn scoping_strips_one_leading_segment() {
        let mut overrides = OverrideMap::new();
        overrides.insert("address.city".into(), MemberOverride { required: Some(true), ..Default::default() });
        overrides.insert("name".into(), MemberOverride::default());

        let scoped = scoped_overrides(&overrides, "address");
        assert_eq!(scoped.len(), 1);
        assert!(scoped.contains_key("city"));
    }
}
