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

//! Integration tests for the complete plan-resolution pipeline
//!
//! These exercise the engine end to end: coverage for the closed
//! scalar families, nested and collection shapes, cycle safety, diagnostic
//! aggregation, and the determinism guarantee incremental builds rely on.

use attrmap_codegen::config::MemberOverride;
use attrmap_codegen::diagnostics::{DiagnosticCode, Diagnostics};
use attrmap_codegen::engine::GenerationPass;
use attrmap_codegen::registry::MapperDeclaration;
use attrmap_codegen::strategy::{CollectionCategory, ConversionFamily, MapperPlan, NestedMappingInfo};
use attrmap_codegen::typegraph::{MemberDef, ModelDef, ScalarType, TypeRef, TypeSnapshot};
use attrmap_codegen::AttributeKind;
use proptest::prelude::*;

fn resolve_single(snapshot: &TypeSnapshot, decl: MapperDeclaration) -> Result<MapperPlan, Diagnostics> {
    let output = GenerationPass::new(snapshot).run(&[decl]).unwrap();
    output.mappers.into_iter().next().unwrap().result
}

fn address_model() -> ModelDef {
    ModelDef::new("Address")
        .with_member(MemberDef::new("line1", ScalarType::Text.into()))
        .with_member(MemberDef::new("city", ScalarType::Text.into()))
}

#[test]
fn plain_int_member_resolves_to_number() {
    let snapshot = TypeSnapshot::new()
        .with_model(ModelDef::new("Person").with_member(MemberDef::new("age", ScalarType::Int32.into())));
    let plan = resolve_single(&snapshot, MapperDeclaration::new("PersonMapper", "Person")).unwrap();

    assert_eq!(plan.members.len(), 1);
    let age = &plan.members[0].strategy;
    assert_eq!(age.attribute_kind(), AttributeKind::Number);
    assert!(!age.nullable);
}

#[test]
fn unregistered_nested_type_maps_inline() {
    let snapshot = TypeSnapshot::new()
        .with_model(address_model())
        .with_model(ModelDef::new("Person").with_member(MemberDef::new("home", TypeRef::model("Address"))));
    let plan = resolve_single(&snapshot, MapperDeclaration::new("PersonMapper", "Person")).unwrap();

    let home = &plan.members[0].strategy;
    assert_eq!(home.family, ConversionFamily::Nested);
    match home.nested.as_ref().unwrap() {
        NestedMappingInfo::Inline(members) => {
            assert_eq!(members.len(), 2);
            for sub in members {
                assert_eq!(sub.strategy.family, ConversionFamily::Text);
            }
        }
        other => panic!("expected inline mapping, got {other:?}"),
    }
}

#[test]
fn list_of_nested_models_inlines_or_references() {
    let snapshot = TypeSnapshot::new()
        .with_model(address_model())
        .with_model(ModelDef::new("Person").with_member(MemberDef::new("homes", TypeRef::list(TypeRef::model("Address")))));

    // Without a registered Address mapper the element inlines.
    let plan = resolve_single(&snapshot, MapperDeclaration::new("PersonMapper", "Person")).unwrap();
    let homes = &plan.members[0].strategy;
    assert_eq!(homes.family, ConversionFamily::Collection(CollectionCategory::List));
    assert_eq!(homes.attribute_kind(), AttributeKind::List);
    let element = homes.element.as_ref().unwrap();
    assert_eq!(element.family, ConversionFamily::Nested);
    assert!(matches!(element.nested.as_ref().unwrap(), NestedMappingInfo::Inline(_)));

    // With one, the element references it instead.
    let declarations = vec![
        MapperDeclaration::new("PersonMapper", "Person"),
        MapperDeclaration::new("AddressMapper", "Address"),
    ];
    let output = GenerationPass::new(&snapshot).run(&declarations).unwrap();
    let person = output.mappers[0].plan().unwrap();
    let element = person.members[0].strategy.element.as_ref().unwrap();
    assert!(
        matches!(element.nested.as_ref().unwrap(), NestedMappingInfo::Reference(r) if r.mapper == "AddressMapper")
    );
}

#[test]
fn direct_self_reference_is_cycle_detected() {
    let snapshot = TypeSnapshot::new().with_model(
        ModelDef::new("Person")
            .with_member(MemberDef::new("name", ScalarType::Text.into()))
            .with_member(MemberDef::new("this", TypeRef::model("Person"))),
    );
    let diagnostics = resolve_single(&snapshot, MapperDeclaration::new("PersonMapper", "Person")).unwrap_err();
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![DiagnosticCode::CycleDetected]);
}

#[test]
fn map_with_int_key_is_invalid() {
    let snapshot = TypeSnapshot::new().with_model(
        ModelDef::new("Person")
            .with_member(MemberDef::new("lookup", TypeRef::map(ScalarType::Int32.into(), ScalarType::Text.into()))),
    );
    let diagnostics = resolve_single(&snapshot, MapperDeclaration::new("PersonMapper", "Person")).unwrap_err();
    assert_eq!(diagnostics.iter().next().unwrap().code, DiagnosticCode::InvalidCollectionShape);
}

#[test]
fn list_overridden_to_scalar_kind_is_incompatible() {
    let snapshot = TypeSnapshot::new().with_model(
        ModelDef::new("Person").with_member(MemberDef::new("scores", TypeRef::list(ScalarType::Int32.into()))),
    );
    let decl = MapperDeclaration::new("PersonMapper", "Person")
        .with_override("scores", MemberOverride { kind: Some(AttributeKind::String), ..Default::default() });
    let diagnostics = resolve_single(&snapshot, decl).unwrap_err();
    assert_eq!(diagnostics.iter().next().unwrap().code, DiagnosticCode::IncompatibleKindOverride);
}

#[test]
fn indirect_cycle_through_two_intermediates_is_detected() {
    let snapshot = TypeSnapshot::new()
        .with_model(ModelDef::new("A").with_member(MemberDef::new("b", TypeRef::model("B"))))
        .with_model(ModelDef::new("B").with_member(MemberDef::new("c", TypeRef::model("C"))))
        .with_model(ModelDef::new("C").with_member(MemberDef::new("a", TypeRef::model("A"))));
    let diagnostics = resolve_single(&snapshot, MapperDeclaration::new("AMapper", "A")).unwrap_err();
    let cycle = diagnostics.iter().next().unwrap();
    assert_eq!(cycle.code, DiagnosticCode::CycleDetected);
    assert_eq!(cycle.args[1], "A -> B -> C");
}

#[test]
fn cycle_through_a_collection_element_is_detected() {
    let snapshot = TypeSnapshot::new().with_model(
        ModelDef::new("Tree")
            .with_member(MemberDef::new("label", ScalarType::Text.into()))
            .with_member(MemberDef::new("children", TypeRef::list(TypeRef::model("Tree")))),
    );
    let diagnostics = resolve_single(&snapshot, MapperDeclaration::new("TreeMapper", "Tree")).unwrap_err();
    assert_eq!(diagnostics.iter().next().unwrap().code, DiagnosticCode::CycleDetected);
}

#[test]
fn acyclic_nesting_terminates_with_a_full_plan() {
    // A linear chain of nested models, three levels deep plus collections.
    let snapshot = TypeSnapshot::new()
        .with_model(ModelDef::new("Order").with_member(MemberDef::new("customer", TypeRef::model("Customer"))))
        .with_model(
            ModelDef::new("Customer")
                .with_member(MemberDef::new("name", ScalarType::Text.into()))
                .with_member(MemberDef::new("addresses", TypeRef::list(TypeRef::model("Address")))),
        )
        .with_model(address_model());
    let plan = resolve_single(&snapshot, MapperDeclaration::new("OrderMapper", "Order")).unwrap();
    assert_eq!(plan.members.len(), 1);
    assert!(plan.members[0].strategy.nested.is_some());
}

#[test]
fn independent_failures_surface_together_in_one_pass() {
    let snapshot = TypeSnapshot::new().with_model(
        ModelDef::new("Mixed")
            .with_member(MemberDef::new("bad_map", TypeRef::map(ScalarType::Boolean.into(), ScalarType::Text.into())))
            .with_member(MemberDef::new("ok", ScalarType::Text.into()))
            .with_member(MemberDef::new("bad_set", TypeRef::set(TypeRef::model("Mixed")))),
    );
    let decl = MapperDeclaration::new("MixedMapper", "Mixed")
        .with_override("missing.path", MemberOverride::default());
    let diagnostics = resolve_single(&snapshot, decl).unwrap_err();

    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::InvalidDotPath,
            DiagnosticCode::InvalidCollectionShape,
            DiagnosticCode::InvalidCollectionShape,
        ]
    );
}

#[test]
fn serialized_plans_are_byte_identical_across_runs() {
    let snapshot = TypeSnapshot::new()
        .with_model(address_model())
        .with_model(
            ModelDef::new("Person")
                .with_member(MemberDef::new("id", ScalarType::Identifier.into()))
                .with_member(MemberDef::new("home", TypeRef::model("Address")))
                .with_member(MemberDef::new("tags", TypeRef::set(ScalarType::Text.into()))),
        );
    let declarations = vec![MapperDeclaration::new("PersonMapper", "Person")];

    let pass = GenerationPass::new(&snapshot);
    let first = serde_json::to_string(&pass.run(&declarations).unwrap()).unwrap();
    let second = serde_json::to_string(&pass.run(&declarations).unwrap()).unwrap();
    assert_eq!(first, second);
}

fn arbitrary_scalar() -> impl Strategy<Value = ScalarType> {
    prop::sample::select(vec![
        ScalarType::Text,
        ScalarType::Boolean,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::Float32,
        ScalarType::Float64,
        ScalarType::Decimal,
        ScalarType::DateTime,
        ScalarType::OffsetDateTime,
        ScalarType::Duration,
        ScalarType::Identifier,
        ScalarType::Binary,
    ])
}

/// Member shapes that always resolve: scalars and collections of scalars
/// (set elements limited to the primitive families).
fn arbitrary_member_type() -> impl Strategy<Value = TypeRef> {
    arbitrary_scalar().prop_flat_map(|scalar| {
        prop::sample::select(vec![
            TypeRef::Scalar(scalar),
            TypeRef::list(scalar.into()),
            TypeRef::array(scalar.into()),
            TypeRef::map(ScalarType::Text.into(), scalar.into()),
            TypeRef::set(scalar.into()),
        ])
    })
}

proptest! {
    #[test]
    fn resolved_kind_respects_the_partition(ty in arbitrary_member_type(), optional in any::<bool>()) {
        let mut member = MemberDef::new("value", ty.clone());
        member.is_optional = optional;
        let snapshot = TypeSnapshot::new().with_model(ModelDef::new("Holder").with_member(member));
        let plan = resolve_single(&snapshot, MapperDeclaration::new("HolderMapper", "Holder")).unwrap();

        let strategy = &plan.members[0].strategy;
        prop_assert_eq!(strategy.attribute_kind().is_collection(), ty.is_collection());
        prop_assert_eq!(strategy.nullable, optional);
    }

    #[test]
    fn resolution_is_deterministic(ty in arbitrary_member_type()) {
        let snapshot = TypeSnapshot::new()
            .with_model(ModelDef::new("Holder").with_member(MemberDef::new("value", ty)));
        let decl = MapperDeclaration::new("HolderMapper", "Holder");
        let first = resolve_single(&snapshot, decl.clone()).unwrap();
        let second = resolve_single(&snapshot, decl).unwrap();
        prop_assert_eq!(first, second);
    }
}
