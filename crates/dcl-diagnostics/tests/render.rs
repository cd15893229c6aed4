// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rendered resolutions for complete scripts.

use dcl_ast::SourceId;
use dcl_diagnostics::render_resolutions;
use dcl_parser::parse_source;
use dcl_resolve::{resolve_script, ResolverSettings};
use dcl_schema::{BlockRequirement, Schema, SchemaBuilder, TypeRef};

fn schema() -> Schema {
    let mut builder = SchemaBuilder::new("TopLevel");
    builder
        .data_class("TopLevel")
        .adding("addAndConfigure", [TypeRef::String], "T", BlockRequirement::Allowed)
        .adding("topLevelOnly", [], "T", BlockRequirement::NotAllowed)
        .configuring("nested", "Nested")
        .factory("complex", [TypeRef::String], TypeRef::named("Complex"))
        .property("complexValueOne", TypeRef::named("Complex"));
    builder.data_class("T").property("number", TypeRef::Int);
    builder.data_class("Nested").property("level", TypeRef::Long);
    builder.data_class("Complex");
    builder.build().unwrap()
}

fn render(src: &str, settings: ResolverSettings) -> Vec<String> {
    let parsed = parse_source(SourceId::new("test.dcl"), src);
    assert!(parsed.is_ok(), "{:?} {:?}", parsed.lex_errors, parsed.parse_errors);
    let resolution = resolve_script(&schema(), &parsed.script, settings);
    render_resolutions(&resolution.resolved)
}

#[test]
fn adding_function_with_configuring_block() {
    assert_eq!(
        render("addAndConfigure(\"test\") { number = 123 }", ResolverSettings::default()),
        [
            "ContainerElementResolved -> element addAndConfigure(String): T",
            "LiteralValueResolved -> test",
            "PropertyAssignmentResolved -> T.number: Int",
            "LiteralValueResolved -> 123",
        ]
    );
}

#[test]
fn unknown_function() {
    assert_eq!(
        render("unknown(\"test2\")", ResolverSettings::default()),
        ["ElementNotResolved(UnresolvedSignature)", "LiteralValueResolved -> test2"]
    );
}

#[test]
fn property_type_mismatch() {
    assert_eq!(
        render("complexValueOne = \"type mismatch\"", ResolverSettings::default()),
        ["PropertyNotAssigned(ValueTypeMismatch)", "LiteralValueResolved -> type mismatch"]
    );
}

#[test]
fn cross_scope_access_in_strict_mode() {
    assert_eq!(
        render("nested {\n    topLevelOnly()\n}", ResolverSettings::strict()),
        [
            "PropertyConfiguringElementResolved -> configure nested: Nested",
            "ElementNotResolved(CrossScopeAccess)",
        ]
    );
}

#[test]
fn nested_failures_do_not_cascade() {
    assert_eq!(
        render("unknown {\n    number = 1\n    addAndConfigure(\"x\")\n}", ResolverSettings::default()),
        [
            "ElementNotResolved(UnresolvedSignature)",
            "PropertyNotAssigned(UnresolvedBase)",
            "LiteralValueResolved -> 1",
            "ElementNotResolved(UnresolvedBase)",
            "LiteralValueResolved -> x",
        ]
    );
}

#[test]
fn value_factories_and_widening() {
    assert_eq!(
        render("complexValueOne = complex(\"a\")\nnested { level = 5 }", ResolverSettings::default()),
        [
            "PropertyAssignmentResolved -> TopLevel.complexValueOne: Complex",
            "ValueFactoryResolved -> factory complex(String): Complex",
            "LiteralValueResolved -> a",
            "PropertyConfiguringElementResolved -> configure nested: Nested",
            "PropertyAssignmentResolved -> Nested.level: Long",
            "LiteralValueResolved -> 5",
        ]
    );
}

#[test]
fn rendering_is_deterministic() {
    let src = "addAndConfigure(\"a\") { number = \"x\" }\nunknown()\nnested { level = 1L }";
    let first = render(src, ResolverSettings::strict());
    for _ in 0..5 {
        assert_eq!(render(src, ResolverSettings::strict()), first);
    }
}
