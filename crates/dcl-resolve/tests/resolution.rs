// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end resolution: text -> script -> document + trace -> resolved document.

use dcl_ast::SourceId;
use dcl_document::DocumentPrinter;
use dcl_parser::parse_source;
use dcl_resolve::{
    resolve_script, DocumentResolution, ElementResolution, FailureReason, PropertyResolution, Resolution,
    ResolverSettings, ValueResolution,
};
use dcl_schema::{BlockRequirement, Schema, SchemaBuilder, TypeRef};

fn schema() -> Schema {
    let mut builder = SchemaBuilder::new("TopLevel");
    builder
        .data_class("TopLevel")
        .adding("addAndConfigure", [TypeRef::String], "T", BlockRequirement::Allowed)
        .adding("topOnly", [], "T", BlockRequirement::NotAllowed)
        .configuring("nested", "Nested")
        .factory("complex", [TypeRef::String], TypeRef::named("Complex"))
        .property("complexValueOne", TypeRef::named("Complex"))
        .hidden_property("internalId", TypeRef::String)
        .read_only_property("version", TypeRef::Int);
    builder.data_class("T").property("number", TypeRef::Int);
    builder.data_class("Nested").property("enabled", TypeRef::Boolean);
    builder.data_class("Complex");
    builder.build().unwrap()
}

fn run(src: &str, settings: ResolverSettings) -> Resolution {
    let parsed = parse_source(SourceId::new("test.dcl"), src);
    resolve_script(&schema(), &parsed.script, settings)
}

fn names(resolution: &Resolution) -> Vec<&'static str> {
    resolution.resolved.flatten().iter().map(DocumentResolution::name).collect()
}

fn reasons_of(resolution: DocumentResolution<'_>) -> Vec<FailureReason> {
    resolution.reasons().map(|r| r.iter().collect()).unwrap_or_default()
}

#[test]
fn container_element_with_property() {
    let result = run("addAndConfigure(\"test\") { number = 123 }", ResolverSettings::default());
    assert_eq!(
        names(&result),
        [
            "ContainerElementResolved",
            "LiteralValueResolved",
            "PropertyAssignmentResolved",
            "LiteralValueResolved"
        ]
    );
    let flat = result.resolved.flatten();
    let DocumentResolution::Element(ElementResolution::ContainerElementResolved { element_type, function }) = flat[0]
    else {
        panic!("expected a container element, got {:?}", flat[0]);
    };
    assert_eq!(element_type.as_str(), "T");
    assert_eq!(function.signature(), "addAndConfigure(String): T");
    let DocumentResolution::Property(PropertyResolution::PropertyAssignmentResolved { receiver_type, property }) =
        flat[2]
    else {
        panic!("expected an assignment, got {:?}", flat[2]);
    };
    assert_eq!(receiver_type.as_str(), "T");
    assert_eq!(property.to_string(), "T.number: Int");
}

#[test]
fn unknown_function_still_resolves_its_arguments() {
    let result = run("unknown(\"test2\")", ResolverSettings::default());
    let flat = result.resolved.flatten();
    assert_eq!(names(&result), ["ElementNotResolved", "LiteralValueResolved"]);
    assert_eq!(reasons_of(flat[0]), [FailureReason::UnresolvedSignature]);
}

#[test]
fn literal_of_wrong_type_is_a_mismatch() {
    let result = run("complexValueOne = \"type mismatch\"", ResolverSettings::default());
    let flat = result.resolved.flatten();
    assert_eq!(names(&result), ["PropertyNotAssigned", "LiteralValueResolved"]);
    assert_eq!(reasons_of(flat[0]), [FailureReason::ValueTypeMismatch]);
}

#[test]
fn top_level_function_inside_nested_block() {
    let src = "nested {\n    topOnly()\n}";

    let strict = run(src, ResolverSettings::strict());
    let flat = strict.resolved.flatten();
    assert_eq!(names(&strict), ["PropertyConfiguringElementResolved", "ElementNotResolved"]);
    assert_eq!(reasons_of(flat[1]), [FailureReason::CrossScopeAccess]);

    let lenient = run(src, ResolverSettings::lenient());
    assert!(!lenient.resolved.has_failures());
}

#[test]
fn children_of_unresolved_elements_report_unresolved_base() {
    let src = "missing(\"x\") {\n    number = 1\n    addAndConfigure(\"y\")\n    inner { number = 2 }\n}";
    let result = run(src, ResolverSettings::default());
    let flat = result.resolved.flatten();

    assert_eq!(reasons_of(flat[0]), [FailureReason::UnresolvedSignature]);
    for resolution in &flat[1..] {
        assert!(
            !reasons_of(*resolution).contains(&FailureReason::UnresolvedSignature),
            "{} should not report UnresolvedSignature",
            resolution.name()
        );
    }
    let nested_statements: Vec<Vec<FailureReason>> = flat
        .iter()
        .filter(|r| !matches!(r, DocumentResolution::Value(_)))
        .skip(1)
        .map(|r| reasons_of(*r))
        .collect();
    assert_eq!(nested_statements, vec![vec![FailureReason::UnresolvedBase]; 4]);
}

#[test]
fn factory_values_resolve() {
    let result = run("complexValueOne = complex(\"a\")", ResolverSettings::default());
    assert!(!result.resolved.has_failures());
    assert_eq!(
        names(&result),
        ["PropertyAssignmentResolved", "ValueFactoryResolved", "LiteralValueResolved"]
    );
}

#[test]
fn failed_value_marks_the_assignment_as_error() {
    let result = run("complexValueOne = complex(1)", ResolverSettings::default());
    let flat = result.resolved.flatten();
    assert_eq!(reasons_of(flat[0]), [FailureReason::IsError]);
    assert!(matches!(
        flat[1],
        DocumentResolution::Value(ValueResolution::ValueFactoryNotResolved(_))
    ));
    assert_eq!(reasons_of(flat[1]), [FailureReason::UnresolvedSignature]);
}

#[test]
fn multiple_reasons_are_kept_in_discovery_order() {
    let result = run("version = \"two\"", ResolverSettings::default());
    let flat = result.resolved.flatten();
    assert_eq!(
        reasons_of(flat[0]),
        [FailureReason::ReadOnlyProperty, FailureReason::ValueTypeMismatch]
    );

    let strict = run("addAndConfigure(\"a\") { complexValueOne = 1 }", ResolverSettings::strict());
    let flat = strict.resolved.flatten();
    assert_eq!(
        reasons_of(flat[2]),
        [FailureReason::CrossScopeAccess, FailureReason::ValueTypeMismatch]
    );
}

#[test]
fn hidden_properties_still_resolve() {
    let result = run("internalId = \"abc\"", ResolverSettings::default());
    assert!(!result.resolved.has_failures());
}

#[test]
fn parse_errors_become_error_resolutions() {
    let result = run("number = = 1\naddAndConfigure(\"ok\")", ResolverSettings::default());
    let flat = result.resolved.flatten();
    assert_eq!(flat[0].name(), "ErrorResolution");
    assert_eq!(result.resolved.failures().len(), 1);
    assert_eq!(flat[1].name(), "ContainerElementResolved");
}

#[test]
fn stripping_resolutions_gives_back_the_document() {
    let sources = [
        "addAndConfigure(\"test\") { number = 123 }",
        "unknown(\"a\") { x = complex(\"b\") }\nversion = 1L",
        "nested {\n  enabled = true\n  topOnly()\n}\nbroken = = 3",
    ];
    let printer = DocumentPrinter::new();
    for src in sources {
        let result = run(src, ResolverSettings::strict());
        assert_eq!(result.resolved.strip(), result.document);
        assert_eq!(printer.print(&result.resolved.strip()), printer.print(&result.document));
    }
}

#[test]
fn resolving_twice_is_deterministic() {
    let src = "addAndConfigure(\"a\") { number = 1 }\nunknown()\ncomplexValueOne = complex(\"x\")";
    let first = run(src, ResolverSettings::default());
    let second = run(src, ResolverSettings::default());
    assert_eq!(first.resolved, second.resolved);
}

#[test]
fn trace_order_matches_document_order() {
    let src = "addAndConfigure(\"a\") {\n  number = 1\n}\ncomplexValueOne = complex(\"x\")\nnested { enabled = false }";
    let result = run(src, ResolverSettings::default());

    let trace_order: Vec<_> = result.trace.iter().map(|(id, _)| id).collect();
    let document_order: Vec<_> = result
        .resolved
        .flatten_with_source()
        .iter()
        .map(|(source, _)| source.origin)
        .collect();
    assert_eq!(trace_order, document_order);

    let starts: Vec<usize> = result
        .resolved
        .flatten_with_source()
        .iter()
        .map(|(source, _)| source.span.start)
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}
