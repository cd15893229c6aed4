// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from front-end, schema and resolution failures to `Diagnostic`.

use dcl_ast::Span;
use dcl_resolve::{
    ElementResolution, FailureReason, PropertyResolution, ReasonSet, ResolvedDocument, ResolvedElementNode,
    ResolvedNode, ResolvedPropertyNode, ResolvedValueNode, ValueResolution,
};
use dcl_schema::{Schema, SchemaError, TypeName};

use crate::codes::reason_code;
use crate::suggestions::closest_match;
use crate::{Diagnostic, ToDiagnostic};

// ============================================================================
// Front-end and schema errors
// ============================================================================

impl ToDiagnostic for dcl_lexer::LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(&self.message)
            .with_code("E0001")
            .with_primary(self.span, "invalid token");

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

impl ToDiagnostic for dcl_parser::ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(&self.message)
            .with_code("E0100")
            .with_primary(self.span, "here");

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

impl ToDiagnostic for SchemaError {
    fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).with_code("E0300");
        match self {
            SchemaError::UnknownType { .. } | SchemaError::UnknownSupertype { .. } => {
                diag.with_help("declare the type as a data class of the schema")
            }
            SchemaError::ConfiguringReturnsValue { .. } => {
                diag.with_note("configuring functions redirect a block and produce no value")
            }
            _ => diag,
        }
    }
}

// ============================================================================
// Resolution failures
// ============================================================================

/// Diagnostics for every failed node of `document`, in source order.
///
/// Nodes that failed only because an enclosing element did are reported as
/// notes. Error nodes are skipped: the parser already reported them.
pub fn resolution_diagnostics(document: &ResolvedDocument, schema: &Schema) -> Vec<Diagnostic> {
    let mut walker = FailureWalker {
        schema,
        diagnostics: Vec::new(),
    };
    let top = Some(schema.top_level_receiver().clone());
    for node in &document.content {
        walker.node(node, top.as_ref());
    }
    walker.diagnostics
}

struct FailureWalker<'s> {
    schema: &'s Schema,
    diagnostics: Vec<Diagnostic>,
}

impl FailureWalker<'_> {
    /// `receiver` is `None` inside blocks of elements that did not resolve.
    fn node(&mut self, node: &ResolvedNode, receiver: Option<&TypeName>) {
        match node {
            ResolvedNode::Element(element) => {
                for value in &element.element_values {
                    self.value(value, receiver);
                }
                let block_receiver = match &element.resolution {
                    ElementResolution::ContainerElementResolved { element_type, .. } => Some(element_type.clone()),
                    ElementResolution::PropertyConfiguringElementResolved { configured_type, .. } => {
                        Some(configured_type.clone())
                    }
                    ElementResolution::ElementNotResolved(reasons) => {
                        self.element_failure(element, reasons, receiver);
                        None
                    }
                };
                for child in &element.content {
                    self.node(child, block_receiver.as_ref());
                }
            }
            ResolvedNode::Property(property) => {
                if let PropertyResolution::PropertyNotAssigned(reasons) = &property.resolution {
                    self.property_failure(property, reasons, receiver);
                }
                self.value(&property.value, receiver);
            }
            ResolvedNode::Error(_) => {}
        }
    }

    fn value(&mut self, value: &ResolvedValueNode, receiver: Option<&TypeName>) {
        if let ResolvedValueNode::ValueFactory(factory) = value {
            if let ValueResolution::ValueFactoryNotResolved(reasons) = &factory.resolution {
                let span = name_span(factory.source.span, &factory.factory_name);
                let mut diag = failure(reasons, format!("cannot resolve value factory `{}`", factory.factory_name))
                    .with_primary(span, label(reasons));
                if reasons.contains(FailureReason::UnresolvedSignature) {
                    diag = self.function_help(diag, &factory.factory_name, span, receiver, false);
                }
                self.diagnostics.push(diag);
            }
            for arg in &factory.values {
                self.value(arg, receiver);
            }
        }
    }

    fn element_failure(&mut self, element: &ResolvedElementNode, reasons: &ReasonSet, receiver: Option<&TypeName>) {
        let span = name_span(element.source.span, &element.name);
        let mut diag =
            failure(reasons, format!("cannot resolve element `{}`", element.name)).with_primary(span, label(reasons));
        if reasons.contains(FailureReason::UnresolvedSignature) {
            diag = self.function_help(diag, &element.name, span, receiver, true);
        }
        if reasons.contains(FailureReason::CrossScopeAccess) {
            diag = diag.with_note(format!(
                "`{}` belongs to an enclosing receiver, not the block it is called in",
                element.name
            ));
        }
        self.diagnostics.push(diag);
    }

    fn property_failure(&mut self, property: &ResolvedPropertyNode, reasons: &ReasonSet, receiver: Option<&TypeName>) {
        let span = name_span(property.source.span, &property.name);
        let mut diag = failure(reasons, format!("cannot assign property `{}`", property.name))
            .with_primary(span, label(reasons))
            .with_secondary(property.value.source().span, "assigned value");

        let declared = receiver.and_then(|r| self.schema.property(r.as_str(), &property.name));
        if reasons.contains(FailureReason::UnresolvedSignature) {
            if let Some(receiver) = receiver {
                let names: Vec<&str> = self
                    .schema
                    .visible_properties(receiver.as_str())
                    .map(|p| p.name.as_str())
                    .collect();
                if let Some(closest) = closest_match(&property.name, names.iter().copied()) {
                    diag = diag
                        .with_help(format!("did you mean `{}`?", closest))
                        .with_suggestion(span, closest);
                } else if !names.is_empty() {
                    diag = diag.with_help(format!("`{}` has properties: {}", receiver, names.join(", ")));
                }
            }
        }
        if let Some(declared) = declared {
            if reasons.contains(FailureReason::ValueTypeMismatch) {
                diag = diag.with_note(format!("`{}.{}` expects `{}`", declared.owner, declared.name, declared.ty));
            }
        }
        if reasons.contains(FailureReason::CrossScopeAccess) {
            diag = diag.with_note(format!(
                "`{}` belongs to an enclosing receiver, not the block it is assigned in",
                property.name
            ));
        }
        if reasons.contains(FailureReason::ReadOnlyProperty) {
            diag = diag.with_note(format!("`{}` is read-only", property.name));
        }
        self.diagnostics.push(diag);
    }

    /// Suggest a close function name, or list the overloads of an existing one.
    fn function_help(
        &self,
        diag: Diagnostic,
        name: &str,
        span: Span,
        receiver: Option<&TypeName>,
        element: bool,
    ) -> Diagnostic {
        let Some(receiver) = receiver else {
            return diag;
        };
        let overloads: Vec<String> = self
            .schema
            .functions_named(receiver.as_str(), name)
            .iter()
            .filter(|f| f.semantics.is_element() == element)
            .map(|f| f.signature())
            .collect();
        if !overloads.is_empty() {
            return diag.with_help(format!("available signatures: {}", overloads.join("; ")));
        }
        let names = self.schema.function_names(receiver.as_str());
        match closest_match(name, names.iter().copied()) {
            Some(closest) => diag
                .with_help(format!("did you mean `{}`?", closest))
                .with_suggestion(span, closest),
            None => diag,
        }
    }
}

/// Errors, except failures caused only by an enclosing failure, which are notes.
fn failure(reasons: &ReasonSet, message: String) -> Diagnostic {
    let only_base = reasons.iter().all(|r| r == FailureReason::UnresolvedBase);
    let first = reasons.iter().next().unwrap_or(FailureReason::UnresolvedBase);
    let diag = if only_base {
        Diagnostic::note(message)
    } else {
        Diagnostic::error(message)
    };
    diag.with_code(reason_code(first))
}

fn label(reasons: &ReasonSet) -> String {
    let labels: Vec<&str> = reasons
        .iter()
        .map(|reason| match reason {
            FailureReason::UnresolvedSignature => "no matching signature",
            FailureReason::ValueTypeMismatch => "value has the wrong type",
            FailureReason::CrossScopeAccess => "not a member of the current receiver",
            FailureReason::UnresolvedBase => "enclosing element did not resolve",
            FailureReason::IsError => "value did not resolve",
            FailureReason::ReadOnlyProperty => "read-only",
        })
        .collect();
    labels.join("; ")
}

/// The leading name of a node whose span starts at that name.
fn name_span(span: Span, name: &str) -> Span {
    Span::new(span.start, (span.start + name.len()).min(span.end.max(span.start)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use dcl_ast::SourceId;
    use dcl_parser::parse_source;
    use dcl_resolve::{resolve_script, ResolverSettings};
    use dcl_schema::{BlockRequirement, SchemaBuilder, TypeRef};

    fn schema() -> Schema {
        let mut builder = SchemaBuilder::new("Top");
        builder
            .data_class("Top")
            .adding("service", [TypeRef::String], "Service", BlockRequirement::Allowed)
            .property("name", TypeRef::String)
            .hidden_property("secret", TypeRef::String);
        builder
            .data_class("Service")
            .property("port", TypeRef::Int)
            .read_only_property("id", TypeRef::String);
        builder.build().unwrap()
    }

    fn diagnostics(src: &str) -> Vec<Diagnostic> {
        let schema = schema();
        let parsed = parse_source(SourceId::new("test.dcl"), src);
        let resolution = resolve_script(&schema, &parsed.script, ResolverSettings::strict());
        resolution_diagnostics(&resolution.resolved, &schema)
    }

    #[test]
    fn misspelled_function_gets_a_suggestion() {
        let diags = diagnostics("servce(\"a\")");
        assert_eq!(diags.len(), 1);
        let help = diags[0].help.as_ref().unwrap();
        assert_eq!(help.message, "did you mean `service`?");
        assert_eq!(help.suggestion.as_ref().unwrap().span, Span::new(0, 6));
        assert_eq!(diags[0].code.as_ref().unwrap().0, "E0400");
    }

    #[test]
    fn wrong_arguments_list_the_overloads() {
        let diags = diagnostics("service(1)");
        let help = diags[0].help.as_ref().unwrap();
        assert_eq!(help.message, "available signatures: service(String): Service");
    }

    #[test]
    fn hidden_properties_are_never_suggested() {
        let diags = diagnostics("secrt = \"x\"");
        assert_eq!(diags.len(), 1);
        let help = diags[0].help.as_ref().unwrap();
        assert_eq!(help.message, "`Top` has properties: name");
    }

    #[test]
    fn cascaded_failures_are_notes() {
        let diags = diagnostics("missing {\n  port = 1\n}");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[1].severity, Severity::Note);
        assert_eq!(diags[1].code.as_ref().unwrap().0, "E0403");
    }

    #[test]
    fn multiple_reasons_produce_multiple_notes() {
        let diags = diagnostics("service(\"a\") { id = 1 }");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.as_ref().unwrap().0, "E0405");
        assert_eq!(diags[0].notes.len(), 2);
    }
}
