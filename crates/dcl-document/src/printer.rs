// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Plain-text rendering of a document, spans included.
//!
//! ```text
//! element addAndConfigure @0..40
//!   literal "test" @16..22
//!   property number @26..38
//!     literal 123 @35..38
//! ```

use std::fmt::Write;

use dcl_ast::Literal;

use crate::node::{DeclarativeDocument, DocumentNode, ValueNode};

/// Renders documents the same way on every run.
#[derive(Debug, Clone)]
pub struct DocumentPrinter {
    indent: usize,
    spans: bool,
}

impl Default for DocumentPrinter {
    fn default() -> Self {
        Self { indent: 2, spans: true }
    }
}

impl DocumentPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_spans(mut self) -> Self {
        self.spans = false;
        self
    }

    pub fn print(&self, document: &DeclarativeDocument) -> String {
        let mut out = String::new();
        for node in &document.content {
            self.node(&mut out, node, 0);
        }
        out
    }

    fn node(&self, out: &mut String, node: &DocumentNode, depth: usize) {
        match node {
            DocumentNode::Element(element) => {
                self.line(out, depth, &format!("element {}", element.name), node.source().span);
                for value in &element.element_values {
                    self.value(out, value, depth + 1);
                }
                for child in &element.content {
                    self.node(out, child, depth + 1);
                }
            }
            DocumentNode::Property(property) => {
                self.line(out, depth, &format!("property {}", property.name), property.source.span);
                self.value(out, &property.value, depth + 1);
            }
            DocumentNode::Error(error) => {
                self.line(out, depth, &format!("error {:?}", error.message), error.source.span);
            }
        }
    }

    fn value(&self, out: &mut String, value: &ValueNode, depth: usize) {
        match value {
            ValueNode::Literal(literal) => {
                self.line(out, depth, &format!("literal {}", quoted(&literal.value)), literal.source.span);
            }
            ValueNode::ValueFactory(factory) => {
                self.line(out, depth, &format!("factory {}", factory.factory_name), factory.source.span);
                for arg in &factory.values {
                    self.value(out, arg, depth + 1);
                }
            }
        }
    }

    fn line(&self, out: &mut String, depth: usize, text: &str, span: dcl_ast::Span) {
        out.push_str(&" ".repeat(depth * self.indent));
        out.push_str(text);
        if self.spans {
            let _ = write!(out, " @{}", span);
        }
        out.push('\n');
    }
}

fn quoted(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_document;
    use dcl_ast::SourceId;
    use dcl_parser::parse_source;

    #[test]
    fn prints_structure_with_spans() {
        let script = parse_source(SourceId::new("test.dcl"), "addAndConfigure(\"test\") { number = 123 }").script;
        let printed = DocumentPrinter::new().print(&build_document(&script));
        assert_eq!(
            printed,
            "element addAndConfigure @0..40\n  literal \"test\" @16..22\n  property number @26..38\n    literal 123 @35..38\n"
        );
    }

    #[test]
    fn identical_source_prints_identically() {
        let src = "a(f(1L, true)) {\n  b = null\n  broken = \n}\n";
        let first = DocumentPrinter::new().print(&build_document(&parse_source(SourceId::new("x"), src).script));
        let second = DocumentPrinter::new().print(&build_document(&parse_source(SourceId::new("x"), src).script));
        assert_eq!(first, second);
        assert!(first.contains("error "));
    }
}
