// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source tree to document conversion.

use dcl_ast::{Expr, ExprKind, Script, Stmt, StmtKind};

use crate::node::{
    DeclarativeDocument, DocumentNode, ElementNode, ErrorNode, LiteralValueNode, PropertyNode, SourceData,
    ValueFactoryNode, ValueNode,
};

/// Build the document for a parsed script.
pub fn build_document(script: &Script) -> DeclarativeDocument {
    let content: Vec<DocumentNode> = script.statements.iter().map(statement).collect();
    tracing::debug!(source = %script.source, nodes = content.len(), "document built");
    DeclarativeDocument {
        source: script.source.clone(),
        content,
    }
}

fn statement(stmt: &Stmt) -> DocumentNode {
    let source = SourceData {
        origin: stmt.id,
        span: stmt.span,
    };
    match &stmt.kind {
        StmtKind::Call(call) => DocumentNode::Element(ElementNode {
            name: call.name.name.clone(),
            element_values: call.args.iter().map(value).collect(),
            content: call
                .block
                .iter()
                .flat_map(|block| block.statements.iter())
                .map(statement)
                .collect(),
            source,
        }),
        StmtKind::Assign { target, value: rhs } => DocumentNode::Property(PropertyNode {
            name: target.name.clone(),
            value: value(rhs),
            source,
        }),
        StmtKind::Error { message } => DocumentNode::Error(ErrorNode {
            message: message.clone(),
            source,
        }),
    }
}

fn value(expr: &Expr) -> ValueNode {
    let source = SourceData {
        origin: expr.id,
        span: expr.span,
    };
    match &expr.kind {
        ExprKind::Literal(literal) => ValueNode::Literal(LiteralValueNode {
            value: literal.clone(),
            source,
        }),
        ExprKind::Call { name, args } => ValueNode::ValueFactory(ValueFactoryNode {
            factory_name: name.name.clone(),
            values: args.iter().map(value).collect(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcl_ast::{Literal, SourceId, Span};
    use dcl_parser::parse_source;

    fn document(src: &str) -> DeclarativeDocument {
        build_document(&parse_source(SourceId::new("test.dcl"), src).script)
    }

    #[test]
    fn element_with_values_and_content() {
        let doc = document("addAndConfigure(\"test\") { number = 123 }");
        assert_eq!(doc.content.len(), 1);
        let DocumentNode::Element(element) = &doc.content[0] else {
            panic!("Expected element");
        };
        assert_eq!(element.name, "addAndConfigure");
        assert_eq!(element.source.span, Span::new(0, 40));
        assert!(matches!(
            &element.element_values[0],
            ValueNode::Literal(LiteralValueNode { value: Literal::String(s), .. }) if s == "test"
        ));
        let DocumentNode::Property(property) = &element.content[0] else {
            panic!("Expected property");
        };
        assert_eq!(property.name, "number");
        assert!(matches!(property.value, ValueNode::Literal(LiteralValueNode { value: Literal::Int(123), .. })));
    }

    #[test]
    fn factories_nest() {
        let doc = document("x = outer(inner(1), \"two\")");
        let DocumentNode::Property(property) = &doc.content[0] else {
            panic!("Expected property");
        };
        let ValueNode::ValueFactory(outer) = &property.value else {
            panic!("Expected value factory");
        };
        assert_eq!(outer.factory_name, "outer");
        assert_eq!(outer.values.len(), 2);
        assert!(matches!(&outer.values[0], ValueNode::ValueFactory(f) if f.factory_name == "inner"));
    }

    #[test]
    fn parse_failures_become_error_nodes() {
        let doc = document("a = 1\nb = = 2");
        assert!(matches!(doc.content[1], DocumentNode::Error(_)));
    }

    #[test]
    fn origins_point_back_to_source_nodes() {
        let script = parse_source(SourceId::new("test.dcl"), "a(1) { b = 2 }").script;
        let doc = build_document(&script);
        let DocumentNode::Element(element) = &doc.content[0] else {
            panic!("Expected element");
        };
        assert_eq!(element.source.origin, script.statements[0].id);
    }
}
