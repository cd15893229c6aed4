// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Document nodes.

use dcl_ast::{Literal, NodeId, SourceId, Span};

/// Where a document node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceData {
    /// The source tree node this document node was built from.
    pub origin: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclarativeDocument {
    pub source: SourceId,
    pub content: Vec<DocumentNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Element(ElementNode),
    Property(PropertyNode),
    Error(ErrorNode),
}

/// A call statement, with or without a trailing block.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub name: String,
    pub element_values: Vec<ValueNode>,
    pub content: Vec<DocumentNode>,
    pub source: SourceData,
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub name: String,
    pub value: ValueNode,
    pub source: SourceData,
}

/// A statement rejected by the parser. Carries the parse error message only.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNode {
    pub message: String,
    pub source: SourceData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    Literal(LiteralValueNode),
    ValueFactory(ValueFactoryNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralValueNode {
    pub value: Literal,
    pub source: SourceData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueFactoryNode {
    pub factory_name: String,
    pub values: Vec<ValueNode>,
    pub source: SourceData,
}

impl DocumentNode {
    pub fn source(&self) -> SourceData {
        match self {
            DocumentNode::Element(node) => node.source,
            DocumentNode::Property(node) => node.source,
            DocumentNode::Error(node) => node.source,
        }
    }
}

impl ValueNode {
    pub fn source(&self) -> SourceData {
        match self {
            ValueNode::Literal(node) => node.source,
            ValueNode::ValueFactory(node) => node.source,
        }
    }
}
