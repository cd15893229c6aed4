// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Merging a document with a trace into a resolved document.

use dcl_ast::{Literal, SourceId};
use dcl_document::{
    DeclarativeDocument, DocumentNode, ElementNode, ErrorNode, LiteralValueNode, PropertyNode, SourceData,
    ValueFactoryNode, ValueNode,
};

use crate::reason::{FailureReason, ReasonSet};
use crate::resolution::{DocumentResolution, ElementResolution, ErrorResolution, PropertyResolution, ValueResolution};
use crate::trace::{AssignmentTarget, ElementTarget, Trace, TraceEntry, ValueTarget};

/// A document whose every node and value carries exactly one resolution.
/// Same shape as the [`DeclarativeDocument`] it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDocument {
    pub source: SourceId,
    pub content: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedNode {
    Element(ResolvedElementNode),
    Property(ResolvedPropertyNode),
    Error(ResolvedErrorNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElementNode {
    pub name: String,
    pub element_values: Vec<ResolvedValueNode>,
    pub content: Vec<ResolvedNode>,
    pub source: SourceData,
    pub resolution: ElementResolution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPropertyNode {
    pub name: String,
    pub value: ResolvedValueNode,
    pub source: SourceData,
    pub resolution: PropertyResolution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedErrorNode {
    pub message: String,
    pub source: SourceData,
    pub resolution: ErrorResolution,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValueNode {
    Literal(ResolvedLiteralNode),
    ValueFactory(ResolvedValueFactoryNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLiteralNode {
    pub value: Literal,
    pub source: SourceData,
    pub resolution: ValueResolution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValueFactoryNode {
    pub factory_name: String,
    pub values: Vec<ResolvedValueNode>,
    pub source: SourceData,
    pub resolution: ValueResolution,
}

impl ResolvedNode {
    pub fn source(&self) -> SourceData {
        match self {
            ResolvedNode::Element(node) => node.source,
            ResolvedNode::Property(node) => node.source,
            ResolvedNode::Error(node) => node.source,
        }
    }

    pub fn resolution(&self) -> DocumentResolution<'_> {
        match self {
            ResolvedNode::Element(node) => DocumentResolution::Element(&node.resolution),
            ResolvedNode::Property(node) => DocumentResolution::Property(&node.resolution),
            ResolvedNode::Error(node) => DocumentResolution::Error(&node.resolution),
        }
    }

    fn strip(&self) -> DocumentNode {
        match self {
            ResolvedNode::Element(node) => DocumentNode::Element(ElementNode {
                name: node.name.clone(),
                element_values: node.element_values.iter().map(ResolvedValueNode::strip).collect(),
                content: node.content.iter().map(ResolvedNode::strip).collect(),
                source: node.source,
            }),
            ResolvedNode::Property(node) => DocumentNode::Property(PropertyNode {
                name: node.name.clone(),
                value: node.value.strip(),
                source: node.source,
            }),
            ResolvedNode::Error(node) => DocumentNode::Error(ErrorNode {
                message: node.message.clone(),
                source: node.source,
            }),
        }
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<(SourceData, DocumentResolution<'a>)>) {
        out.push((self.source(), self.resolution()));
        match self {
            ResolvedNode::Element(node) => {
                for value in &node.element_values {
                    value.flatten_into(out);
                }
                for child in &node.content {
                    child.flatten_into(out);
                }
            }
            ResolvedNode::Property(node) => node.value.flatten_into(out),
            ResolvedNode::Error(_) => {}
        }
    }
}

impl ResolvedValueNode {
    pub fn source(&self) -> SourceData {
        match self {
            ResolvedValueNode::Literal(node) => node.source,
            ResolvedValueNode::ValueFactory(node) => node.source,
        }
    }

    pub fn resolution(&self) -> &ValueResolution {
        match self {
            ResolvedValueNode::Literal(node) => &node.resolution,
            ResolvedValueNode::ValueFactory(node) => &node.resolution,
        }
    }

    fn strip(&self) -> ValueNode {
        match self {
            ResolvedValueNode::Literal(node) => ValueNode::Literal(LiteralValueNode {
                value: node.value.clone(),
                source: node.source,
            }),
            ResolvedValueNode::ValueFactory(node) => ValueNode::ValueFactory(ValueFactoryNode {
                factory_name: node.factory_name.clone(),
                values: node.values.iter().map(ResolvedValueNode::strip).collect(),
                source: node.source,
            }),
        }
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<(SourceData, DocumentResolution<'a>)>) {
        out.push((self.source(), DocumentResolution::Value(self.resolution())));
        if let ResolvedValueNode::ValueFactory(node) = self {
            for value in &node.values {
                value.flatten_into(out);
            }
        }
    }
}

impl ResolvedDocument {
    /// Drop every resolution, giving back the document this was built from.
    pub fn strip(&self) -> DeclarativeDocument {
        DeclarativeDocument {
            source: self.source.clone(),
            content: self.content.iter().map(ResolvedNode::strip).collect(),
        }
    }

    /// Every resolution depth-first: a node, then its values (a factory
    /// before its arguments), then its nested content.
    pub fn flatten(&self) -> Vec<DocumentResolution<'_>> {
        self.flatten_with_source().into_iter().map(|(_, r)| r).collect()
    }

    /// [`flatten`](Self::flatten), paired with each node's source data.
    pub fn flatten_with_source(&self) -> Vec<(SourceData, DocumentResolution<'_>)> {
        let mut out = Vec::new();
        for node in &self.content {
            node.flatten_into(&mut out);
        }
        out
    }

    pub fn has_failures(&self) -> bool {
        self.flatten().iter().any(DocumentResolution::is_failure)
    }

    pub fn failures(&self) -> Vec<(SourceData, DocumentResolution<'_>)> {
        self.flatten_with_source()
            .into_iter()
            .filter(|(_, resolution)| resolution.is_failure())
            .collect()
    }
}

/// Attach the trace's outcomes to `document`.
///
/// Nodes without a matching trace entry resolve to `UnresolvedBase`; the
/// schema is never consulted again.
pub fn resolve_document(document: &DeclarativeDocument, trace: &Trace) -> ResolvedDocument {
    let resolved = ResolvedDocument {
        source: document.source.clone(),
        content: document.content.iter().map(|node| node_resolution(node, trace)).collect(),
    };
    tracing::debug!(source = %document.source, failures = resolved.failures().len(), "resolved document");
    resolved
}

fn unresolved_base() -> ReasonSet {
    ReasonSet::single(FailureReason::UnresolvedBase)
}

fn node_resolution(node: &DocumentNode, trace: &Trace) -> ResolvedNode {
    match node {
        DocumentNode::Element(element) => {
            let resolution = match trace.get(element.source.origin) {
                Some(TraceEntry::Element(Ok(ElementTarget::Added {
                    element_type, function, ..
                }))) => ElementResolution::ContainerElementResolved {
                    element_type: element_type.clone(),
                    function: function.clone(),
                },
                Some(TraceEntry::Element(Ok(ElementTarget::Configured {
                    configured_type,
                    function,
                    ..
                }))) => ElementResolution::PropertyConfiguringElementResolved {
                    configured_type: configured_type.clone(),
                    function: function.clone(),
                },
                Some(TraceEntry::Element(Err(reasons))) => ElementResolution::ElementNotResolved(reasons.clone()),
                _ => ElementResolution::ElementNotResolved(unresolved_base()),
            };
            ResolvedNode::Element(ResolvedElementNode {
                name: element.name.clone(),
                element_values: element.element_values.iter().map(|v| value_resolution(v, trace)).collect(),
                content: element.content.iter().map(|n| node_resolution(n, trace)).collect(),
                source: element.source,
                resolution,
            })
        }
        DocumentNode::Property(property) => {
            let resolution = match trace.get(property.source.origin) {
                Some(TraceEntry::Assignment(Ok(AssignmentTarget {
                    receiver_type,
                    property,
                }))) => PropertyResolution::PropertyAssignmentResolved {
                    receiver_type: receiver_type.clone(),
                    property: property.clone(),
                },
                Some(TraceEntry::Assignment(Err(reasons))) => PropertyResolution::PropertyNotAssigned(reasons.clone()),
                _ => PropertyResolution::PropertyNotAssigned(unresolved_base()),
            };
            ResolvedNode::Property(ResolvedPropertyNode {
                name: property.name.clone(),
                value: value_resolution(&property.value, trace),
                source: property.source,
                resolution,
            })
        }
        DocumentNode::Error(error) => {
            if !traced_as_error(trace, error.source) {
                tracing::warn!(origin = %error.source.origin, "error node without an IsError trace entry");
            }
            ResolvedNode::Error(ResolvedErrorNode {
                message: error.message.clone(),
                source: error.source,
                resolution: ErrorResolution,
            })
        }
    }
}

/// Whether the code resolver recorded the node at `source` as an error.
fn traced_as_error(trace: &Trace, source: SourceData) -> bool {
    matches!(
        trace.get(source.origin),
        Some(TraceEntry::Element(Err(reasons))) if reasons.contains(FailureReason::IsError)
    )
}

fn value_resolution(value: &ValueNode, trace: &Trace) -> ResolvedValueNode {
    match value {
        ValueNode::Literal(literal) => {
            let resolution = match trace.get(literal.source.origin) {
                Some(TraceEntry::Value(Ok(ValueTarget::Literal { value, .. }))) => {
                    ValueResolution::LiteralValueResolved { value: value.clone() }
                }
                Some(TraceEntry::Value(Err(reasons))) => ValueResolution::LiteralValueNotResolved(reasons.clone()),
                _ => ValueResolution::LiteralValueNotResolved(unresolved_base()),
            };
            ResolvedValueNode::Literal(ResolvedLiteralNode {
                value: literal.value.clone(),
                source: literal.source,
                resolution,
            })
        }
        ValueNode::ValueFactory(factory) => {
            let resolution = match trace.get(factory.source.origin) {
                Some(TraceEntry::Value(Ok(ValueTarget::Factory { function }))) => ValueResolution::ValueFactoryResolved {
                    function: function.clone(),
                },
                Some(TraceEntry::Value(Err(reasons))) => ValueResolution::ValueFactoryNotResolved(reasons.clone()),
                _ => ValueResolution::ValueFactoryNotResolved(unresolved_base()),
            };
            ResolvedValueNode::ValueFactory(ResolvedValueFactoryNode {
                factory_name: factory.factory_name.clone(),
                values: factory.values.iter().map(|v| value_resolution(v, trace)).collect(),
                source: factory.source,
                resolution,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcl_ast::{NodeId, Span};

    fn source(id: u32) -> SourceData {
        SourceData {
            origin: NodeId(id),
            span: Span::new(0, 1),
        }
    }

    #[test]
    fn missing_trace_entries_become_unresolved_base() {
        let document = DeclarativeDocument {
            source: SourceId::new("test.dcl"),
            content: vec![DocumentNode::Element(ElementNode {
                name: "orphan".to_string(),
                element_values: vec![ValueNode::Literal(LiteralValueNode {
                    value: Literal::Int(1),
                    source: source(1),
                })],
                content: vec![DocumentNode::Property(PropertyNode {
                    name: "x".to_string(),
                    value: ValueNode::ValueFactory(ValueFactoryNode {
                        factory_name: "f".to_string(),
                        values: Vec::new(),
                        source: source(3),
                    }),
                    source: source(2),
                })],
                source: source(0),
            })],
        };

        let resolved = resolve_document(&document, &Trace::new());
        let flat = resolved.flatten();
        assert_eq!(flat.len(), 4);
        for resolution in &flat {
            let reasons = resolution.reasons().unwrap();
            assert_eq!(reasons.iter().collect::<Vec<_>>(), [FailureReason::UnresolvedBase]);
        }
        assert_eq!(
            flat.iter().map(|r| r.name()).collect::<Vec<_>>(),
            [
                "ElementNotResolved",
                "LiteralValueNotResolved",
                "PropertyNotAssigned",
                "ValueFactoryNotResolved"
            ]
        );
        assert_eq!(resolved.strip(), document);
    }

    #[test]
    fn error_nodes_keep_their_message() {
        let document = DeclarativeDocument {
            source: SourceId::new("test.dcl"),
            content: vec![DocumentNode::Error(ErrorNode {
                message: "expected value".to_string(),
                source: source(0),
            })],
        };
        let resolved = resolve_document(&document, &Trace::new());
        assert!(resolved.has_failures());
        assert_eq!(resolved.failures().len(), 1);
        assert_eq!(resolved.strip(), document);
    }

    #[test]
    fn error_nodes_are_read_back_from_the_trace() {
        let mut trace = Trace::new();
        trace.reserve(NodeId(0));
        trace.record(NodeId(0), TraceEntry::Element(Err(ReasonSet::single(FailureReason::IsError))));
        trace.reserve(NodeId(1));
        trace.record(NodeId(1), TraceEntry::Element(Err(ReasonSet::single(FailureReason::UnresolvedSignature))));

        assert!(traced_as_error(&trace, source(0)));
        assert!(!traced_as_error(&trace, source(1)));
        assert!(!traced_as_error(&trace, source(2)));
    }
}
