// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resolution outcomes attached to resolved document nodes.
//!
//! One small enum per axis (elements, properties, values), each either a
//! success payload or a [`ReasonSet`]. Variant names double as the labels the
//! diagnostics renderer prints, so they are part of the stable vocabulary.

use std::sync::Arc;

use dcl_ast::Literal;
use dcl_schema::{SchemaFunction, SchemaProperty, TypeName};

use crate::reason::ReasonSet;

#[derive(Debug, Clone, PartialEq)]
pub enum ElementResolution {
    ContainerElementResolved {
        element_type: TypeName,
        function: Arc<SchemaFunction>,
    },
    PropertyConfiguringElementResolved {
        configured_type: TypeName,
        function: Arc<SchemaFunction>,
    },
    ElementNotResolved(ReasonSet),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyResolution {
    PropertyAssignmentResolved {
        receiver_type: TypeName,
        property: Arc<SchemaProperty>,
    },
    PropertyNotAssigned(ReasonSet),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueResolution {
    LiteralValueResolved { value: Literal },
    LiteralValueNotResolved(ReasonSet),
    ValueFactoryResolved { function: Arc<SchemaFunction> },
    ValueFactoryNotResolved(ReasonSet),
}

/// Resolution of a node the parser already rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorResolution;

impl ElementResolution {
    pub fn name(&self) -> &'static str {
        match self {
            ElementResolution::ContainerElementResolved { .. } => "ContainerElementResolved",
            ElementResolution::PropertyConfiguringElementResolved { .. } => "PropertyConfiguringElementResolved",
            ElementResolution::ElementNotResolved(_) => "ElementNotResolved",
        }
    }

    pub fn reasons(&self) -> Option<&ReasonSet> {
        match self {
            ElementResolution::ElementNotResolved(reasons) => Some(reasons),
            _ => None,
        }
    }
}

impl PropertyResolution {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyResolution::PropertyAssignmentResolved { .. } => "PropertyAssignmentResolved",
            PropertyResolution::PropertyNotAssigned(_) => "PropertyNotAssigned",
        }
    }

    pub fn reasons(&self) -> Option<&ReasonSet> {
        match self {
            PropertyResolution::PropertyNotAssigned(reasons) => Some(reasons),
            _ => None,
        }
    }
}

impl ValueResolution {
    pub fn name(&self) -> &'static str {
        match self {
            ValueResolution::LiteralValueResolved { .. } => "LiteralValueResolved",
            ValueResolution::LiteralValueNotResolved(_) => "LiteralValueNotResolved",
            ValueResolution::ValueFactoryResolved { .. } => "ValueFactoryResolved",
            ValueResolution::ValueFactoryNotResolved(_) => "ValueFactoryNotResolved",
        }
    }

    pub fn reasons(&self) -> Option<&ReasonSet> {
        match self {
            ValueResolution::LiteralValueNotResolved(reasons) | ValueResolution::ValueFactoryNotResolved(reasons) => {
                Some(reasons)
            }
            _ => None,
        }
    }
}

/// A borrowed view over any node's resolution, used when walking a resolved
/// document without caring which axis a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentResolution<'a> {
    Element(&'a ElementResolution),
    Property(&'a PropertyResolution),
    Value(&'a ValueResolution),
    Error(&'a ErrorResolution),
}

impl<'a> DocumentResolution<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            DocumentResolution::Element(resolution) => resolution.name(),
            DocumentResolution::Property(resolution) => resolution.name(),
            DocumentResolution::Value(resolution) => resolution.name(),
            DocumentResolution::Error(_) => "ErrorResolution",
        }
    }

    pub fn reasons(&self) -> Option<&'a ReasonSet> {
        match *self {
            DocumentResolution::Element(resolution) => resolution.reasons(),
            DocumentResolution::Property(resolution) => resolution.reasons(),
            DocumentResolution::Value(resolution) => resolution.reasons(),
            DocumentResolution::Error(_) => None,
        }
    }

    /// Error nodes count as failures even though they carry no reasons.
    pub fn is_failure(&self) -> bool {
        matches!(self, DocumentResolution::Error(_)) || self.reasons().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::FailureReason;

    #[test]
    fn names_match_variants() {
        let failed = ElementResolution::ElementNotResolved(ReasonSet::single(FailureReason::UnresolvedSignature));
        assert_eq!(failed.name(), "ElementNotResolved");
        assert!(DocumentResolution::Element(&failed).is_failure());

        let literal = ValueResolution::LiteralValueResolved {
            value: Literal::Int(1),
        };
        assert_eq!(DocumentResolution::Value(&literal).name(), "LiteralValueResolved");
        assert!(!DocumentResolution::Value(&literal).is_failure());
    }

    #[test]
    fn error_nodes_are_failures_without_reasons() {
        let view = DocumentResolution::Error(&ErrorResolution);
        assert!(view.is_failure());
        assert!(view.reasons().is_none());
        assert_eq!(view.name(), "ErrorResolution");
    }
}
