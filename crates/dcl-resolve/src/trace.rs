// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The code resolver's output: one outcome per source node.

use std::collections::HashMap;
use std::sync::Arc;

use dcl_ast::{Literal, NodeId};
use dcl_schema::{FunctionSemantics, SchemaFunction, SchemaProperty, TypeName, TypeRef};

use crate::reason::ReasonSet;

/// What a call statement resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementTarget {
    /// An adding function: a new `element_type` element on `receiver`.
    Added {
        receiver: TypeName,
        element_type: TypeName,
        function: Arc<SchemaFunction>,
    },
    /// A configuring function: the block configures `configured_type`.
    Configured {
        receiver: TypeName,
        configured_type: TypeName,
        function: Arc<SchemaFunction>,
    },
}

impl ElementTarget {
    /// `None` for plain functions, which never produce elements.
    pub fn from_function(receiver: TypeName, function: Arc<SchemaFunction>) -> Option<Self> {
        match &function.semantics {
            FunctionSemantics::Adding { produced_type, .. } => Some(ElementTarget::Added {
                receiver,
                element_type: produced_type.clone(),
                function,
            }),
            FunctionSemantics::Configuring { configured_type } => Some(ElementTarget::Configured {
                receiver,
                configured_type: configured_type.clone(),
                function,
            }),
            FunctionSemantics::Plain => None,
        }
    }

    /// The receiver a trailing block resolves against.
    pub fn block_receiver(&self) -> &TypeName {
        match self {
            ElementTarget::Added { element_type, .. } => element_type,
            ElementTarget::Configured { configured_type, .. } => configured_type,
        }
    }

    pub fn function(&self) -> &Arc<SchemaFunction> {
        match self {
            ElementTarget::Added { function, .. } | ElementTarget::Configured { function, .. } => function,
        }
    }
}

/// What an assignment resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentTarget {
    pub receiver_type: TypeName,
    pub property: Arc<SchemaProperty>,
}

/// What a value expression resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTarget {
    Literal { value: Literal, ty: TypeRef },
    Factory { function: Arc<SchemaFunction> },
}

impl ValueTarget {
    pub fn value_type(&self) -> &TypeRef {
        match self {
            ValueTarget::Literal { ty, .. } => ty,
            ValueTarget::Factory { function } => &function.return_type,
        }
    }
}

pub type ElementOutcome = Result<ElementTarget, ReasonSet>;
pub type AssignmentOutcome = Result<AssignmentTarget, ReasonSet>;
pub type ValueOutcome = Result<ValueTarget, ReasonSet>;

#[derive(Debug, Clone, PartialEq)]
pub enum TraceEntry {
    Element(ElementOutcome),
    Assignment(AssignmentOutcome),
    Value(ValueOutcome),
}

impl TraceEntry {
    pub fn reasons(&self) -> Option<&ReasonSet> {
        match self {
            TraceEntry::Element(Err(reasons))
            | TraceEntry::Assignment(Err(reasons))
            | TraceEntry::Value(Err(reasons)) => Some(reasons),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.reasons().is_some()
    }
}

/// Outcomes keyed by source node, plus the order nodes appear in the source.
#[derive(Debug, Default)]
pub struct Trace {
    entries: HashMap<NodeId, TraceEntry>,
    order: Vec<NodeId>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a slot in source order before a node's children are visited.
    pub(crate) fn reserve(&mut self, id: NodeId) {
        self.order.push(id);
    }

    pub(crate) fn record(&mut self, id: NodeId, entry: TraceEntry) {
        self.entries.insert(id, entry);
    }

    pub fn get(&self, id: NodeId) -> Option<&TraceEntry> {
        self.entries.get(&id)
    }

    /// Entries in source order: outer before inner, left before right.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TraceEntry)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| (*id, entry)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_failure()).count()
    }
}
