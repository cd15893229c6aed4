// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source tree types for the declarative configuration language.
//!
//! This crate defines the nodes shared between the lexer, parser, document
//! builder and the schema-aware resolver. The tree is produced once per
//! script and never mutated afterwards.

pub mod span;
pub mod token;
pub mod stmt;
pub mod expr;

pub use span::{LineMap, SourceId, Span};
pub use stmt::{Block, Call, Ident, Script, Stmt, StmtKind};
pub use expr::{Expr, ExprKind, Literal};

/// Unique identifier for source tree nodes.
///
/// Used by the resolver to key its trace and by the document builder to
/// remember which source node a document node originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
