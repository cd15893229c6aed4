// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement nodes.

use crate::expr::Expr;
use crate::{NodeId, SourceId, Span};

/// A parsed script: the root of the source tree.
#[derive(Debug, Clone)]
pub struct Script {
    pub source: SourceId,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// A statement in a script or a trailing block.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    pub span: Span,
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `name(args)`, `name(args) { ... }` or `name { ... }`
    Call(Call),
    /// `name = value`
    Assign { target: Ident, value: Expr },
    /// A statement the parser could not make sense of. The message is the
    /// parse error that produced it.
    Error { message: String },
}

/// A call statement with an optional trailing block.
#[derive(Debug, Clone)]
pub struct Call {
    pub name: Ident,
    pub args: Vec<Expr>,
    pub block: Option<Block>,
}

/// `{ ... }` following a call.
#[derive(Debug, Clone)]
pub struct Block {
    pub id: NodeId,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// A name together with where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl Stmt {
    /// Number of nodes in this statement, including values and nested blocks.
    pub fn node_count(&self) -> usize {
        1 + match &self.kind {
            StmtKind::Call(call) => {
                call.args.iter().map(Expr::node_count).sum::<usize>()
                    + call
                        .block
                        .as_ref()
                        .map(|b| b.statements.iter().map(Stmt::node_count).sum())
                        .unwrap_or(0)
            }
            StmtKind::Assign { value, .. } => value.node_count(),
            StmtKind::Error { .. } => 0,
        }
    }
}
