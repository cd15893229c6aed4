// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Value expression nodes.

use crate::stmt::Ident;
use crate::{NodeId, Span};

/// A value: the right-hand side of an assignment or a call argument.
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

/// The kind of value expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    Literal(Literal),
    /// Value factory invocation, e.g. `file("build")`.
    Call { name: Ident, args: Vec<Expr> },
}

/// A literal value as written in the script.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    String(String),
    Int(i64),
    Long(i64),
    Bool(bool),
    Null,
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(s) => f.write_str(s),
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Long(v) => write!(f, "{}L", v),
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl Expr {
    pub fn node_count(&self) -> usize {
        match &self.kind {
            ExprKind::Literal(_) => 1,
            ExprKind::Call { args, .. } => 1 + args.iter().map(Expr::node_count).sum::<usize>(),
        }
    }
}
