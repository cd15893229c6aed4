// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Receiver scope stack for the code resolver.

use dcl_schema::TypeName;

/// The receiver statements of one block resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiverScope {
    Receiver(TypeName),
    /// The block belongs to an element that failed to resolve.
    Unresolved,
}

/// A member found by walking the scope stack outward.
#[derive(Debug, Clone)]
pub struct ScopeLookup<T> {
    pub found: T,
    /// The receiver that declares the member.
    pub receiver: TypeName,
    /// Found on an enclosing receiver rather than the current one.
    pub cross_scope: bool,
}

/// Stack of receivers entered so far, innermost last.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<ReceiverScope>,
}

impl ScopeStack {
    pub fn new(top_level: TypeName) -> Self {
        Self {
            scopes: vec![ReceiverScope::Receiver(top_level)],
        }
    }

    pub fn push(&mut self, scope: ReceiverScope) {
        tracing::trace!(?scope, depth = self.scopes.len(), "enter block");
        self.scopes.push(scope);
    }

    /// Pop the innermost scope. The top-level receiver is never popped.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            let scope = self.scopes.pop();
            tracing::trace!(?scope, depth = self.scopes.len(), "leave block");
        }
    }

    pub fn current(&self) -> &ReceiverScope {
        // `new` seeds the stack and `pop` keeps the top-level scope.
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Search the current receiver first, then enclosing receivers outward.
    /// Returns `None` if the current scope is unresolved or nothing matches.
    pub fn lookup<T>(&self, mut find: impl FnMut(&TypeName) -> Option<T>) -> Option<ScopeLookup<T>> {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            let ReceiverScope::Receiver(receiver) = scope else {
                return None;
            };
            if let Some(found) = find(receiver) {
                return Some(ScopeLookup {
                    found,
                    receiver: receiver.clone(),
                    cross_scope: distance > 0,
                });
            }
        }
        None
    }
}
