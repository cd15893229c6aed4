// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Schema-aware resolution for the declarative configuration language.
//!
//! Resolution runs in two stages. The [`CodeResolver`] walks a parsed
//! [`Script`] against a [`Schema`] and produces a [`Trace`]: one outcome per
//! statement and value. [`resolve_document`] then merges that trace into the
//! schema-agnostic document, giving a [`ResolvedDocument`] with the same shape
//! where every node carries its resolution.
//!
//! Semantic problems never surface as `Err`. They are failure variants in the
//! resolved document, each carrying a [`ReasonSet`].

mod document;
mod reason;
mod resolution;
mod resolver;
mod scope;
mod settings;
mod trace;

pub use document::{
    resolve_document, ResolvedDocument, ResolvedElementNode, ResolvedErrorNode, ResolvedLiteralNode, ResolvedNode,
    ResolvedPropertyNode, ResolvedValueFactoryNode, ResolvedValueNode,
};
pub use reason::{FailureReason, ReasonSet};
pub use resolution::{DocumentResolution, ElementResolution, ErrorResolution, PropertyResolution, ValueResolution};
pub use resolver::CodeResolver;
pub use scope::{ReceiverScope, ScopeLookup, ScopeStack};
pub use settings::ResolverSettings;
pub use trace::{
    AssignmentOutcome, AssignmentTarget, ElementOutcome, ElementTarget, Trace, TraceEntry, ValueOutcome, ValueTarget,
};

use dcl_ast::Script;
use dcl_document::{build_document, DeclarativeDocument};
use dcl_schema::Schema;

/// Run the code resolver over `script`.
pub fn resolve(schema: &Schema, script: &Script, settings: ResolverSettings) -> Trace {
    CodeResolver::new(schema, settings).resolve(script)
}

/// Every artifact of one resolution session.
#[derive(Debug)]
pub struct Resolution {
    pub document: DeclarativeDocument,
    pub trace: Trace,
    pub resolved: ResolvedDocument,
}

/// Build the document, resolve the script and merge the two.
pub fn resolve_script(schema: &Schema, script: &Script, settings: ResolverSettings) -> Resolution {
    let document = build_document(script);
    let trace = resolve(schema, script, settings);
    let resolved = resolve_document(&document, &trace);
    Resolution {
        document,
        trace,
        resolved,
    }
}
