// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Schema-agnostic document model.
//!
//! A [`DeclarativeDocument`] mirrors the structure of a script one-to-one:
//! calls become elements, assignments become properties, and statements the
//! parser rejected are kept as opaque error nodes. Building a document never
//! consults a schema, so the same text always yields the same document.

mod builder;
mod node;
mod printer;

pub use builder::build_document;
pub use node::{
    DeclarativeDocument, DocumentNode, ElementNode, ErrorNode, LiteralValueNode, PropertyNode, SourceData,
    ValueFactoryNode, ValueNode,
};
pub use printer::DocumentPrinter;
