// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Schema model for declarative scripts.
//!
//! A [`Schema`] describes which receivers exist, which functions can be called
//! on each of them and which properties can be assigned. It is assembled with
//! a [`SchemaBuilder`], validated once, and then shared read-only by any number
//! of resolution sessions.

mod builder;
mod declaration;
mod error;
mod model;
mod schema;
mod types;

pub use builder::{DataClassBuilder, SchemaBuilder};
pub use declaration::{DataClassDeclaration, FunctionDeclaration, PropertyDeclaration, SchemaDeclaration, SemanticsDeclaration};
pub use error::SchemaError;
pub use model::{BlockRequirement, DataClass, FunctionSemantics, Parameter, SchemaFunction, SchemaProperty};
pub use schema::Schema;
pub use types::{TypeName, TypeRef};
