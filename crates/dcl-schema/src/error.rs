// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Schema construction errors.

use thiserror::Error;

use crate::types::TypeName;

/// A schema that failed validation. Resolution never starts with an invalid
/// schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("top-level receiver `{0}` is not declared")]
    MissingTopLevel(TypeName),

    #[error("data class `{0}` is declared more than once")]
    DuplicateClass(TypeName),

    #[error("`{owner}` declares property `{name}` more than once")]
    DuplicateProperty { owner: TypeName, name: String },

    #[error("`{owner}` declares function `{signature}` more than once")]
    DuplicateOverload { owner: TypeName, signature: String },

    #[error("`{owner}.{member}` refers to unknown type `{ty}`")]
    UnknownType { owner: TypeName, member: String, ty: TypeName },

    #[error("`{owner}` has unknown supertype `{supertype}`")]
    UnknownSupertype { owner: TypeName, supertype: TypeName },

    #[error("supertype cycle through `{0}`")]
    SupertypeCycle(TypeName),

    #[error("`{owner}.{function}` must return `Unit` because it configures `{configured}`")]
    ConfiguringReturnsValue { owner: TypeName, function: String, configured: TypeName },
}
