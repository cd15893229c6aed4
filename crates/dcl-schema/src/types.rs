// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type references used by schema declarations.

use std::borrow::Borrow;
use std::fmt;

/// Name of a receiver (data class) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The declared or inferred type of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TypeRef {
    String,
    Int,
    Long,
    Boolean,
    Unit,
    /// The type of the `null` literal. Nothing is declared nullable, so it is
    /// never assignable.
    Null,
    Named(TypeName),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(TypeName::new(name))
    }

    /// Parse a type as written in a schema declaration. Any name that is not
    /// a built-in type refers to a data class.
    pub fn parse(text: &str) -> Self {
        match text {
            "String" => TypeRef::String,
            "Int" => TypeRef::Int,
            "Long" => TypeRef::Long,
            "Boolean" => TypeRef::Boolean,
            "Unit" => TypeRef::Unit,
            "Null" => TypeRef::Null,
            other => TypeRef::named(other),
        }
    }

    pub fn as_named(&self) -> Option<&TypeName> {
        match self {
            TypeRef::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl From<TypeName> for TypeRef {
    fn from(name: TypeName) -> Self {
        TypeRef::Named(name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::String => f.write_str("String"),
            TypeRef::Int => f.write_str("Int"),
            TypeRef::Long => f.write_str("Long"),
            TypeRef::Boolean => f.write_str("Boolean"),
            TypeRef::Unit => f.write_str("Unit"),
            TypeRef::Null => f.write_str("Null"),
            TypeRef::Named(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_builtin_and_named() {
        assert_eq!(TypeRef::parse("Int"), TypeRef::Int);
        assert_eq!(TypeRef::parse("Boolean"), TypeRef::Boolean);
        assert_eq!(TypeRef::parse("Project"), TypeRef::named("Project"));
        assert_eq!(TypeRef::parse("Project").to_string(), "Project");
    }
}
