// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Receivers, functions and properties.

use std::fmt;
use std::sync::Arc;

use crate::types::{TypeName, TypeRef};

/// Whether an adding function accepts a trailing configuration block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRequirement {
    NotAllowed,
    #[default]
    Allowed,
    Required,
}

impl BlockRequirement {
    pub fn accepts(self, has_block: bool) -> bool {
        match self {
            BlockRequirement::NotAllowed => !has_block,
            BlockRequirement::Allowed => true,
            BlockRequirement::Required => has_block,
        }
    }
}

/// The role a function plays in a script, assigned when the schema is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionSemantics {
    /// Produces a new element of `produced_type`. A trailing block configures
    /// that element.
    Adding {
        produced_type: TypeName,
        block: BlockRequirement,
    },
    /// Redirects a trailing block onto an existing nested receiver.
    Configuring { configured_type: TypeName },
    /// A value factory, usable in value position only.
    Plain,
}

impl FunctionSemantics {
    pub fn is_element(&self) -> bool {
        !matches!(self, FunctionSemantics::Plain)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FunctionSemantics::Adding { .. } => "element",
            FunctionSemantics::Configuring { .. } => "configure",
            FunctionSemantics::Plain => "factory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: Option<String>,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(ty: TypeRef) -> Self {
        Self { name: None, ty }
    }
}

/// A function callable on a receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFunction {
    pub receiver: TypeName,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeRef,
    pub semantics: FunctionSemantics,
}

impl SchemaFunction {
    pub fn parameter_types(&self) -> impl Iterator<Item = &TypeRef> + '_ {
        self.parameters.iter().map(|p| &p.ty)
    }

    /// `name(Param, ...): Return`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.parameter_types().map(ToString::to_string).collect();
        format!("{}({}): {}", self.name, params.join(", "), self.return_type)
    }
}

impl fmt::Display for SchemaFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.receiver, self.signature())
    }
}

/// An assignable property of a receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaProperty {
    pub owner: TypeName,
    pub name: String,
    pub ty: TypeRef,
    /// Hidden properties resolve normally but are never suggested to authors.
    pub hidden: bool,
    pub read_only: bool,
}

impl fmt::Display for SchemaProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.owner, self.name, self.ty)
    }
}

/// A receiver type together with its members, in declaration order.
#[derive(Debug, Clone)]
pub struct DataClass {
    pub name: TypeName,
    pub supertypes: Vec<TypeName>,
    pub properties: Vec<Arc<SchemaProperty>>,
    pub functions: Vec<Arc<SchemaFunction>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_rendering() {
        let function = SchemaFunction {
            receiver: TypeName::new("TopLevel"),
            name: "addAndConfigure".to_string(),
            parameters: vec![Parameter::new(TypeRef::String)],
            return_type: TypeRef::named("T"),
            semantics: FunctionSemantics::Adding {
                produced_type: TypeName::new("T"),
                block: BlockRequirement::Allowed,
            },
        };
        assert_eq!(function.signature(), "addAndConfigure(String): T");
        assert_eq!(function.to_string(), "TopLevel.addAndConfigure(String): T");
    }

    #[test]
    fn block_requirements() {
        assert!(BlockRequirement::Allowed.accepts(true));
        assert!(BlockRequirement::Allowed.accepts(false));
        assert!(!BlockRequirement::NotAllowed.accepts(true));
        assert!(!BlockRequirement::Required.accepts(false));
    }
}
