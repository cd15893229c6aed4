// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Serializable schema declarations.
//!
//! Tools that do not construct schemas in code (the CLI, editor plugins)
//! describe them as data. A declaration is only a different front door to
//! [`SchemaBuilder`]: it goes through exactly the same validation.
//!
//! ```json
//! {
//!   "top_level": "TopLevel",
//!   "classes": [
//!     {
//!       "name": "TopLevel",
//!       "properties": [{ "name": "version", "type": "String" }],
//!       "functions": [
//!         { "name": "lib", "parameters": ["String"], "kind": "adding", "produces": "Lib" }
//!       ]
//!     },
//!     { "name": "Lib" }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::builder::SchemaBuilder;
use crate::error::SchemaError;
use crate::model::{BlockRequirement, FunctionSemantics};
use crate::schema::Schema;
use crate::types::{TypeName, TypeRef};

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDeclaration {
    pub top_level: String,
    pub classes: Vec<DataClassDeclaration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataClassDeclaration {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,
    #[serde(default)]
    pub functions: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(flatten)]
    pub semantics: SemanticsDeclaration,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SemanticsDeclaration {
    Adding {
        produces: String,
        #[serde(default)]
        block: BlockRequirement,
    },
    Configuring {
        configures: String,
    },
    Plain {
        returns: String,
    },
}

impl SchemaDeclaration {
    pub fn into_builder(self) -> SchemaBuilder {
        let mut builder = SchemaBuilder::new(self.top_level);
        for class in self.classes {
            let class_builder = builder.data_class(class.name);
            for supertype in class.supertypes {
                class_builder.supertype(supertype);
            }
            for property in class.properties {
                class_builder.property_with(property.name, TypeRef::parse(&property.ty), property.hidden, property.read_only);
            }
            for function in class.functions {
                let params: Vec<TypeRef> = function.parameters.iter().map(|p| TypeRef::parse(p)).collect();
                let (return_type, semantics) = match function.semantics {
                    SemanticsDeclaration::Adding { produces, block } => {
                        let produced_type = TypeName::new(produces);
                        (TypeRef::Named(produced_type.clone()), FunctionSemantics::Adding { produced_type, block })
                    }
                    SemanticsDeclaration::Configuring { configures } => (
                        TypeRef::Unit,
                        FunctionSemantics::Configuring {
                            configured_type: TypeName::new(configures),
                        },
                    ),
                    SemanticsDeclaration::Plain { returns } => (TypeRef::parse(&returns), FunctionSemantics::Plain),
                };
                class_builder.function(function.name, params, return_type, semantics);
            }
        }
        builder
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        self.into_builder().build()
    }
}
