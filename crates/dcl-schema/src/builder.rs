// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Explicit schema construction.
//!
//! Receivers and their members are registered by value; [`SchemaBuilder::build`]
//! validates every declaration once so the resolver can trust the shape of
//! each function and property.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::SchemaError;
use crate::model::{BlockRequirement, DataClass, FunctionSemantics, Parameter, SchemaFunction, SchemaProperty};
use crate::schema::Schema;
use crate::types::{TypeName, TypeRef};

/// Collects data class declarations and turns them into a [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    top_level: TypeName,
    classes: Vec<DataClassBuilder>,
}

/// Members of one data class under construction.
#[derive(Debug, Clone)]
pub struct DataClassBuilder {
    name: TypeName,
    supertypes: Vec<TypeName>,
    properties: Vec<SchemaProperty>,
    functions: Vec<SchemaFunction>,
}

impl SchemaBuilder {
    pub fn new(top_level: impl Into<String>) -> Self {
        Self {
            top_level: TypeName::new(top_level),
            classes: Vec::new(),
        }
    }

    /// Start declaring a data class. Declaring the same name twice is an
    /// error reported by [`build`](Self::build).
    pub fn data_class(&mut self, name: impl Into<String>) -> &mut DataClassBuilder {
        self.classes.push(DataClassBuilder {
            name: TypeName::new(name),
            supertypes: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
        });
        let last = self.classes.len() - 1;
        &mut self.classes[last]
    }

    /// Validate all declarations and index them.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut known: HashSet<TypeName> = HashSet::new();
        for class in &self.classes {
            if !known.insert(class.name.clone()) {
                return Err(SchemaError::DuplicateClass(class.name.clone()));
            }
        }
        if !known.contains(&self.top_level) {
            return Err(SchemaError::MissingTopLevel(self.top_level));
        }

        for class in &self.classes {
            class.validate(&known)?;
        }

        let supertypes = supertype_closure(&self.classes)?;

        let classes: Vec<DataClass> = self.classes.into_iter().map(DataClassBuilder::finish).collect();
        tracing::debug!(
            top_level = %self.top_level,
            classes = classes.len(),
            "schema built"
        );
        Ok(Schema::from_validated(self.top_level, classes, supertypes))
    }
}

impl DataClassBuilder {
    pub fn supertype(&mut self, name: impl Into<String>) -> &mut Self {
        self.supertypes.push(TypeName::new(name));
        self
    }

    pub fn property(&mut self, name: impl Into<String>, ty: TypeRef) -> &mut Self {
        self.push_property(name.into(), ty, false, false)
    }

    /// A property that resolves but is never suggested to authors.
    pub fn hidden_property(&mut self, name: impl Into<String>, ty: TypeRef) -> &mut Self {
        self.push_property(name.into(), ty, true, false)
    }

    pub fn read_only_property(&mut self, name: impl Into<String>, ty: TypeRef) -> &mut Self {
        self.push_property(name.into(), ty, false, true)
    }

    /// Register a property with every flag spelled out.
    pub fn property_with(&mut self, name: impl Into<String>, ty: TypeRef, hidden: bool, read_only: bool) -> &mut Self {
        self.push_property(name.into(), ty, hidden, read_only)
    }

    /// A function that adds a new `produced` element to this receiver.
    pub fn adding(
        &mut self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeRef>,
        produced: impl Into<String>,
        block: BlockRequirement,
    ) -> &mut Self {
        let produced_type = TypeName::new(produced);
        self.function(
            name,
            params,
            TypeRef::Named(produced_type.clone()),
            FunctionSemantics::Adding { produced_type, block },
        )
    }

    /// A block-taking function that configures the nested `configured` receiver.
    pub fn configuring(&mut self, name: impl Into<String>, configured: impl Into<String>) -> &mut Self {
        self.function(
            name,
            [],
            TypeRef::Unit,
            FunctionSemantics::Configuring {
                configured_type: TypeName::new(configured),
            },
        )
    }

    /// A value factory callable in value position.
    pub fn factory(&mut self, name: impl Into<String>, params: impl IntoIterator<Item = TypeRef>, returns: TypeRef) -> &mut Self {
        self.function(name, params, returns, FunctionSemantics::Plain)
    }

    pub fn function(
        &mut self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeRef>,
        return_type: TypeRef,
        semantics: FunctionSemantics,
    ) -> &mut Self {
        self.functions.push(SchemaFunction {
            receiver: self.name.clone(),
            name: name.into(),
            parameters: params.into_iter().map(Parameter::new).collect(),
            return_type,
            semantics,
        });
        self
    }

    fn push_property(&mut self, name: String, ty: TypeRef, hidden: bool, read_only: bool) -> &mut Self {
        self.properties.push(SchemaProperty {
            owner: self.name.clone(),
            name,
            ty,
            hidden,
            read_only,
        });
        self
    }

    fn validate(&self, known: &HashSet<TypeName>) -> Result<(), SchemaError> {
        let unknown = |member: &str, ty: &TypeName| SchemaError::UnknownType {
            owner: self.name.clone(),
            member: member.to_string(),
            ty: ty.clone(),
        };

        for supertype in &self.supertypes {
            if !known.contains(supertype) {
                return Err(SchemaError::UnknownSupertype {
                    owner: self.name.clone(),
                    supertype: supertype.clone(),
                });
            }
        }

        let mut property_names = HashSet::new();
        for property in &self.properties {
            if !property_names.insert(property.name.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    owner: self.name.clone(),
                    name: property.name.clone(),
                });
            }
            if let Some(ty) = property.ty.as_named().filter(|ty| !known.contains(*ty)) {
                return Err(unknown(&property.name, ty));
            }
        }

        let mut overloads: HashSet<(&str, Vec<&TypeRef>)> = HashSet::new();
        for function in &self.functions {
            let referenced = function
                .parameter_types()
                .chain(std::iter::once(&function.return_type))
                .filter_map(TypeRef::as_named);
            let target = match &function.semantics {
                FunctionSemantics::Adding { produced_type, .. } => Some(produced_type),
                FunctionSemantics::Configuring { configured_type } => Some(configured_type),
                FunctionSemantics::Plain => None,
            };
            if let Some(ty) = referenced.chain(target).find(|ty| !known.contains(*ty)) {
                return Err(unknown(&function.name, ty));
            }

            if let FunctionSemantics::Configuring { configured_type } = &function.semantics {
                if function.return_type != TypeRef::Unit {
                    return Err(SchemaError::ConfiguringReturnsValue {
                        owner: self.name.clone(),
                        function: function.name.clone(),
                        configured: configured_type.clone(),
                    });
                }
            }

            if !overloads.insert((function.name.as_str(), function.parameter_types().collect())) {
                return Err(SchemaError::DuplicateOverload {
                    owner: self.name.clone(),
                    signature: function.signature(),
                });
            }
        }

        Ok(())
    }

    fn finish(self) -> DataClass {
        DataClass {
            name: self.name,
            supertypes: self.supertypes,
            properties: self.properties.into_iter().map(Arc::new).collect(),
            functions: self.functions.into_iter().map(Arc::new).collect(),
        }
    }
}

/// Transitive supertypes for every class, rejecting cycles.
fn supertype_closure(classes: &[DataClassBuilder]) -> Result<HashMap<TypeName, Vec<TypeName>>, SchemaError> {
    let direct: HashMap<&TypeName, &[TypeName]> = classes
        .iter()
        .map(|c| (&c.name, c.supertypes.as_slice()))
        .collect();

    let mut closure = HashMap::new();
    for class in classes {
        let mut reached: Vec<TypeName> = Vec::new();
        let mut pending: Vec<&TypeName> = class.supertypes.iter().collect();
        while let Some(next) = pending.pop() {
            if next == &class.name {
                return Err(SchemaError::SupertypeCycle(class.name.clone()));
            }
            if reached.contains(next) {
                continue;
            }
            reached.push(next.clone());
            if let Some(supers) = direct.get(next) {
                pending.extend(supers.iter());
            }
        }
        closure.insert(class.name.clone(), reached);
    }
    Ok(closure)
}
