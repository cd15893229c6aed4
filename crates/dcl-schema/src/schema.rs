// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The immutable, validated schema and its lookup tables.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{DataClass, SchemaFunction, SchemaProperty};
use crate::types::{TypeName, TypeRef};

/// Registry of receivers and their members.
///
/// All lookups are keyed by receiver and member name; nothing is re-scanned
/// during resolution. A `Schema` is `Send + Sync` and meant to be shared.
#[derive(Debug)]
pub struct Schema {
    top_level: TypeName,
    classes: Vec<DataClass>,
    class_index: HashMap<TypeName, usize>,
    functions: HashMap<TypeName, HashMap<String, Vec<Arc<SchemaFunction>>>>,
    properties: HashMap<TypeName, HashMap<String, Arc<SchemaProperty>>>,
    /// Transitive supertypes of every class, excluding the class itself.
    supertypes: HashMap<TypeName, Vec<TypeName>>,
}

impl Schema {
    /// Index already validated classes. Only the builder calls this.
    pub(crate) fn from_validated(
        top_level: TypeName,
        classes: Vec<DataClass>,
        supertypes: HashMap<TypeName, Vec<TypeName>>,
    ) -> Self {
        let mut class_index = HashMap::new();
        let mut functions: HashMap<TypeName, HashMap<String, Vec<Arc<SchemaFunction>>>> = HashMap::new();
        let mut properties: HashMap<TypeName, HashMap<String, Arc<SchemaProperty>>> = HashMap::new();

        for (idx, class) in classes.iter().enumerate() {
            class_index.insert(class.name.clone(), idx);

            let by_name = functions.entry(class.name.clone()).or_default();
            for function in &class.functions {
                by_name.entry(function.name.clone()).or_default().push(Arc::clone(function));
            }

            let by_name = properties.entry(class.name.clone()).or_default();
            for property in &class.properties {
                by_name.insert(property.name.clone(), Arc::clone(property));
            }
        }

        Self {
            top_level,
            classes,
            class_index,
            functions,
            properties,
            supertypes,
        }
    }

    /// The receiver top-level statements resolve against.
    pub fn top_level_receiver(&self) -> &TypeName {
        &self.top_level
    }

    pub fn data_class(&self, name: &str) -> Option<&DataClass> {
        self.class_index.get(name).map(|&idx| &self.classes[idx])
    }

    /// All classes in declaration order.
    pub fn data_classes(&self) -> impl Iterator<Item = &DataClass> {
        self.classes.iter()
    }

    /// Overloads of `name` declared on `receiver`, in declaration order.
    pub fn functions_named(&self, receiver: &str, name: &str) -> &[Arc<SchemaFunction>] {
        self.functions
            .get(receiver)
            .and_then(|by_name| by_name.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn property(&self, receiver: &str, name: &str) -> Option<&Arc<SchemaProperty>> {
        self.properties.get(receiver)?.get(name)
    }

    /// Properties an author may be told about: everything except hidden ones.
    pub fn visible_properties<'a>(&'a self, receiver: &str) -> impl Iterator<Item = &'a SchemaProperty> + 'a {
        self.data_class(receiver)
            .into_iter()
            .flat_map(|class| class.properties.iter())
            .filter(|p| !p.hidden)
            .map(|p| p.as_ref())
    }

    /// Distinct function names of `receiver`, in declaration order.
    pub fn function_names(&self, receiver: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        if let Some(class) = self.data_class(receiver) {
            for function in &class.functions {
                if !names.contains(&function.name.as_str()) {
                    names.push(&function.name);
                }
            }
        }
        names
    }

    /// True if `sub` is `sup` or declares it as a (transitive) supertype.
    pub fn is_subtype(&self, sub: &TypeName, sup: &TypeName) -> bool {
        sub == sup
            || self
                .supertypes
                .get(sub)
                .is_some_and(|supers| supers.contains(sup))
    }

    /// Structural assignability of a value of type `from` to a slot of type `to`.
    pub fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        match (from, to) {
            (TypeRef::Null, _) => false,
            (TypeRef::Int, TypeRef::Long) => true,
            (TypeRef::Named(sub), TypeRef::Named(sup)) => self.is_subtype(sub, sup),
            (from, to) => from == to,
        }
    }
}
