// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The schema-aware code resolver.

use std::sync::Arc;

use dcl_ast::{Call, Expr, ExprKind, Ident, Literal, Script, Stmt, StmtKind};
use dcl_schema::{FunctionSemantics, Schema, SchemaFunction, TypeName, TypeRef};

use crate::reason::{FailureReason, ReasonSet};
use crate::scope::{ReceiverScope, ScopeStack};
use crate::settings::ResolverSettings;
use crate::trace::{AssignmentTarget, ElementOutcome, ElementTarget, Trace, TraceEntry, ValueOutcome, ValueTarget};

/// Where a call appears, which decides the functions it may bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallSite {
    /// A statement; binds to adding and configuring functions.
    Statement { has_block: bool },
    /// A value expression; binds to plain functions.
    Value,
}

impl CallSite {
    fn admits(self, function: &SchemaFunction) -> bool {
        match self {
            CallSite::Statement { .. } => function.semantics.is_element(),
            CallSite::Value => !function.semantics.is_element(),
        }
    }

    fn accepts_block(self, function: &SchemaFunction) -> bool {
        match (self, &function.semantics) {
            (CallSite::Statement { has_block }, FunctionSemantics::Adding { block, .. }) => block.accepts(has_block),
            _ => true,
        }
    }
}

/// Walks a script depth-first in source order and records an outcome for
/// every statement and value.
///
/// A resolver is consumed by [`resolve`](Self::resolve); resolving another
/// script needs a new instance.
pub struct CodeResolver<'s> {
    schema: &'s Schema,
    settings: ResolverSettings,
    scopes: ScopeStack,
    trace: Trace,
}

impl<'s> CodeResolver<'s> {
    pub fn new(schema: &'s Schema, settings: ResolverSettings) -> Self {
        Self {
            schema,
            settings,
            scopes: ScopeStack::new(schema.top_level_receiver().clone()),
            trace: Trace::new(),
        }
    }

    pub fn resolve(mut self, script: &Script) -> Trace {
        for stmt in &script.statements {
            self.statement(stmt);
        }
        tracing::debug!(
            source = %script.source,
            nodes = self.trace.len(),
            failures = self.trace.failure_count(),
            "resolved script"
        );
        self.trace
    }

    fn statement(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Call(call) => self.element(stmt, call),
            StmtKind::Assign { target, value } => self.assignment(stmt, target, value),
            StmtKind::Error { .. } => {
                self.trace.reserve(stmt.id);
                self.trace.record(
                    stmt.id,
                    TraceEntry::Element(Err(ReasonSet::single(FailureReason::IsError))),
                );
            }
        }
    }

    fn element(&mut self, stmt: &Stmt, call: &Call) {
        self.trace.reserve(stmt.id);
        let arg_types: Vec<Option<TypeRef>> = call.args.iter().map(|arg| self.value(arg)).collect();

        let outcome: ElementOutcome = match self.scopes.current() {
            ReceiverScope::Unresolved => Err(ReasonSet::single(FailureReason::UnresolvedBase)),
            ReceiverScope::Receiver(_) => {
                let site = CallSite::Statement {
                    has_block: call.block.is_some(),
                };
                self.select_function(&call.name, site, &arg_types)
                    .and_then(|(receiver, function)| {
                        ElementTarget::from_function(receiver, function).ok_or(FailureReason::UnresolvedSignature)
                    })
                    .map_err(ReasonSet::single)
            }
        };
        tracing::debug!(name = %call.name.name, ?outcome, "element");

        let block_scope = match &outcome {
            Ok(target) => ReceiverScope::Receiver(target.block_receiver().clone()),
            Err(_) => ReceiverScope::Unresolved,
        };
        self.trace.record(stmt.id, TraceEntry::Element(outcome));

        if let Some(block) = &call.block {
            self.scopes.push(block_scope);
            for inner in &block.statements {
                self.statement(inner);
            }
            self.scopes.pop();
        }
    }

    fn assignment(&mut self, stmt: &Stmt, target: &Ident, value: &Expr) {
        self.trace.reserve(stmt.id);
        let mut reasons = ReasonSet::new();

        let base_resolved = matches!(self.scopes.current(), ReceiverScope::Receiver(_));
        let lookup = if base_resolved {
            self.scopes
                .lookup(|receiver| self.schema.property(receiver.as_str(), &target.name).cloned())
        } else {
            reasons.insert(FailureReason::UnresolvedBase);
            None
        };

        if let Some(found) = &lookup {
            if found.cross_scope && self.settings.strict_receiver_checks {
                reasons.insert(FailureReason::CrossScopeAccess);
            }
            if found.found.read_only {
                reasons.insert(FailureReason::ReadOnlyProperty);
            }
        } else if base_resolved {
            reasons.insert(FailureReason::UnresolvedSignature);
        }

        let value_type = self.value(value);
        if base_resolved {
            match (&value_type, &lookup) {
                (None, _) => {
                    reasons.insert(FailureReason::IsError);
                }
                (Some(ty), Some(found)) if !self.schema.is_assignable(ty, &found.found.ty) => {
                    reasons.insert(FailureReason::ValueTypeMismatch);
                }
                _ => {}
            }
        }

        let outcome = match lookup {
            Some(found) if reasons.is_empty() => Ok(AssignmentTarget {
                receiver_type: found.receiver,
                property: found.found,
            }),
            _ => Err(reasons),
        };
        tracing::debug!(name = %target.name, ?outcome, "assignment");
        self.trace.record(stmt.id, TraceEntry::Assignment(outcome));
    }

    /// Resolve a value and its arguments; returns the value's type if it resolved.
    fn value(&mut self, expr: &Expr) -> Option<TypeRef> {
        self.trace.reserve(expr.id);

        let outcome: ValueOutcome = match &expr.kind {
            ExprKind::Literal(literal) => Ok(ValueTarget::Literal {
                value: literal.clone(),
                ty: literal_type(literal),
            }),
            ExprKind::Call { name, args } => {
                let arg_types: Vec<Option<TypeRef>> = args.iter().map(|arg| self.value(arg)).collect();
                match self.scopes.current() {
                    ReceiverScope::Unresolved => Err(ReasonSet::single(FailureReason::UnresolvedBase)),
                    ReceiverScope::Receiver(_) => self
                        .select_function(name, CallSite::Value, &arg_types)
                        .map(|(_, function)| ValueTarget::Factory { function })
                        .map_err(ReasonSet::single),
                }
            }
        };

        let ty = outcome.as_ref().ok().map(|target| target.value_type().clone());
        self.trace.record(expr.id, TraceEntry::Value(outcome));
        ty
    }

    /// Find the single function `name` binds to at `site`, searching the
    /// current receiver first and enclosing receivers after it.
    fn select_function(
        &self,
        name: &Ident,
        site: CallSite,
        arg_types: &[Option<TypeRef>],
    ) -> Result<(TypeName, Arc<SchemaFunction>), FailureReason> {
        let lookup = self.scopes.lookup(|receiver| {
            let candidates: Vec<Arc<SchemaFunction>> = self
                .schema
                .functions_named(receiver.as_str(), &name.name)
                .iter()
                .filter(|f| site.admits(f))
                .cloned()
                .collect();
            (!candidates.is_empty()).then_some(candidates)
        });
        let Some(lookup) = lookup else {
            return Err(FailureReason::UnresolvedSignature);
        };

        let Some(arg_types) = arg_types.iter().cloned().collect::<Option<Vec<TypeRef>>>() else {
            return Err(FailureReason::UnresolvedSignature);
        };

        let matching: Vec<Arc<SchemaFunction>> = lookup
            .found
            .iter()
            .filter(|f| site.accepts_block(f) && self.arguments_match(f, &arg_types))
            .cloned()
            .collect();
        let function = match matching.len() {
            0 => return Err(FailureReason::UnresolvedSignature),
            1 => Arc::clone(&matching[0]),
            candidates => {
                let mut exact = matching
                    .iter()
                    .filter(|f| f.parameter_types().eq(arg_types.iter()));
                match (exact.next(), exact.next()) {
                    (Some(function), None) => Arc::clone(function),
                    _ => {
                        tracing::debug!(name = %name.name, candidates, "ambiguous call");
                        return Err(FailureReason::UnresolvedSignature);
                    }
                }
            }
        };

        if lookup.cross_scope && self.settings.strict_receiver_checks {
            tracing::debug!(
                name = %name.name,
                declared_on = %lookup.receiver,
                "rejected member of an enclosing receiver"
            );
            return Err(FailureReason::CrossScopeAccess);
        }
        Ok((lookup.receiver, function))
    }

    fn arguments_match(&self, function: &SchemaFunction, arg_types: &[TypeRef]) -> bool {
        function.parameters.len() == arg_types.len()
            && function
                .parameter_types()
                .zip(arg_types)
                .all(|(param, arg)| self.schema.is_assignable(arg, param))
    }
}

fn literal_type(literal: &Literal) -> TypeRef {
    match literal {
        Literal::String(_) => TypeRef::String,
        Literal::Int(_) => TypeRef::Int,
        Literal::Long(_) => TypeRef::Long,
        Literal::Bool(_) => TypeRef::Boolean,
        Literal::Null => TypeRef::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcl_ast::SourceId;
    use dcl_parser::parse_source;
    use dcl_schema::{BlockRequirement, SchemaBuilder};

    fn schema() -> Schema {
        let mut builder = SchemaBuilder::new("Top");
        builder
            .data_class("Top")
            .adding("item", [TypeRef::String], "Item", BlockRequirement::Allowed)
            .adding("item", [TypeRef::Int], "Item", BlockRequirement::Allowed)
            .adding("marker", [], "Item", BlockRequirement::NotAllowed)
            .configuring("settings", "Settings")
            .factory("point", [TypeRef::Int, TypeRef::Int], TypeRef::named("Point"))
            .property("name", TypeRef::String);
        builder.data_class("Item").property("size", TypeRef::Long);
        builder.data_class("Settings").property("verbose", TypeRef::Boolean);
        builder.data_class("Point");
        builder.build().unwrap()
    }

    fn trace(src: &str, settings: ResolverSettings) -> Trace {
        let schema = schema();
        let parsed = parse_source(SourceId::new("test.dcl"), src);
        CodeResolver::new(&schema, settings).resolve(&parsed.script)
    }

    fn reasons(trace: &Trace) -> Vec<Option<Vec<FailureReason>>> {
        trace
            .iter()
            .map(|(_, entry)| entry.reasons().map(|r| r.iter().collect()))
            .collect()
    }

    #[test]
    fn overloads_are_chosen_by_argument_type() {
        let trace = trace("item(\"a\")\nitem(1)", ResolverSettings::default());
        let functions: Vec<String> = trace
            .iter()
            .filter_map(|(_, entry)| match entry {
                TraceEntry::Element(Ok(target)) => Some(target.function().signature()),
                _ => None,
            })
            .collect();
        assert_eq!(functions, ["item(String): Item", "item(Int): Item"]);
    }

    #[test]
    fn block_requirement_is_part_of_the_signature() {
        let trace = trace("marker { size = 1 }", ResolverSettings::default());
        assert_eq!(
            reasons(&trace),
            [
                Some(vec![FailureReason::UnresolvedSignature]),
                Some(vec![FailureReason::UnresolvedBase]),
                None,
            ]
        );
    }

    #[test]
    fn configuring_block_targets_the_configured_receiver() {
        let trace = trace("settings { verbose = true }", ResolverSettings::default());
        let entries: Vec<&TraceEntry> = trace.iter().map(|(_, e)| e).collect();
        assert!(matches!(
            entries[0],
            TraceEntry::Element(Ok(ElementTarget::Configured { configured_type, .. }))
                if configured_type.as_str() == "Settings"
        ));
        assert!(matches!(
            entries[1],
            TraceEntry::Assignment(Ok(AssignmentTarget { receiver_type, .. }))
                if receiver_type.as_str() == "Settings"
        ));
    }

    #[test]
    fn int_literal_widens_to_long_property() {
        let trace = trace("item(\"a\") { size = 4 }", ResolverSettings::default());
        assert!(trace.iter().all(|(_, entry)| !entry.is_failure()));
    }

    #[test]
    fn factory_arguments_resolve_before_the_factory() {
        let trace = trace("item(point(1, 2))", ResolverSettings::default());
        assert_eq!(trace.len(), 4);
        let kinds: Vec<&str> = trace
            .iter()
            .map(|(_, entry)| match entry {
                TraceEntry::Element(_) => "element",
                TraceEntry::Assignment(_) => "assignment",
                TraceEntry::Value(Ok(ValueTarget::Factory { .. })) => "factory",
                TraceEntry::Value(_) => "value",
            })
            .collect();
        // `item(Point)` does not exist, so the element fails but values resolve.
        assert_eq!(kinds, ["element", "factory", "value", "value"]);
        assert_eq!(
            reasons(&trace)[0],
            Some(vec![FailureReason::UnresolvedSignature])
        );
    }

    #[test]
    fn outer_receiver_members_depend_on_strictness() {
        let src = "item(\"a\") { name = \"x\" }";
        assert!(reasons(&trace(src, ResolverSettings::lenient()))
            .iter()
            .all(Option::is_none));
        assert_eq!(
            reasons(&trace(src, ResolverSettings::strict()))[2],
            Some(vec![FailureReason::CrossScopeAccess])
        );
    }

    #[test]
    fn parse_errors_are_recorded_as_errors() {
        let trace = trace("name = = 2\nname = \"ok\"", ResolverSettings::default());
        let all = reasons(&trace);
        assert_eq!(all[0], Some(vec![FailureReason::IsError]));
        assert_eq!(all.last(), Some(&None));
    }

    #[test]
    fn ambiguous_overloads_prefer_the_exact_match() {
        let mut builder = SchemaBuilder::new("Top");
        builder
            .data_class("Top")
            .adding("f", [TypeRef::Long, TypeRef::Int], "Item", BlockRequirement::Allowed)
            .adding("f", [TypeRef::Int, TypeRef::Long], "Item", BlockRequirement::Allowed)
            .adding("g", [TypeRef::Long], "Item", BlockRequirement::Allowed)
            .adding("g", [TypeRef::Int], "Item", BlockRequirement::Allowed);
        builder.data_class("Item");
        let schema = builder.build().unwrap();
        let parsed = parse_source(SourceId::new("test.dcl"), "f(1, 2)\ng(1)");
        let trace = CodeResolver::new(&schema, ResolverSettings::default()).resolve(&parsed.script);

        let elements: Vec<&TraceEntry> = trace
            .iter()
            .map(|(_, entry)| entry)
            .filter(|entry| matches!(entry, TraceEntry::Element(_)))
            .collect();
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[0].reasons().map(|r| r.iter().collect::<Vec<_>>()),
            Some(vec![FailureReason::UnresolvedSignature])
        );
        let TraceEntry::Element(Ok(target)) = elements[1] else {
            panic!("expected g(1) to resolve, got {:?}", elements[1]);
        };
        assert_eq!(target.function().signature(), "g(Int): Item");
    }
}
