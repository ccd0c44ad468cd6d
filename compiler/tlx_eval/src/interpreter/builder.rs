//! `InterpreterBuilder` for creating `Interpreter` instances.

use std::collections::BTreeMap;

use super::Interpreter;
use crate::association::AssociationContext;
use crate::builtins::BuiltinRegistry;
use crate::environment::{LocalScope, Scope};
use crate::shared::SharedRegistry;

/// Builder for `Interpreter`.
///
/// Defaults: a fresh root scope, the default built-in registry, and no
/// association context.
#[derive(Default)]
pub struct InterpreterBuilder {
    scope: Option<LocalScope<Scope>>,
    builtins: Option<SharedRegistry<BuiltinRegistry>>,
    associations: Option<LocalScope<AssociationContext>>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root scope, typically pre-populated with state variables.
    #[must_use]
    pub fn scope(mut self, scope: LocalScope<Scope>) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the built-in registry.
    ///
    /// Registries are frozen once shared; register custom built-ins first.
    #[must_use]
    pub fn builtins(mut self, builtins: SharedRegistry<BuiltinRegistry>) -> Self {
        self.builtins = Some(builtins);
        self
    }

    /// Set the association context of the simulation run.
    ///
    /// Installed into the root scope unless that scope already carries one.
    #[must_use]
    pub fn associations(mut self, context: LocalScope<AssociationContext>) -> Self {
        self.associations = Some(context);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let scope = self.scope.unwrap_or_default();
        if let Some(context) = self.associations {
            let mut root = scope.borrow_mut();
            if root.associations().is_none() {
                root.set_associations(context);
            }
        }
        Interpreter {
            scope,
            builtins: self.builtins.unwrap_or_default(),
            delta: BTreeMap::new(),
        }
    }
}
