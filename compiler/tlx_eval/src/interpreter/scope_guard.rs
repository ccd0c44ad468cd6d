//! RAII-style scope guards for the interpreter's scope chain.
//!
//! [`ScopedInterpreter`] swaps a fresh child scope in when created and puts
//! the previous scope back when dropped, including during unwinding and on
//! early `?` returns.
//!
//! # Design
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`, so
//! every interpreter method is available through it while it is alive.
//!
//! ```text
//! interpreter.with_binding("v", element, |scoped| scoped.eval(body))
//! ```

use std::ops::{Deref, DerefMut};

use tlx_values::Value;

use super::Interpreter;
use crate::environment::{LocalScope, Namespace, Scope};

/// RAII guard that restores the enclosing scope on drop.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    saved: LocalScope<Scope>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.scope = self.saved.clone();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter a child of the active scope until the guard is dropped.
    pub fn scoped(&mut self, namespace: Namespace) -> ScopedInterpreter<'_> {
        let child = LocalScope::new(Scope::child(&self.scope, namespace));
        let saved = std::mem::replace(&mut self.scope, child);
        ScopedInterpreter {
            interpreter: self,
            saved,
        }
    }

    /// Run `f` inside a child scope.
    pub fn with_scope<T, F>(&mut self, namespace: Namespace, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped(namespace);
        f(&mut scoped)
    }

    /// Run `f` in a local child scope where `name` is bound to `value`.
    pub fn with_binding<T, F>(&mut self, name: &str, value: Value, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        self.with_scope(Namespace::Local, |scoped| {
            scoped.scope.borrow_mut().bind(name, value);
            f(scoped)
        })
    }

    /// Run `f` in a local child scope where `@` is `existing`.
    pub fn with_existing<T, F>(&mut self, existing: Value, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        self.with_scope(Namespace::Local, |scoped| {
            scoped.scope.borrow_mut().set_existing_value(existing);
            f(scoped)
        })
    }
}
