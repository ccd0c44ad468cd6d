//! Built-in function registry.
//!
//! Calls of the form `_Module!Operation(args)` resolve through a name table.
//! Each entry receives already-evaluated arguments. New built-ins are added
//! by registering them; the evaluator never changes.

mod bags;
mod sequences;

use std::fmt;

use rustc_hash::FxHashMap;
use tlx_values::{BagValue, Number, SetValue, TupleValue, Value};
use tracing::debug;

use crate::errors::{arity_mismatch, type_mismatch, unknown_builtin, EvalError, EvalResult};

/// Signature of a built-in.
pub type BuiltinFn = fn(&[Value]) -> EvalResult;

#[derive(Copy, Clone)]
struct Builtin {
    arity: usize,
    func: BuiltinFn,
}

/// Name to function table for `_Module!Operation` calls.
#[derive(Clone)]
pub struct BuiltinRegistry {
    functions: FxHashMap<String, Builtin>,
}

/// Full call name, `_Module!Operation`.
pub fn qualified_name(module: &str, operation: &str) -> String {
    format!("_{module}!{operation}")
}

impl BuiltinRegistry {
    /// A registry with nothing in it.
    pub fn empty() -> Self {
        BuiltinRegistry {
            functions: FxHashMap::default(),
        }
    }

    /// A registry with the standard modules.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        sequences::register(&mut registry);
        bags::register(&mut registry);
        registry
    }

    /// Add or replace `_module!operation`.
    pub fn register(&mut self, module: &str, operation: &str, arity: usize, func: BuiltinFn) {
        let name = qualified_name(module, operation);
        debug!(builtin = %name, arity, "builtin registered");
        self.functions.insert(name, Builtin { arity, func });
    }

    pub fn contains(&self, module: &str, operation: &str) -> bool {
        self.functions
            .contains_key(&qualified_name(module, operation))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn call(&self, module: &str, operation: &str, args: &[Value]) -> EvalResult {
        let name = qualified_name(module, operation);
        let Some(builtin) = self.functions.get(&name) else {
            return Err(unknown_builtin(&name));
        };
        if args.len() != builtin.arity {
            return Err(arity_mismatch(&name, builtin.arity, args.len()));
        }
        (builtin.func)(args)
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

// Argument helpers

fn wrong_argument(what: &str, position: usize, got: &Value) -> EvalError {
    type_mismatch(format!("{what} as argument {position}"), got.kind().name())
}

pub(crate) fn tuple_arg(args: &[Value], index: usize) -> Result<&TupleValue, EvalError> {
    match &args[index] {
        Value::Tuple(t) => Ok(t),
        other => Err(wrong_argument("a Tuple", index + 1, other)),
    }
}

pub(crate) fn set_arg(args: &[Value], index: usize) -> Result<&SetValue, EvalError> {
    match &args[index] {
        Value::Set(s) => Ok(s),
        other => Err(wrong_argument("a Set", index + 1, other)),
    }
}

pub(crate) fn bag_arg(args: &[Value], index: usize) -> Result<&BagValue, EvalError> {
    match &args[index] {
        Value::Bag(b) => Ok(b),
        other => Err(wrong_argument("a Bag", index + 1, other)),
    }
}

/// A non-negative integer argument.
pub(crate) fn position_arg(args: &[Value], index: usize) -> Result<usize, EvalError> {
    args[index]
        .as_number()
        .and_then(Number::to_i64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| wrong_argument("a Natural", index + 1, &args[index]))
}

pub(crate) fn count_value(n: usize) -> Value {
    Value::int(i64::try_from(n).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests;
