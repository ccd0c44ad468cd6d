//! tlx Eval - evaluation engine for the tlx guard and action notation.
//!
//! Evaluates expression trees from `tlx_ir` to runtime values from
//! `tlx_values`, tracking next-state (primed) bindings along the way.
//!
//! # Architecture
//!
//! - `Scope`/`LocalScope`: the binding environment, a parent-linked chain
//!   of scopes with current and primed values per name
//! - `AssociationContext`: record identities and the association link table
//! - `BuiltinRegistry`: `_Module!Operation` built-in functions
//! - `Interpreter`: the tree walker, one exhaustive match over `ExprKind`
//! - `evaluate_*`: operator implementations per node category
//!
//! # Re-exports
//!
//! Value types and the error model are re-exported from `tlx_values`.

mod association;
mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod shared;
mod stack;

#[cfg(test)]
mod tests;

pub use tlx_values::{
    BagValue, EvalError, EvalErrorKind, EvalResult, Identity, InfiniteDomain, Number, NumberKind,
    RecordValue, SetValue, Side, TupleValue, Value, ValueKind,
};

pub use association::{
    Association, AssociationContext, AssociationKey, Cardinality, CardinalityViolation, Direction,
    Related, RelationInfo,
};
pub use builtins::{qualified_name, BuiltinFn, BuiltinRegistry};
pub use environment::{LocalScope, Namespace, Scope};
pub use interpreter::{admits, Evaluation, Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::{
    combine_logic, evaluate_arithmetic, evaluate_bag_algebra, evaluate_comparison,
    evaluate_equality, evaluate_membership, evaluate_set_algebra,
};
pub use shared::SharedRegistry;
pub use stack::ensure_sufficient_stack;
