//! Evaluator test suites.
//!
//! Each file drives the interpreter end to end through expression trees
//! built with the `Expr` constructors.

mod association_tests;
mod property_tests;
mod record_tests;
mod typed_tests;

use tlx_ir::Expr;

use crate::{EvalResult, Interpreter};

/// Evaluate `expr` in a fresh interpreter.
pub(crate) fn eval(expr: &Expr) -> EvalResult {
    Interpreter::new().eval(expr)
}

/// `{n, ...}` over integer literals.
pub(crate) fn int_set(values: &[i64]) -> Expr {
    Expr::set(values.iter().copied().map(Expr::int).collect())
}
