//! Error constructors for evaluation.
//!
//! The canonical path for every factory used by the evaluator. The
//! definitions live with the value model so built-ins and values can raise
//! the same errors.

pub use tlx_values::errors::{
    // Access
    field_not_found, index_out_of_bounds, name_not_found,
    // Types
    operand_type, type_mismatch,
    // Arithmetic
    division_by_zero, undefined_operation,
    // Collections
    empty_collection, infinite_set,
    // Control
    invalid_binding, no_matching_branch, unknown_operator,
    // Built-ins
    arity_mismatch, unknown_builtin,
};
pub use tlx_values::{EvalError, EvalErrorKind, EvalNote, EvalResult, Side};
