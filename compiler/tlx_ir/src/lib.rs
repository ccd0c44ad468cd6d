//! tlx IR - expression trees for the tlx guard and action notation.
//!
//! This crate contains the data the evaluator consumes:
//! - `Expr`/`ExprKind`: the closed expression tree
//! - `BinaryOp` and the per-category legal operator sets
//! - `Span` source locations
//! - `Type`/`TypedExpr` for the typed evaluation entry point
//!
//! Every node can describe itself as source text (`Display`), as ASCII
//! (`Expr::to_ascii`) and can check its own structure (`Expr::validate`).

pub mod ast;
mod error;
mod span;
mod types;

pub use ast::{
    BinaryOp, BuiltinSet, CaseArm, ExceptClause, Expr, ExprKind, FieldInit, OpCategory,
    Quantifier,
};
pub use error::IrError;
pub use span::Span;
pub use types::{Type, TypedExpr};
