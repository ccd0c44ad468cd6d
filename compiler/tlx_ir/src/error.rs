//! Structural errors in expression trees.

use thiserror::Error;

/// A tree that violates the node contract.
///
/// These indicate a bug in whatever built the tree (normally the parser),
/// not a problem with the model's data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("operator `{op}` is not legal in a {node} node")]
    UnknownOperator { op: String, node: &'static str },

    #[error("{node} is missing its {child}")]
    MissingChild {
        node: &'static str,
        child: &'static str,
    },

    #[error("{node} must bind a single variable with `v \\in S`, found `{found}`")]
    MalformedBinding { node: &'static str, found: String },

    #[error("invalid numeric literal `{0}`")]
    InvalidNumber(String),

    #[error("duplicate record field `{0}`")]
    DuplicateField(String),
}
