//! Error types for evaluation.
//!
//! Every failure is a value: evaluation returns `Err(EvalError)` and the
//! first failure aborts the enclosing expression unchanged.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the data for each failure condition so callers
//! can match on the kind instead of parsing messages. The factory functions
//! at the bottom of this module are the only way errors are created.

use std::fmt;

use thiserror::Error;
use tlx_ir::Span;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Which operand of an operator was at fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    /// The single operand of a unary operator.
    Only,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Only => "the",
        })
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Access
    #[error("name not found: {name}")]
    NameNotFound { name: String },
    #[error("no field `{field}` in record")]
    FieldNotFound { field: String },
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: String, len: usize },

    // Types
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("{side} operand of `{op}` must be {expected}, got {got}")]
    OperandType {
        side: Side,
        op: String,
        expected: &'static str,
        got: String,
    },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("{operation} is undefined")]
    Undefined { operation: String },

    // Collections
    #[error("cannot enumerate infinite set {set}")]
    InfiniteSet { set: String },
    #[error("{operation} of an empty {collection}")]
    EmptyCollection {
        operation: String,
        collection: &'static str,
    },

    // Control
    #[error("no CASE branch matched and there is no OTHER")]
    NoMatchingBranch,
    #[error("{node} must bind one variable with `v \\in S`")]
    InvalidBinding { node: &'static str },

    // Tree contract
    #[error("operator `{op}` is not legal in a {node} node")]
    UnknownOperator { op: String, node: String },

    // Built-ins
    #[error("unknown built-in {name}")]
    UnknownBuiltin { name: String },
    #[error("{name} expects {expected} {}, got {got}", if *.expected == 1 { "argument" } else { "arguments" })]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Catch-all for conditions without a dedicated kind.
    #[error("{message}")]
    Custom { message: String },
}

/// Additional context attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Location of the node that failed, innermost first.
    pub span: Option<Span>,
    /// Secondary context notes.
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_kind(EvalErrorKind::Custom { message })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            notes: Vec::new(),
        }
    }

    /// Attach a source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Add a context note.
    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

// Access Errors

#[cold]
pub fn name_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NameNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn field_not_found(field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FieldNotFound {
        field: field.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: impl fmt::Display, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds {
        index: index.to_string(),
        len,
    })
}

// Type Errors

#[cold]
pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.into(),
        got: got.into(),
    })
}

/// Wrong runtime kind for one operand of an operator.
#[cold]
pub fn operand_type(side: Side, op: &str, expected: &'static str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperandType {
        side,
        op: op.to_string(),
        expected,
        got: got.kind().to_string(),
    })
}

// Arithmetic Errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn undefined_operation(operation: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Undefined {
        operation: operation.into(),
    })
}

// Collection Errors

#[cold]
pub fn infinite_set(set: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InfiniteSet {
        set: set.to_string(),
    })
}

#[cold]
pub fn empty_collection(operation: &str, collection: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyCollection {
        operation: operation.to_string(),
        collection,
    })
}

// Control Errors

#[cold]
pub fn no_matching_branch() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingBranch)
}

#[cold]
pub fn invalid_binding(node: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinding { node })
}

#[cold]
pub fn unknown_operator(op: &str, node: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownOperator {
        op: op.to_string(),
        node: node.to_string(),
    })
}

// Built-in Errors

#[cold]
pub fn unknown_builtin(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownBuiltin {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}
