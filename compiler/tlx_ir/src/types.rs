//! Static type annotations.
//!
//! The external checker annotates a tree with the type it infers for the
//! root. The typed entry point evaluates the same tree and confirms the
//! result against the annotation.

use std::fmt;

use crate::Expr;

/// Inferred static type of an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Number,
    Boolean,
    String,
    Set(Box<Type>),
    Bag(Box<Type>),
    /// Sequence of one element type.
    Tuple(Box<Type>),
    /// Record with the listed fields; extra fields are allowed.
    Record(Vec<(String, Type)>),
    /// Unconstrained (polymorphic or not inferred).
    Any,
}

impl Type {
    pub fn set_of(elem: Type) -> Self {
        Type::Set(Box::new(elem))
    }

    pub fn bag_of(elem: Type) -> Self {
        Type::Bag(Box::new(elem))
    }

    pub fn tuple_of(elem: Type) -> Self {
        Type::Tuple(Box::new(elem))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Number => f.write_str("Number"),
            Type::Boolean => f.write_str("Boolean"),
            Type::String => f.write_str("String"),
            Type::Set(elem) => write!(f, "Set({elem})"),
            Type::Bag(elem) => write!(f, "Bag({elem})"),
            Type::Tuple(elem) => write!(f, "Seq({elem})"),
            Type::Record(fields) => {
                f.write_str("[")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                f.write_str("]")
            }
            Type::Any => f.write_str("Any"),
        }
    }
}

/// An expression tree together with the type the checker assigned to it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypedExpr {
    pub expr: Expr,
    pub ty: Type,
}

impl TypedExpr {
    pub fn new(expr: Expr, ty: Type) -> Self {
        TypedExpr { expr, ty }
    }
}
