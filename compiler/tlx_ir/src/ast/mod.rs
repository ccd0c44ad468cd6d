//! Expression tree.
//!
//! A closed sum type: every construct of the notation is one `ExprKind`
//! variant, so the evaluator's exhaustive match is checked by the compiler.
//!
//! Trees are produced by the external parser (or assembled directly by
//! callers and tests through the constructor functions below). The
//! evaluator trusts a tree to be well formed; [`Expr::validate`] is the
//! place to check that.

mod operators;
mod render;
mod validate;


pub use operators::{BinaryOp, BuiltinSet, OpCategory, Quantifier};

use crate::Span;

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// `name ↦ value` inside a record constructor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldInit {
    pub name: String,
    pub value: Expr,
}

/// `!.field = value` inside an EXCEPT.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ExceptClause {
    pub field: String,
    pub value: Expr,
}

/// `guard → body` inside a CASE.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseArm {
    pub guard: Expr,
    pub body: Expr,
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    // Literals
    /// Exact numeric literal: `42`, `2.5`, `1/3`.
    Number(String),
    Bool(bool),
    Str(String),
    BuiltinSet(BuiltinSet),

    // References
    Ident(String),
    /// Next-state reference `x'`.
    Primed(String),
    /// `@`, the old field value inside an EXCEPT clause.
    Existing,
    /// `self` inside a class-scoped evaluation.
    SelfRef,

    // Binary operators, one node kind per category
    Arithmetic {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Comparison {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logic {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    SetAlgebra {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    BagAlgebra {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `=` or `≠`.
    Equality {
        negated: bool,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `∈` or `∉`. Also the binding form of quantifiers and comprehensions.
    Membership {
        negated: bool,
        element: Box<Expr>,
        set: Box<Expr>,
    },

    // Unary operators
    Not(Box<Expr>),
    Negate(Box<Expr>),

    // Constructors
    SetLiteral(Vec<Expr>),
    TupleLiteral(Vec<Expr>),
    RecordLiteral(Vec<FieldInit>),
    /// Integer interval `low..high`, inclusive at both ends.
    Range {
        low: Box<Expr>,
        high: Box<Expr>,
    },

    // Binders
    /// `∀ v ∈ S : body` / `∃ v ∈ S : body`. `binding` is a `Membership`
    /// whose element is an `Ident`.
    Quantified {
        quantifier: Quantifier,
        binding: Box<Expr>,
        body: Box<Expr>,
    },
    /// `{v ∈ S : predicate}`.
    SetFilter {
        binding: Box<Expr>,
        predicate: Box<Expr>,
    },
    /// `{body : v ∈ S}`.
    SetMap {
        body: Box<Expr>,
        binding: Box<Expr>,
    },
    /// `LET name ≜ value IN body`.
    Let {
        name: String,
        value: Box<Expr>,
        body: Box<Expr>,
    },

    // Records and tuples
    /// `[base EXCEPT !.f = e, ...]`.
    Except {
        base: Box<Expr>,
        clauses: Vec<ExceptClause>,
    },
    /// `record.field`, or association traversal when `field` names one.
    Field {
        record: Box<Expr>,
        field: String,
    },
    /// `tuple[index]`, 1-indexed.
    Index {
        tuple: Box<Expr>,
        index: Box<Expr>,
    },

    // Control
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Case {
        arms: Vec<CaseArm>,
        other: Option<Box<Expr>>,
    },
    /// Statement sequence; the value is the last statement's value.
    Block(Vec<Expr>),

    // State transitions
    /// `name' = value`.
    Assign {
        name: String,
        value: Box<Expr>,
    },
    /// `UNCHANGED ⟨x, y⟩`: primes each variable to its current value.
    Unchanged(Vec<String>),

    /// `_Module!Operation(args)`.
    BuiltinCall {
        module: String,
        operation: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Node without source location.
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr {
            kind,
            span: Span::DUMMY,
        }
    }

    /// The variable name and set of a `v ∈ S` binding, if this is one.
    pub fn as_binding(&self) -> Option<(&str, &Expr)> {
        match &self.kind {
            ExprKind::Membership {
                negated: false,
                element,
                set,
            } => match &element.kind {
                ExprKind::Ident(name) => Some((name, set)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether rendering this node inside an operator needs parentheses.
    pub(crate) fn is_compound(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Arithmetic { .. }
                | ExprKind::Comparison { .. }
                | ExprKind::Logic { .. }
                | ExprKind::SetAlgebra { .. }
                | ExprKind::BagAlgebra { .. }
                | ExprKind::Equality { .. }
                | ExprKind::Membership { .. }
                | ExprKind::Range { .. }
                | ExprKind::Quantified { .. }
                | ExprKind::If { .. }
                | ExprKind::Case { .. }
                | ExprKind::Let { .. }
                | ExprKind::Assign { .. }
                | ExprKind::Negate(_)
                | ExprKind::Not(_)
        )
    }
}

// Constructors for trees assembled outside the parser.

impl Expr {
    pub fn number(text: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Number(text.into()))
    }

    pub fn int(n: i64) -> Self {
        Self::number(n.to_string())
    }

    pub fn bool(b: bool) -> Self {
        Self::synthetic(ExprKind::Bool(b))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Str(s.into()))
    }

    pub fn builtin_set(set: BuiltinSet) -> Self {
        Self::synthetic(ExprKind::BuiltinSet(set))
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Ident(name.into()))
    }

    pub fn primed(name: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Primed(name.into()))
    }

    pub fn existing() -> Self {
        Self::synthetic(ExprKind::Existing)
    }

    pub fn self_ref() -> Self {
        Self::synthetic(ExprKind::SelfRef)
    }

    /// Binary node of the category `op` belongs to.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        let kind = match op.category() {
            OpCategory::Arithmetic => ExprKind::Arithmetic { op, left, right },
            OpCategory::Comparison => ExprKind::Comparison { op, left, right },
            OpCategory::Logic => ExprKind::Logic { op, left, right },
            OpCategory::SetAlgebra => ExprKind::SetAlgebra { op, left, right },
            OpCategory::BagAlgebra => ExprKind::BagAlgebra { op, left, right },
        };
        Self::synthetic(kind)
    }

    pub fn equals(left: Expr, right: Expr) -> Self {
        Self::synthetic(ExprKind::Equality {
            negated: false,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn not_equals(left: Expr, right: Expr) -> Self {
        Self::synthetic(ExprKind::Equality {
            negated: true,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn member(element: Expr, set: Expr) -> Self {
        Self::synthetic(ExprKind::Membership {
            negated: false,
            element: Box::new(element),
            set: Box::new(set),
        })
    }

    pub fn not_member(element: Expr, set: Expr) -> Self {
        Self::synthetic(ExprKind::Membership {
            negated: true,
            element: Box::new(element),
            set: Box::new(set),
        })
    }

    pub fn logical_not(operand: Expr) -> Self {
        Self::synthetic(ExprKind::Not(Box::new(operand)))
    }

    pub fn negate(operand: Expr) -> Self {
        Self::synthetic(ExprKind::Negate(Box::new(operand)))
    }

    pub fn set(elements: Vec<Expr>) -> Self {
        Self::synthetic(ExprKind::SetLiteral(elements))
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Self::synthetic(ExprKind::TupleLiteral(elements))
    }

    pub fn record<N: Into<String>>(fields: Vec<(N, Expr)>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, value)| FieldInit {
                name: name.into(),
                value,
            })
            .collect();
        Self::synthetic(ExprKind::RecordLiteral(fields))
    }

    pub fn range(low: Expr, high: Expr) -> Self {
        Self::synthetic(ExprKind::Range {
            low: Box::new(low),
            high: Box::new(high),
        })
    }

    /// `∀ var ∈ set : body`.
    pub fn forall(var: impl Into<String>, set: Expr, body: Expr) -> Self {
        Self::quantified(Quantifier::ForAll, var, set, body)
    }

    /// `∃ var ∈ set : body`.
    pub fn exists(var: impl Into<String>, set: Expr, body: Expr) -> Self {
        Self::quantified(Quantifier::Exists, var, set, body)
    }

    fn quantified(quantifier: Quantifier, var: impl Into<String>, set: Expr, body: Expr) -> Self {
        Self::synthetic(ExprKind::Quantified {
            quantifier,
            binding: Box::new(Self::member(Self::ident(var), set)),
            body: Box::new(body),
        })
    }

    pub fn filter(var: impl Into<String>, set: Expr, predicate: Expr) -> Self {
        Self::synthetic(ExprKind::SetFilter {
            binding: Box::new(Self::member(Self::ident(var), set)),
            predicate: Box::new(predicate),
        })
    }

    pub fn map(body: Expr, var: impl Into<String>, set: Expr) -> Self {
        Self::synthetic(ExprKind::SetMap {
            body: Box::new(body),
            binding: Box::new(Self::member(Self::ident(var), set)),
        })
    }

    pub fn let_in(name: impl Into<String>, value: Expr, body: Expr) -> Self {
        Self::synthetic(ExprKind::Let {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        })
    }

    pub fn except<N: Into<String>>(base: Expr, clauses: Vec<(N, Expr)>) -> Self {
        let clauses = clauses
            .into_iter()
            .map(|(field, value)| ExceptClause {
                field: field.into(),
                value,
            })
            .collect();
        Self::synthetic(ExprKind::Except {
            base: Box::new(base),
            clauses,
        })
    }

    pub fn field(record: Expr, field: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Field {
            record: Box::new(record),
            field: field.into(),
        })
    }

    pub fn index(tuple: Expr, index: Expr) -> Self {
        Self::synthetic(ExprKind::Index {
            tuple: Box::new(tuple),
            index: Box::new(index),
        })
    }

    pub fn if_then_else(cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Self::synthetic(ExprKind::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    pub fn case(arms: Vec<(Expr, Expr)>, other: Option<Expr>) -> Self {
        let arms = arms
            .into_iter()
            .map(|(guard, body)| CaseArm { guard, body })
            .collect();
        Self::synthetic(ExprKind::Case {
            arms,
            other: other.map(Box::new),
        })
    }

    pub fn block(statements: Vec<Expr>) -> Self {
        Self::synthetic(ExprKind::Block(statements))
    }

    /// `name' = value`.
    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Self::synthetic(ExprKind::Assign {
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn unchanged<N: Into<String>>(names: Vec<N>) -> Self {
        Self::synthetic(ExprKind::Unchanged(
            names.into_iter().map(Into::into).collect(),
        ))
    }

    /// `_Module!Operation(args)`; `module` is given without the underscore.
    pub fn call(module: impl Into<String>, operation: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::synthetic(ExprKind::BuiltinCall {
            module: module.into(),
            operation: operation.into(),
            args,
        })
    }
}
