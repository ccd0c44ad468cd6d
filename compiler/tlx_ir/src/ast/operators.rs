//! Binary operators, quantifiers and built-in domains.
//!
//! Each binary node category (arithmetic, comparison, logic, set algebra,
//! bag algebra) accepts only the operators of its own [`OpCategory`]. An
//! operator outside that set means the tree was built incorrectly.

use std::fmt;
use std::str::FromStr;

use crate::IrError;

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    IntDiv,
    Pow,

    // Ordering
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logic
    And,
    Or,
    Implies,
    Equiv,

    // Set algebra
    Union,
    Intersect,
    Difference,
    SubsetEq,
    ProperSubset,
    SupersetEq,
    ProperSuperset,

    // Bag algebra
    BagSum,
    BagDifference,
    BagUnion,
    SubBag,
    ProperSubBag,
    SuperBag,
    ProperSuperBag,
}

/// The node category an operator belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpCategory {
    Arithmetic,
    Comparison,
    Logic,
    SetAlgebra,
    BagAlgebra,
}

impl OpCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
            Self::Comparison => "comparison",
            Self::Logic => "logic",
            Self::SetAlgebra => "set algebra",
            Self::BagAlgebra => "bag algebra",
        }
    }
}

impl fmt::Display for OpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl BinaryOp {
    /// Every operator, used for symbol lookup.
    pub const ALL: [BinaryOp; 29] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::IntDiv,
        Self::Pow,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::And,
        Self::Or,
        Self::Implies,
        Self::Equiv,
        Self::Union,
        Self::Intersect,
        Self::Difference,
        Self::SubsetEq,
        Self::ProperSubset,
        Self::SupersetEq,
        Self::ProperSuperset,
        Self::BagSum,
        Self::BagDifference,
        Self::BagUnion,
        Self::SubBag,
        Self::ProperSubBag,
        Self::SuperBag,
        Self::ProperSuperBag,
    ];

    /// Mathematical glyph used in source rendering.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::IntDiv => "÷",
            Self::Pow => "^",
            Self::Lt => "<",
            Self::LtEq => "≤",
            Self::Gt => ">",
            Self::GtEq => "≥",
            Self::And => "∧",
            Self::Or => "∨",
            Self::Implies => "⇒",
            Self::Equiv => "⇔",
            Self::Union => "∪",
            Self::Intersect => "∩",
            Self::Difference => "\\",
            Self::SubsetEq => "⊆",
            Self::ProperSubset => "⊂",
            Self::SupersetEq => "⊇",
            Self::ProperSuperset => "⊃",
            Self::BagSum => "⊕",
            Self::BagDifference => "⊖",
            Self::BagUnion => "⊔",
            Self::SubBag => "⊑",
            Self::ProperSubBag => "⊏",
            Self::SuperBag => "⊒",
            Self::ProperSuperBag => "⊐",
        }
    }

    /// ASCII spelling of the operator.
    pub const fn as_ascii(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::IntDiv => "\\div",
            Self::Pow => "^",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "/\\",
            Self::Or => "\\/",
            Self::Implies => "=>",
            Self::Equiv => "<=>",
            Self::Union => "\\cup",
            Self::Intersect => "\\cap",
            Self::Difference => "\\",
            Self::SubsetEq => "\\subseteq",
            Self::ProperSubset => "\\subset",
            Self::SupersetEq => "\\supseteq",
            Self::ProperSuperset => "\\supset",
            Self::BagSum => "(+)",
            Self::BagDifference => "(-)",
            Self::BagUnion => "\\sqcup",
            Self::SubBag => "\\sqsubseteq",
            Self::ProperSubBag => "\\sqsubset",
            Self::SuperBag => "\\sqsupseteq",
            Self::ProperSuperBag => "\\sqsupset",
        }
    }

    pub const fn category(self) -> OpCategory {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::IntDiv | Self::Pow => {
                OpCategory::Arithmetic
            }
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => OpCategory::Comparison,
            Self::And | Self::Or | Self::Implies | Self::Equiv => OpCategory::Logic,
            Self::Union
            | Self::Intersect
            | Self::Difference
            | Self::SubsetEq
            | Self::ProperSubset
            | Self::SupersetEq
            | Self::ProperSuperset => OpCategory::SetAlgebra,
            Self::BagSum
            | Self::BagDifference
            | Self::BagUnion
            | Self::SubBag
            | Self::ProperSubBag
            | Self::SuperBag
            | Self::ProperSuperBag => OpCategory::BagAlgebra,
        }
    }

    /// Whether `self` is legal inside a node of `category`.
    #[inline]
    pub fn is_legal_in(self, category: OpCategory) -> bool {
        self.category() == category
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

impl FromStr for BinaryOp {
    type Err = IrError;

    /// Accepts either the glyph or the ASCII spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_symbol() == s || op.as_ascii() == s)
            .ok_or_else(|| IrError::UnknownOperator {
                op: s.to_string(),
                node: "binary expression",
            })
    }
}

/// Bounded quantifiers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantifier {
    ForAll,
    Exists,
}

impl Quantifier {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::ForAll => "∀",
            Self::Exists => "∃",
        }
    }

    pub const fn as_ascii(self) -> &'static str {
        match self {
            Self::ForAll => "\\A",
            Self::Exists => "\\E",
        }
    }
}

/// Built-in set constants.
///
/// `Nat`, `Int` and `Real` are infinite and can only be tested for
/// membership; `BOOLEAN` is the two-element set `{TRUE, FALSE}`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BuiltinSet {
    Nat,
    Int,
    Real,
    Boolean,
}

impl BuiltinSet {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Nat => "ℕ",
            Self::Int => "ℤ",
            Self::Real => "ℝ",
            Self::Boolean => "BOOLEAN",
        }
    }

    pub const fn as_ascii(self) -> &'static str {
        match self {
            Self::Nat => "Nat",
            Self::Int => "Int",
            Self::Real => "Real",
            Self::Boolean => "BOOLEAN",
        }
    }

    /// Whether the set has finitely many elements.
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Boolean)
    }
}
