//! Association end multiplicities.

use std::fmt;
use std::str::FromStr;

use crate::errors::EvalError;

/// How many records may sit at one end of an association.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// `0..1`
    ZeroOrOne,
    /// `1`
    ExactlyOne,
    /// `*` (also written `0..*`)
    Many,
    /// `1..*`
    OneOrMore,
}

impl Cardinality {
    pub const fn min(self) -> usize {
        match self {
            Cardinality::ZeroOrOne | Cardinality::Many => 0,
            Cardinality::ExactlyOne | Cardinality::OneOrMore => 1,
        }
    }

    /// `None` when unbounded.
    pub const fn max(self) -> Option<usize> {
        match self {
            Cardinality::ZeroOrOne | Cardinality::ExactlyOne => Some(1),
            Cardinality::Many | Cardinality::OneOrMore => None,
        }
    }

    pub fn admits(self, count: usize) -> bool {
        count >= self.min() && self.max().map_or(true, |max| count <= max)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "0..1",
            Cardinality::ExactlyOne => "1",
            Cardinality::Many => "*",
            Cardinality::OneOrMore => "1..*",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinality {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0..1" => Ok(Cardinality::ZeroOrOne),
            "1" | "1..1" => Ok(Cardinality::ExactlyOne),
            "*" | "0..*" => Ok(Cardinality::Many),
            "1..*" => Ok(Cardinality::OneOrMore),
            other => Err(EvalError::new(format!("unknown cardinality `{other}`"))),
        }
    }
}
