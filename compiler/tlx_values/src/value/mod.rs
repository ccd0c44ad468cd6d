//! Runtime values.
//!
//! Values are plain owned data: cloning deep-copies, and every collection
//! constructor takes its inputs by value. Equality and deduplication use a
//! content key built from the value's kind tag plus its canonical text, with
//! the key delimiter escaped so crafted string content cannot collide with a
//! value of another kind.

mod bag;
mod number;
mod record;
mod set;
mod tuple;

use std::cmp::Ordering;
use std::fmt;

pub use bag::BagValue;
pub use number::{Number, NumberKind};
pub use record::{Identity, RecordValue};
pub use set::{InfiniteDomain, SetValue};
pub use tuple::TupleValue;

use crate::errors::{type_mismatch, EvalError};

/// Separates the kind tag from the canonical text in a content key.
const KEY_DELIMITER: char = '|';

/// Runtime kind tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Number,
    Boolean,
    String,
    Set,
    Bag,
    Tuple,
    Record,
    Error,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Number => "Number",
            ValueKind::Boolean => "Boolean",
            ValueKind::String => "String",
            ValueKind::Set => "Set",
            ValueKind::Bag => "Bag",
            ValueKind::Tuple => "Tuple",
            ValueKind::Record => "Record",
            ValueKind::Error => "Error",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Number(Number),
    Bool(bool),
    Str(String),
    Set(SetValue),
    Bag(BagValue),
    Tuple(TupleValue),
    Record(RecordValue),
    /// A failure carried as data, e.g. inside a collection built by a host.
    Error(String),
}

// Factory Methods

impl Value {
    pub fn int(n: i64) -> Self {
        Value::Number(Number::int(n))
    }

    pub fn real(f: f64) -> Self {
        Value::Number(Number::real(f))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn set(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(SetValue::from_values(elements))
    }

    pub fn bag(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Bag(BagValue::from_values(elements))
    }

    pub fn tuple(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(TupleValue::from_values(elements))
    }

    pub fn record<N: Into<String>>(fields: impl IntoIterator<Item = (N, Value)>) -> Self {
        Value::Record(RecordValue::from_fields(fields))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }
}

// Accessors

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Str(_) => ValueKind::String,
            Value::Set(_) => ValueKind::Set,
            Value::Bag(_) => ValueKind::Bag,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::Record(_) => ValueKind::Record,
            Value::Error(_) => ValueKind::Error,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetValue> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bag(&self) -> Option<&BagValue> {
        match self {
            Value::Bag(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&TupleValue> {
        match self {
            Value::Tuple(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Overwrite this value from a source of the same kind.
    pub fn assign_from(&mut self, source: &Value) -> Result<(), EvalError> {
        if self.kind() != source.kind() {
            return Err(type_mismatch(self.kind().name(), source.kind().name()));
        }
        *self = source.clone();
        Ok(())
    }
}

// Content keys and ordering

impl Value {
    /// Canonical text: stable, and equal exactly for equal values.
    pub fn canonical_text(&self) -> String {
        match self {
            Value::Number(n) => n.canonical_text(),
            Value::Bool(b) => bool_text(*b).to_string(),
            Value::Str(s) | Value::Error(s) => s.clone(),
            Value::Set(s) => s.canonical_text(),
            Value::Bag(b) => b.canonical_text(),
            Value::Tuple(t) => t.canonical_text(),
            Value::Record(r) => r.canonical_text(),
        }
    }

    /// Content key used for set and bag membership.
    pub fn hash_key(&self) -> String {
        let text = self.canonical_text();
        let mut key = String::with_capacity(text.len() + 8);
        key.push_str(self.kind().name());
        key.push(KEY_DELIMITER);
        for c in text.chars() {
            if c == '\\' || c == KEY_DELIMITER {
                key.push('\\');
            }
            key.push(c);
        }
        key
    }

    /// Total order used to enumerate collections deterministically.
    ///
    /// Kinds are grouped, numbers sort by value, everything else by key.
    pub fn canonical_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a
                .partial_cmp(b)
                .unwrap_or(Ordering::Equal)
                .then_with(|| self.hash_key().cmp(&other.hash_key())),
            _ => self
                .kind()
                .cmp(&other.kind())
                .then_with(|| self.hash_key().cmp(&other.hash_key())),
        }
    }
}

fn bool_text(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

impl PartialEq for Value {
    /// Content equality; values of different kinds are never equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) | (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Bag(a), Value::Bag(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => f.write_str(bool_text(*b)),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Set(s) => write!(f, "{s}"),
            Value::Bag(b) => write!(f, "{b}"),
            Value::Tuple(t) => write!(f, "{t}"),
            Value::Record(r) => write!(f, "{r}"),
            Value::Error(msg) => write!(f, "ERROR({msg})"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

/// Write `items` separated by `", "`.
pub(crate) fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
