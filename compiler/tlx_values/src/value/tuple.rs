//! Tuples (sequences), indexed from 1.

use std::fmt;

use super::{write_joined, Value};
use crate::errors::{empty_collection, index_out_of_bounds, EvalError};

const COLLECTION: &str = "sequence";

/// An ordered sequence of values. Positions are 1-based.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TupleValue {
    elements: Vec<Value>,
}

impl TupleValue {
    pub fn new() -> Self {
        TupleValue::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        TupleValue {
            elements: values.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    fn slot(&self, index: usize) -> Result<usize, EvalError> {
        if index == 0 || index > self.elements.len() {
            return Err(index_out_of_bounds(index, self.elements.len()));
        }
        Ok(index - 1)
    }

    /// The element at 1-based `index`.
    pub fn get(&self, index: usize) -> Result<&Value, EvalError> {
        let slot = self.slot(index)?;
        Ok(&self.elements[slot])
    }

    /// Replace the element at 1-based `index`.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), EvalError> {
        let slot = self.slot(index)?;
        self.elements[slot] = value;
        Ok(())
    }

    pub fn head(&self) -> Result<&Value, EvalError> {
        self.elements
            .first()
            .ok_or_else(|| empty_collection("Head", COLLECTION))
    }

    /// Everything after the first element.
    pub fn tail(&self) -> Result<TupleValue, EvalError> {
        match self.elements.split_first() {
            Some((_, rest)) => Ok(TupleValue::from_values(rest.iter().cloned())),
            None => Err(empty_collection("Tail", COLLECTION)),
        }
    }

    pub fn append(&mut self, value: Value) {
        self.elements.push(value);
    }

    pub fn prepend(&mut self, value: Value) {
        self.elements.insert(0, value);
    }

    #[must_use]
    pub fn concat(&self, other: &TupleValue) -> TupleValue {
        TupleValue::from_values(self.elements.iter().chain(&other.elements).cloned())
    }

    /// Elements `from..=to` (1-based, inclusive). An empty range gives an
    /// empty tuple.
    pub fn subseq(&self, from: usize, to: usize) -> Result<TupleValue, EvalError> {
        if from > to {
            return Ok(TupleValue::new());
        }
        let start = self.slot(from)?;
        let end = self.slot(to)?;
        Ok(TupleValue::from_values(
            self.elements[start..=end].iter().cloned(),
        ))
    }

    #[must_use]
    pub fn reverse(&self) -> TupleValue {
        TupleValue::from_values(self.elements.iter().rev().cloned())
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.elements.contains(value)
    }

    // Stack: the top is the end of the sequence.

    pub fn push(&mut self, value: Value) {
        self.elements.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, EvalError> {
        self.elements
            .pop()
            .ok_or_else(|| empty_collection("Pop", "stack"))
    }

    pub fn top(&self) -> Result<&Value, EvalError> {
        self.elements
            .last()
            .ok_or_else(|| empty_collection("Top", "stack"))
    }

    // Queue: enqueue at the end, dequeue from the front.

    pub fn enqueue(&mut self, value: Value) {
        self.elements.push(value);
    }

    pub fn dequeue(&mut self) -> Result<Value, EvalError> {
        if self.elements.is_empty() {
            return Err(empty_collection("Dequeue", "queue"));
        }
        Ok(self.elements.remove(0))
    }

    pub fn front(&self) -> Result<&Value, EvalError> {
        self.elements
            .first()
            .ok_or_else(|| empty_collection("Front", "queue"))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    pub(super) fn canonical_text(&self) -> String {
        let keys: Vec<String> = self.elements.iter().map(Value::hash_key).collect();
        format!("<<{}>>", keys.join(","))
    }
}

impl fmt::Display for TupleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<<")?;
        write_joined(f, &self.elements)?;
        f.write_str(">>")
    }
}

impl<'a> IntoIterator for &'a TupleValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
