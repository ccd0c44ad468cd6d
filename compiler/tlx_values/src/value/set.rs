//! Sets: finite, deduplicated by content key, or one of the built-in
//! infinite domains.

use std::fmt;

use rustc_hash::FxHashMap;

use super::{write_joined, Value};
use crate::errors::{infinite_set, EvalError};

/// A built-in set that cannot be enumerated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InfiniteDomain {
    Naturals,
    Integers,
    Reals,
}

impl InfiniteDomain {
    pub fn name(self) -> &'static str {
        match self {
            InfiniteDomain::Naturals => "Nat",
            InfiniteDomain::Integers => "Int",
            InfiniteDomain::Reals => "Real",
        }
    }

    pub fn contains(self, value: &Value) -> bool {
        let Value::Number(n) = value else {
            return false;
        };
        match self {
            InfiniteDomain::Naturals => n.is_integral() && !n.is_negative(),
            InfiniteDomain::Integers => n.is_integral(),
            InfiniteDomain::Reals => true,
        }
    }

    /// `Nat ⊆ Int ⊆ Real`.
    pub fn is_subset_of(self, other: InfiniteDomain) -> bool {
        self <= other
    }
}

#[derive(Clone, Debug)]
enum Repr {
    Finite(FxHashMap<String, Value>),
    Infinite(InfiniteDomain),
}

/// A set value.
#[derive(Clone, Debug)]
pub struct SetValue(Repr);

impl Default for SetValue {
    fn default() -> Self {
        SetValue::new()
    }
}

impl SetValue {
    pub fn new() -> Self {
        SetValue(Repr::Finite(FxHashMap::default()))
    }

    pub fn infinite(domain: InfiniteDomain) -> Self {
        SetValue(Repr::Infinite(domain))
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut set = SetValue::new();
        for value in values {
            set.insert(value);
        }
        set
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.0, Repr::Finite(_))
    }

    pub fn domain(&self) -> Option<InfiniteDomain> {
        match self.0 {
            Repr::Infinite(d) => Some(d),
            Repr::Finite(_) => None,
        }
    }

    fn finite(&self) -> Result<&FxHashMap<String, Value>, EvalError> {
        match &self.0 {
            Repr::Finite(map) => Ok(map),
            Repr::Infinite(d) => Err(infinite_set(d.name())),
        }
    }

    /// Add an element; returns `false` if an equal element was present.
    ///
    /// Inserting into an infinite domain is a no-op when the value already
    /// belongs to it.
    pub fn insert(&mut self, value: Value) -> bool {
        match &mut self.0 {
            Repr::Finite(map) => {
                let key = value.hash_key();
                if map.contains_key(&key) {
                    return false;
                }
                map.insert(key, value);
                true
            }
            Repr::Infinite(_) => false,
        }
    }

    pub fn remove(&mut self, value: &Value) -> bool {
        match &mut self.0 {
            Repr::Finite(map) => map.remove(&value.hash_key()).is_some(),
            Repr::Infinite(_) => false,
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        match &self.0 {
            Repr::Finite(map) => map.contains_key(&value.hash_key()),
            Repr::Infinite(d) => d.contains(value),
        }
    }

    /// Number of elements; infinite sets have none to count.
    pub fn len(&self) -> Result<usize, EvalError> {
        self.finite().map(FxHashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Repr::Finite(map) => map.is_empty(),
            Repr::Infinite(_) => false,
        }
    }

    /// Elements in canonical order.
    pub fn elements(&self) -> Result<Vec<&Value>, EvalError> {
        let mut elements: Vec<&Value> = self.finite()?.values().collect();
        elements.sort_by(|a, b| a.canonical_cmp(b));
        Ok(elements)
    }

    /// Owned elements in canonical order.
    pub fn to_vec(&self) -> Result<Vec<Value>, EvalError> {
        Ok(self.elements()?.into_iter().cloned().collect())
    }

    pub fn union(&self, other: &SetValue) -> Result<SetValue, EvalError> {
        match (&self.0, &other.0) {
            (Repr::Finite(a), Repr::Finite(b)) => {
                let mut map = a.clone();
                for (key, value) in b {
                    map.entry(key.clone()).or_insert_with(|| value.clone());
                }
                Ok(SetValue(Repr::Finite(map)))
            }
            // Absorbed by a domain that already holds every element.
            (Repr::Infinite(d), Repr::Finite(f)) | (Repr::Finite(f), Repr::Infinite(d))
                if f.values().all(|v| d.contains(v)) =>
            {
                Ok(SetValue::infinite(*d))
            }
            (Repr::Infinite(a), Repr::Infinite(b)) => Ok(SetValue::infinite((*a).max(*b))),
            (Repr::Infinite(d), _) | (_, Repr::Infinite(d)) => Err(infinite_set(d.name())),
        }
    }

    pub fn intersect(&self, other: &SetValue) -> Result<SetValue, EvalError> {
        match (&self.0, &other.0) {
            (Repr::Finite(a), _) => Ok(SetValue(Repr::Finite(
                a.iter()
                    .filter(|(_, v)| other.contains(v))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ))),
            (Repr::Infinite(_), Repr::Finite(_)) => other.intersect(self),
            (Repr::Infinite(a), Repr::Infinite(b)) => Ok(SetValue::infinite((*a).min(*b))),
        }
    }

    pub fn difference(&self, other: &SetValue) -> Result<SetValue, EvalError> {
        let map = self.finite()?;
        Ok(SetValue(Repr::Finite(
            map.iter()
                .filter(|(_, v)| !other.contains(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )))
    }

    pub fn is_subset(&self, other: &SetValue) -> bool {
        match (&self.0, &other.0) {
            (Repr::Finite(a), _) => a.values().all(|v| other.contains(v)),
            (Repr::Infinite(a), Repr::Infinite(b)) => a.is_subset_of(*b),
            (Repr::Infinite(_), Repr::Finite(_)) => false,
        }
    }

    pub fn is_proper_subset(&self, other: &SetValue) -> bool {
        self.is_subset(other) && self != other
    }

    pub fn is_superset(&self, other: &SetValue) -> bool {
        other.is_subset(self)
    }

    pub fn is_proper_superset(&self, other: &SetValue) -> bool {
        other.is_proper_subset(self)
    }

    pub(super) fn canonical_text(&self) -> String {
        match &self.0 {
            Repr::Finite(map) => {
                let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
                keys.sort_unstable();
                format!("{{{}}}", keys.join(","))
            }
            Repr::Infinite(d) => d.name().to_string(),
        }
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Finite(a), Repr::Finite(b)) => {
                a.len() == b.len() && a.keys().all(|k| b.contains_key(k))
            }
            (Repr::Infinite(a), Repr::Infinite(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Finite(map) => {
                let mut elements: Vec<&Value> = map.values().collect();
                elements.sort_by(|a, b| a.canonical_cmp(b));
                f.write_str("{")?;
                write_joined(f, elements)?;
                f.write_str("}")
            }
            Repr::Infinite(d) => f.write_str(d.name()),
        }
    }
}

impl FromIterator<Value> for SetValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        SetValue::from_values(iter)
    }
}
