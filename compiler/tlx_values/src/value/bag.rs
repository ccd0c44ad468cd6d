//! Bags (multisets) with an explicit count per distinct element.

use std::fmt;

use rustc_hash::FxHashMap;

use super::{SetValue, Value};
use crate::errors::EvalError;

/// A multiset. Elements with a count of zero are never stored.
#[derive(Clone, Debug, Default)]
pub struct BagValue {
    entries: FxHashMap<String, (Value, usize)>,
}

impl BagValue {
    pub fn new() -> Self {
        BagValue::default()
    }

    /// One occurrence per input value.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut bag = BagValue::new();
        for value in values {
            bag.insert(value, 1);
        }
        bag
    }

    /// Each element of `set` exactly once.
    pub fn from_set(set: &SetValue) -> Result<Self, EvalError> {
        Ok(BagValue::from_values(set.to_vec()?))
    }

    /// Add `count` occurrences of `value`.
    pub fn insert(&mut self, value: Value, count: usize) {
        if count == 0 {
            return;
        }
        self.entries
            .entry(value.hash_key())
            .and_modify(|(_, n)| *n += count)
            .or_insert((value, count));
    }

    /// Remove up to `count` occurrences; the element disappears at zero.
    pub fn remove(&mut self, value: &Value, count: usize) {
        let key = value.hash_key();
        if let Some((_, n)) = self.entries.get_mut(&key) {
            *n = n.saturating_sub(count);
            if *n == 0 {
                self.entries.remove(&key);
            }
        }
    }

    pub fn count(&self, value: &Value) -> usize {
        self.entries.get(&value.hash_key()).map_or(0, |(_, n)| *n)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.entries.contains_key(&value.hash_key())
    }

    /// Number of distinct elements.
    pub fn distinct_len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of occurrences.
    pub fn cardinality(&self) -> usize {
        self.entries.values().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct elements with their counts, in canonical order.
    pub fn elements(&self) -> Vec<(&Value, usize)> {
        let mut elements: Vec<(&Value, usize)> =
            self.entries.values().map(|(v, n)| (v, *n)).collect();
        elements.sort_by(|(a, _), (b, _)| a.canonical_cmp(b));
        elements
    }

    /// The set of distinct elements.
    pub fn to_set(&self) -> SetValue {
        self.entries.values().map(|(v, _)| v.clone()).collect()
    }

    fn merge(&self, other: &BagValue, combine: impl Fn(usize, usize) -> usize) -> BagValue {
        let mut entries = FxHashMap::default();
        for (key, (value, _)) in self.entries.iter().chain(&other.entries) {
            if entries.contains_key(key) {
                continue;
            }
            let n = combine(self.count_key(key), other.count_key(key));
            if n > 0 {
                entries.insert(key.clone(), (value.clone(), n));
            }
        }
        BagValue { entries }
    }

    fn count_key(&self, key: &str) -> usize {
        self.entries.get(key).map_or(0, |(_, n)| *n)
    }

    /// Bag union: the larger count of each element.
    pub fn union(&self, other: &BagValue) -> BagValue {
        self.merge(other, usize::max)
    }

    /// Additive sum (`⊕`).
    pub fn sum(&self, other: &BagValue) -> BagValue {
        self.merge(other, usize::saturating_add)
    }

    /// Saturating difference (`⊖`); counts below zero drop out.
    pub fn difference(&self, other: &BagValue) -> BagValue {
        self.merge(other, usize::saturating_sub)
    }

    /// Every element's count here is at most its count in `other`.
    pub fn is_subbag(&self, other: &BagValue) -> bool {
        self.entries
            .iter()
            .all(|(key, (_, n))| *n <= other.count_key(key))
    }

    pub fn is_proper_subbag(&self, other: &BagValue) -> bool {
        self.is_subbag(other) && self != other
    }

    pub fn is_superbag(&self, other: &BagValue) -> bool {
        other.is_subbag(self)
    }

    pub fn is_proper_superbag(&self, other: &BagValue) -> bool {
        other.is_proper_subbag(self)
    }

    pub(super) fn canonical_text(&self) -> String {
        let mut parts: Vec<String> = self
            .entries
            .iter()
            .map(|(key, (_, n))| format!("{key}:{n}"))
            .collect();
        parts.sort_unstable();
        format!("[{}]", parts.join(","))
    }
}

impl PartialEq for BagValue {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(key, (_, n))| other.count_key(key) == *n)
    }
}

impl fmt::Display for BagValue {
    /// `(1 :> 2 @@ 3 :> 1)`, the standard bag notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements = self.elements();
        if elements.is_empty() {
            return f.write_str("EmptyBag");
        }
        f.write_str("(")?;
        for (i, (value, n)) in elements.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" @@ ")?;
            }
            write!(f, "{value} :> {n}")?;
        }
        f.write_str(")")
    }
}
