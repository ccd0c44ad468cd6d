//! Records: string-keyed field maps, optionally stamped with an instance
//! identity by the association subsystem.

use std::collections::BTreeMap;
use std::fmt;

use super::Value;
use crate::errors::{field_not_found, EvalError};

/// Opaque handle for one record instance in the association graph.
///
/// The stamp is bookkeeping for the link tables. It takes no part in value
/// equality or content keys. Copies of a stamped record share its identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(u32);

impl Identity {
    pub const fn new(raw: u32) -> Self {
        Identity(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A record value. Fields enumerate in sorted order.
#[derive(Clone, Debug, Default)]
pub struct RecordValue {
    fields: BTreeMap<String, Value>,
    identity: Option<Identity>,
}

impl RecordValue {
    pub fn new() -> Self {
        RecordValue::default()
    }

    pub fn from_fields<N: Into<String>>(fields: impl IntoIterator<Item = (N, Value)>) -> Self {
        RecordValue {
            fields: fields.into_iter().map(|(n, v)| (n.into(), v)).collect(),
            identity: None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Like `get`, failing when the field is absent.
    pub fn field(&self, name: &str) -> Result<&Value, EvalError> {
        self.fields.get(name).ok_or_else(|| field_not_found(name))
    }

    /// Insert or replace a field.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A copy with one field set.
    #[must_use]
    pub fn with_field(&self, name: impl Into<String>, value: Value) -> RecordValue {
        let mut copy = self.clone();
        copy.set(name, value);
        copy
    }

    /// A copy with one field removed.
    #[must_use]
    pub fn without_field(&self, name: &str) -> RecordValue {
        let mut copy = self.clone();
        copy.fields.remove(name);
        copy
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity
    }

    /// Bind this record to an instance identity.
    pub fn stamp(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Field names are length-prefixed so no name can spell out a
    /// neighbouring field.
    pub(super) fn canonical_text(&self) -> String {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(name, value)| format!("{}:{name}={}", name.len(), value.hash_key()))
            .collect();
        format!("[{}]", fields.join(","))
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} |-> {value}")?;
        }
        f.write_str("]")
    }
}
