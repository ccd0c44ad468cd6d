//! Object identity and association links.
//!
//! Records are values everywhere else; here they become graph nodes. Each
//! participating record is stamped with an `Identity` and stored in an
//! arena keyed by it, and links are indexed by identity in both
//! directions. Two structurally equal records stamped separately are
//! different nodes.
//!
//! Association metadata is registered once while the model loads and
//! survives `reset_runtime`; identities and links do not.

mod cardinality;

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tlx_values::{Identity, RecordValue, SetValue, Value};
use tracing::{debug, trace};

pub use cardinality::Cardinality;

use crate::errors::EvalError;

/// Uniquely names one class association.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssociationKey(String);

impl AssociationKey {
    pub fn new(key: impl Into<String>) -> Self {
        AssociationKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssociationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which way a traversal follows links.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Records this one links to.
    Forward,
    /// Records that link to this one.
    Reverse,
}

/// Registration data for one association.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Association {
    pub key: AssociationKey,
    /// Field name used for forward navigation; reverse uses `_` + name.
    pub name: String,
    pub from_class: String,
    pub to_class: String,
    /// How many `from` records one `to` record may be linked from.
    pub from_cardinality: Cardinality,
    /// How many `to` records one `from` record may link to.
    pub to_cardinality: Cardinality,
}

impl Association {
    /// An association with `*` at both ends.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        from_class: impl Into<String>,
        to_class: impl Into<String>,
    ) -> Self {
        Association {
            key: AssociationKey::new(key),
            name: name.into(),
            from_class: from_class.into(),
            to_class: to_class.into(),
            from_cardinality: Cardinality::Many,
            to_cardinality: Cardinality::Many,
        }
    }

    #[must_use]
    pub fn with_cardinalities(mut self, from: Cardinality, to: Cardinality) -> Self {
        self.from_cardinality = from;
        self.to_cardinality = to;
        self
    }
}

/// What a navigable field on a class resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationInfo {
    pub key: AssociationKey,
    pub target_class: String,
    pub cardinality: Cardinality,
    pub direction: Direction,
}

/// Result of a traversal.
#[derive(Clone, Debug, PartialEq)]
pub enum Related {
    /// The record has never been given an identity.
    NotRegistered,
    /// Related records; empty when the record has no links.
    Found(Vec<Value>),
}

impl Related {
    pub fn is_registered(&self) -> bool {
        matches!(self, Related::Found(_))
    }

    pub fn into_values(self) -> Vec<Value> {
        match self {
            Related::NotRegistered => Vec::new(),
            Related::Found(values) => values,
        }
    }
}

/// A record whose link count breaks its association's bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardinalityViolation {
    pub key: AssociationKey,
    pub identity: Identity,
    pub class: String,
    pub direction: Direction,
    pub count: usize,
    pub expected: Cardinality,
}

impl fmt::Display for CardinalityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let way = match self.direction {
            Direction::Forward => "links to",
            Direction::Reverse => "is linked from",
        };
        write!(
            f,
            "{} {} {way} {} records via {}, expected {}",
            self.class, self.identity, self.count, self.key, self.expected
        )
    }
}

#[derive(Clone, Debug)]
struct Instance {
    record: RecordValue,
    class: Option<String>,
}

type LinkTable = FxHashMap<(AssociationKey, Identity), SmallVec<[Identity; 4]>>;

/// Association metadata plus the runtime identity arena and link tables.
///
/// One context serves one simulation run; it does no locking.
#[derive(Clone, Debug, Default)]
pub struct AssociationContext {
    associations: FxHashMap<AssociationKey, Association>,
    /// `(class, field)` to the association the field navigates.
    relations: FxHashMap<(String, String), RelationInfo>,
    instances: FxHashMap<Identity, Instance>,
    forward: LinkTable,
    reverse: LinkTable,
    /// Never reset, so identities are not reused across runs.
    next_identity: u32,
}

impl AssociationContext {
    pub fn new() -> Self {
        Self::default()
    }

    // Metadata

    /// Register an association and its forward and reverse navigation
    /// fields.
    pub fn register(&mut self, association: Association) -> Result<(), EvalError> {
        if self.associations.contains_key(&association.key) {
            return Err(EvalError::new(format!(
                "association {} is already registered",
                association.key
            )));
        }
        debug!(
            key = %association.key,
            name = %association.name,
            from = %association.from_class,
            to = %association.to_class,
            "association registered"
        );
        self.relations.insert(
            (association.from_class.clone(), association.name.clone()),
            RelationInfo {
                key: association.key.clone(),
                target_class: association.to_class.clone(),
                cardinality: association.to_cardinality,
                direction: Direction::Forward,
            },
        );
        self.relations.insert(
            (association.to_class.clone(), format!("_{}", association.name)),
            RelationInfo {
                key: association.key.clone(),
                target_class: association.from_class.clone(),
                cardinality: association.from_cardinality,
                direction: Direction::Reverse,
            },
        );
        self.associations
            .insert(association.key.clone(), association);
        Ok(())
    }

    pub fn association(&self, key: &AssociationKey) -> Option<&Association> {
        self.associations.get(key)
    }

    /// The association navigated by `field` on `class`, if any.
    pub fn relation(&self, class: &str, field: &str) -> Option<&RelationInfo> {
        self.relations.get(&(class.to_string(), field.to_string()))
    }

    // Identities

    /// The identity of `record`, stamping it with a fresh one first if it
    /// has none. The arena keeps a snapshot of the stamped record.
    pub fn identify(&mut self, record: &mut RecordValue, class: Option<&str>) -> Identity {
        let identity = match record.identity() {
            Some(identity) => identity,
            None => {
                let identity = Identity::new(self.next_identity);
                self.next_identity = self.next_identity.saturating_add(1);
                record.stamp(identity);
                trace!(%identity, class, "identity assigned");
                identity
            }
        };
        let snapshot = record.clone();
        self.instances
            .entry(identity)
            .and_modify(|instance| {
                instance.record = snapshot.clone();
                if instance.class.is_none() {
                    instance.class = class.map(str::to_string);
                }
            })
            .or_insert_with(|| Instance {
                record: snapshot,
                class: class.map(str::to_string),
            });
        identity
    }

    /// The identity of `record` if it belongs to this run.
    pub fn identity_of(&self, record: &RecordValue) -> Option<Identity> {
        record
            .identity()
            .filter(|identity| self.instances.contains_key(identity))
    }

    /// The class `record` was identified as, if known.
    pub fn class_of(&self, record: &RecordValue) -> Option<&str> {
        let identity = self.identity_of(record)?;
        self.instances.get(&identity)?.class.as_deref()
    }

    /// Refresh the stored snapshot of an identified record.
    pub fn update(&mut self, record: &RecordValue) -> bool {
        let Some(instance) = record
            .identity()
            .and_then(|identity| self.instances.get_mut(&identity))
        else {
            return false;
        };
        instance.record = record.clone();
        true
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    // Links

    /// Link `from` to `to` under `key`, identifying both records.
    ///
    /// The arena keeps the records as they are now. Navigation returns
    /// those snapshots until `update` stores a newer copy.
    ///
    /// Returns `false` if the link already existed.
    pub fn link(
        &mut self,
        key: &AssociationKey,
        from: &mut RecordValue,
        to: &mut RecordValue,
    ) -> Result<bool, EvalError> {
        let association = self
            .associations
            .get(key)
            .ok_or_else(|| EvalError::new(format!("association {key} is not registered")))?;
        let from_class = association.from_class.clone();
        let to_class = association.to_class.clone();

        let source = self.identify(from, Some(&from_class));
        let target = self.identify(to, Some(&to_class));

        let targets = self.forward.entry((key.clone(), source)).or_default();
        if targets.contains(&target) {
            return Ok(false);
        }
        targets.push(target);
        self.reverse
            .entry((key.clone(), target))
            .or_default()
            .push(source);
        trace!(association = %key, from = %source, to = %target, "link created");
        Ok(true)
    }

    /// Remove the link from `from` to `to`; returns whether it existed.
    pub fn unlink(&mut self, key: &AssociationKey, from: &RecordValue, to: &RecordValue) -> bool {
        let (Some(source), Some(target)) = (self.identity_of(from), self.identity_of(to)) else {
            return false;
        };
        let removed = remove_link(&mut self.forward, key, source, target);
        if removed {
            remove_link(&mut self.reverse, key, target, source);
            trace!(association = %key, from = %source, to = %target, "link removed");
        }
        removed
    }

    /// Records related to `record` through `key`, in link order, as last
    /// stored by `identify` or `update`.
    pub fn related(&self, key: &AssociationKey, record: &RecordValue, direction: Direction) -> Related {
        let Some(identity) = self.identity_of(record) else {
            return Related::NotRegistered;
        };
        let table = match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        };
        let records = table
            .get(&(key.clone(), identity))
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.instances.get(id))
                    .map(|instance| Value::Record(instance.record.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Related::Found(records)
    }

    /// Navigate `field` from `record`, using the record's own class when
    /// known and `scope_class` otherwise.
    ///
    /// `None` when `field` is not an association on that class.
    pub fn navigate(
        &self,
        record: &RecordValue,
        scope_class: Option<&str>,
        field: &str,
    ) -> Option<SetValue> {
        let class = self.class_of(record).or(scope_class)?;
        let info = self.relation(class, field)?;
        Some(
            self.related(&info.key, record, info.direction)
                .into_values()
                .into_iter()
                .collect(),
        )
    }

    /// Forget every identity and link; metadata stays.
    pub fn reset_runtime(&mut self) {
        debug!(
            instances = self.instances.len(),
            links = self.forward.values().map(SmallVec::len).sum::<usize>(),
            "association runtime reset"
        );
        self.instances.clear();
        self.forward.clear();
        self.reverse.clear();
    }

    /// Every identified record whose link count falls outside the
    /// cardinality declared for its end of an association.
    pub fn cardinality_violations(&self) -> Vec<CardinalityViolation> {
        let mut associations: Vec<&Association> = self.associations.values().collect();
        associations.sort_by(|a, b| a.key.cmp(&b.key));
        let mut instances: Vec<(&Identity, &Instance)> = self.instances.iter().collect();
        instances.sort_by_key(|(identity, _)| **identity);

        let mut violations = Vec::new();
        for association in associations {
            for (identity, instance) in &instances {
                let Some(class) = instance.class.as_deref() else {
                    continue;
                };
                let ends = [
                    (
                        &association.from_class,
                        &self.forward,
                        Direction::Forward,
                        association.to_cardinality,
                    ),
                    (
                        &association.to_class,
                        &self.reverse,
                        Direction::Reverse,
                        association.from_cardinality,
                    ),
                ];
                for (end_class, table, direction, expected) in ends {
                    if end_class != class {
                        continue;
                    }
                    let count = table
                        .get(&(association.key.clone(), **identity))
                        .map_or(0, SmallVec::len);
                    if !expected.admits(count) {
                        violations.push(CardinalityViolation {
                            key: association.key.clone(),
                            identity: **identity,
                            class: class.to_string(),
                            direction,
                            count,
                            expected,
                        });
                    }
                }
            }
        }
        violations
    }
}

fn remove_link(table: &mut LinkTable, key: &AssociationKey, at: Identity, other: Identity) -> bool {
    let slot = (key.clone(), at);
    let Some(ids) = table.get_mut(&slot) else {
        return false;
    };
    let Some(pos) = ids.iter().position(|id| *id == other) else {
        return false;
    };
    ids.remove(pos);
    if ids.is_empty() {
        table.remove(&slot);
    }
    true
}
