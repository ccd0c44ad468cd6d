//! Scoped variable bindings with next-state tracking.
//!
//! A `Scope` holds, per name, a current value and an optional primed
//! (next-state) value. Scopes form a parent chain; a binding is visible to
//! the scope it was made in and that scope's descendants only.

// Rc is the intentional implementation detail of LocalScope<T>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of LocalScope<T>"
)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tlx_values::Value;

use crate::association::AssociationContext;
use crate::errors::{name_not_found, EvalError};

/// A single-threaded, reference-counted cell.
///
/// All scope and association-context sharing goes through this wrapper.
/// It is deliberately not `Send`: one evaluation owns its scope chain.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// What kind of variable a binding introduces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Model state variables (the root scope).
    State,
    /// Quantifier, LET and EXCEPT bound names.
    Local,
    /// Names introduced inside a statement block.
    BlockReturn,
}

/// Per-name state. The name has been primed when `primed` is set.
#[derive(Clone, Debug)]
struct Binding {
    current: Option<Value>,
    primed: Option<Value>,
    namespace: Namespace,
}

/// One link in the scope chain.
#[derive(Clone, Debug)]
pub struct Scope {
    bindings: FxHashMap<String, Binding>,
    parent: Option<LocalScope<Scope>>,
    namespace: Namespace,
    self_record: Option<Value>,
    self_class: Option<String>,
    associations: Option<LocalScope<AssociationContext>>,
    /// `@` inside an EXCEPT clause.
    existing: Option<Value>,
}

impl Scope {
    /// An empty root scope for state variables.
    pub fn root() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
            namespace: Namespace::State,
            self_record: None,
            self_class: None,
            associations: None,
            existing: None,
        }
    }

    /// A child of `parent`, inheriting its self record, class and
    /// association context.
    pub fn child(parent: &LocalScope<Scope>, namespace: Namespace) -> Self {
        let p = parent.borrow();
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent.clone()),
            namespace,
            self_record: p.self_record.clone(),
            self_class: p.self_class.clone(),
            associations: p.associations.clone(),
            existing: None,
        }
    }

    /// Evaluate relative to `record`, an instance of `class`.
    #[must_use]
    pub fn with_self(mut self, record: Value, class: impl Into<String>) -> Self {
        self.self_record = Some(record);
        self.self_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_associations(mut self, context: LocalScope<AssociationContext>) -> Self {
        self.associations = Some(context);
        self
    }

    pub fn set_associations(&mut self, context: LocalScope<AssociationContext>) {
        self.associations = Some(context);
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn self_record(&self) -> Option<&Value> {
        self.self_record.as_ref()
    }

    pub fn self_class(&self) -> Option<&str> {
        self.self_class.as_deref()
    }

    pub fn associations(&self) -> Option<&LocalScope<AssociationContext>> {
        self.associations.as_ref()
    }

    /// Bind `name` in this scope's namespace.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        let namespace = self.namespace;
        self.bindings
            .entry(name.into())
            .and_modify(|b| b.current = Some(value.clone()))
            .or_insert(Binding {
                current: Some(value),
                primed: None,
                namespace,
            });
    }

    /// Set the next-state value of `name`, creating the entry if needed.
    pub fn bind_primed(&mut self, name: impl Into<String>, value: Value) {
        let namespace = self.namespace;
        self.bindings
            .entry(name.into())
            .and_modify(|b| b.primed = Some(value.clone()))
            .or_insert(Binding {
                current: None,
                primed: Some(value),
                namespace,
            });
    }

    /// Forget the next-state value of `name` in this scope only.
    pub fn unprime(&mut self, name: &str) {
        if let Some(binding) = self.bindings.get_mut(name) {
            binding.primed = None;
            if binding.current.is_none() {
                self.bindings.remove(name);
            }
        }
    }

    /// Forget every next-state value in this scope, so primed reads fall
    /// back to current values again.
    pub fn clear_primed(&mut self) {
        self.bindings.retain(|_, binding| {
            binding.primed = None;
            binding.current.is_some()
        });
    }

    /// The current value of `name`, searching outward.
    ///
    /// Primed values are never returned here.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.bindings.get(name).and_then(|b| b.current.as_ref()) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => Err(name_not_found(name)),
        }
    }

    /// The primed value of `name`, searching outward.
    ///
    /// `Ok(None)` means the variable exists but has not been primed;
    /// only a name bound nowhere is an error.
    pub fn lookup_primed(&self, name: &str) -> Result<Option<Value>, EvalError> {
        let entry = self.bindings.get(name);
        if let Some(value) = entry.and_then(|b| b.primed.as_ref()) {
            return Ok(Some(value.clone()));
        }
        let outer = match &self.parent {
            Some(parent) => parent.borrow().lookup_primed(name),
            None => Err(name_not_found(name)),
        };
        match outer {
            Err(_) if entry.is_some_and(|b| b.current.is_some()) => Ok(None),
            other => other,
        }
    }

    /// Whether `name` has a current value anywhere in the chain.
    pub fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Every primed binding visible from this scope; inner scopes win.
    pub fn primed_bindings(&self) -> BTreeMap<String, Value> {
        let mut primed = match &self.parent {
            Some(parent) => parent.borrow().primed_bindings(),
            None => BTreeMap::new(),
        };
        for (name, binding) in &self.bindings {
            if let Some(value) = &binding.primed {
                primed.insert(name.clone(), value.clone());
            }
        }
        primed
    }

    /// Current bindings made in this scope under `namespace`, sorted by name.
    pub fn bindings_in(&self, namespace: Namespace) -> Vec<(String, Value)> {
        let mut out: Vec<(String, Value)> = self
            .bindings
            .iter()
            .filter(|(_, b)| b.namespace == namespace)
            .filter_map(|(name, b)| b.current.clone().map(|v| (name.clone(), v)))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// The `@` value, inherited from enclosing scopes.
    pub fn existing_value(&self) -> Option<Value> {
        if let Some(value) = &self.existing {
            return Some(value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().existing_value())
    }

    pub fn set_existing_value(&mut self, value: Value) {
        self.existing = Some(value);
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::root()
    }
}
