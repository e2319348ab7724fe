//! Field sets and the field scope used while parsing.
//!
//! Every primary query is built once per field in the active field set. The
//! active set starts as the default fields and is replaced by `field:` and
//! `*:` prefixes for the primary that follows them. Once that primary is
//! built the active set goes back to the defaults, even inside a scoped group.

use std::{collections::HashSet, sync::Arc};

/// An insertion-ordered set of field names without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    /// Field names in insertion order.
    fields: Vec<Arc<str>>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, returning false if it was already present.
    pub fn insert(&mut self, field: Arc<str>) -> bool {
        if self.contains(&field) {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Returns true if the set contains `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| &**f == field)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<str>> {
        self.fields.iter()
    }
}

impl FromIterator<Arc<str>> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Arc<str>>>(iter: I) -> Self {
        let mut set = Self::new();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

/// Hands out one shared allocation per distinct field name.
#[derive(Debug, Default)]
pub struct FieldInterner {
    /// Interned names.
    names: HashSet<Arc<str>>,
}

impl FieldInterner {
    /// Returns the shared name for `field`, interning it on first use.
    pub fn intern(&mut self, field: &str) -> Arc<str> {
        if let Some(existing) = self.names.get(field) {
            return Arc::clone(existing);
        }
        let name: Arc<str> = Arc::from(field);
        self.names.insert(Arc::clone(&name));
        name
    }
}

/// Tracks which fields the primary being parsed applies to.
#[derive(Debug)]
pub struct FieldScope {
    /// Fields a query may name.
    all: FieldSet,
    /// Fields used when no prefix is given.
    defaults: FieldSet,
    /// Fields for the primary being parsed.
    active: FieldSet,
    /// Whether names outside `all` are accepted.
    allow_any: bool,
    /// Field-name interner.
    interner: FieldInterner,
}

impl FieldScope {
    /// Creates a scope. Default fields are added to the permitted fields, and
    /// an empty default list means every permitted field.
    pub fn new(all: &[String], defaults: &[String], allow_any: bool) -> Self {
        let mut interner = FieldInterner::default();
        let defaults: FieldSet = defaults.iter().map(|f| interner.intern(f)).collect();
        let mut all: FieldSet = all.iter().map(|f| interner.intern(f)).collect();
        for field in defaults.iter() {
            all.insert(Arc::clone(field));
        }
        let defaults = if defaults.is_empty() {
            all.clone()
        } else {
            defaults
        };
        Self {
            active: defaults.clone(),
            all,
            defaults,
            allow_any,
            interner,
        }
    }

    /// Returns the fields for the primary being parsed.
    pub fn active(&self) -> &FieldSet {
        &self.active
    }

    /// Returns the default fields.
    pub fn defaults(&self) -> &FieldSet {
        &self.defaults
    }

    /// Resets the active fields to the defaults.
    ///
    /// Called when a parse starts and after every scoped primary.
    pub fn reset(&mut self) {
        self.active = self.defaults.clone();
    }

    /// Scopes to the named fields.
    ///
    /// Names that are not permitted are dropped unless any field is allowed,
    /// so the new scope may be empty.
    pub fn enter_explicit(&mut self, names: &[String]) {
        let mut scoped = FieldSet::new();
        for name in names {
            if self.allow_any || self.all.contains(name) {
                scoped.insert(self.interner.intern(name));
            }
        }
        self.active = scoped;
    }

    /// Scopes to every permitted field.
    pub fn enter_all(&mut self) {
        self.active = self.all.clone();
    }
}
