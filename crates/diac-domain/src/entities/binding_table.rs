//! Binding table

use super::binding::Binding;
use crate::value_objects::DependencyKey;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Mapping from dependency key to binding
///
/// Iteration follows key order so compilation output is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTable {
    bindings: BTreeMap<DependencyKey, Binding>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key`, replacing any earlier binding (configuration time)
    pub fn bind(&mut self, key: DependencyKey, binding: Binding) -> Option<Binding> {
        self.bindings.insert(key, binding)
    }

    /// Record a binding discovered during resolution
    ///
    /// Existing entries are never replaced. Returns whether the binding was added.
    pub fn insert_discovered(&mut self, key: DependencyKey, binding: Binding) -> bool {
        match self.bindings.entry(key) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(binding);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Binding for `key`
    pub fn get(&self, key: &DependencyKey) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Whether `key` is bound
    pub fn contains(&self, key: &DependencyKey) -> bool {
        self.bindings.contains_key(key)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in key order
    pub fn iter(&self) -> btree_map::Iter<'_, DependencyKey, Binding> {
        self.bindings.iter()
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &DependencyKey> {
        self.bindings.keys()
    }
}

impl<'a> IntoIterator for &'a BindingTable {
    type Item = (&'a DependencyKey, &'a Binding);
    type IntoIter = btree_map::Iter<'a, DependencyKey, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(DependencyKey, Binding)> for BindingTable {
    fn from_iter<I: IntoIterator<Item = (DependencyKey, Binding)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}
