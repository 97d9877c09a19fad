//! Ordered record store.
//!
//! [`PatientStore`] is the single owner of all stored [`Patient`] values. It
//! is an ordered associative container keyed by the patient identifier
//! string; iteration order is key order, which carries no business meaning.
//!
//! Callers never receive references that alias stored state: reads hand out
//! clones, and every mutation goes through insert-overwrite of a whole value.
//! The store itself does no validation; uniqueness of keys falls out of the
//! overwrite-by-key semantics.

use crate::patient::Patient;
use std::collections::BTreeMap;

/// Ordered map from patient id to [`Patient`].
#[derive(Clone, Debug, Default)]
pub struct PatientStore {
    entries: BTreeMap<String, Patient>,
}

impl PatientStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the value at `key`.
    ///
    /// Always succeeds. Returns the previous value when one existed, so
    /// callers that care about what was replaced can observe it.
    pub fn insert(&mut self, key: String, value: Patient) -> Option<Patient> {
        self.entries.insert(key, value)
    }

    /// Returns a clone of the current value at `key`, or `None`.
    pub fn get(&self, key: &str) -> Option<Patient> {
        self.entries.get(key).cloned()
    }

    /// Removes `key` if present, returning the removed value.
    pub fn remove(&mut self, key: &str) -> Option<Patient> {
        self.entries.remove(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns clones of all stored values in key order.
    pub fn values(&self) -> Vec<Patient> {
        self.entries.values().cloned().collect()
    }

    /// Number of stored patients.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no patients.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
