// File: src/values.rs
// Purpose: Field value and field error maps held by a form controller

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Current value of every field, keyed by field name
///
/// Maps are replaced, never edited in place, once handed to a controller:
/// [`FormValues::with_field`] returns the next map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues<V = String> {
    fields: BTreeMap<String, V>,
}

impl<V> FormValues<V> {
    /// Create an empty value map
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Get the value of a field
    pub fn get(&self, field: &str) -> Option<&V> {
        self.fields.get(field)
    }

    /// Check if the form manages a field
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Set a field, returning the previous value
    pub fn insert(&mut self, field: impl Into<String>, value: V) -> Option<V> {
        self.fields.insert(field.into(), value)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> BTreeMap<String, V> {
        self.fields
    }
}

impl<V: Clone> FormValues<V> {
    /// Copy of this map with `field` set to `value`
    ///
    /// Unknown fields are added.
    pub fn with_field(&self, field: &str, value: V) -> Self {
        let mut next = self.clone();
        next.insert(field, value);
        next
    }
}

impl FormValues<String> {
    /// Get a field as a string slice
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<V> Default for FormValues<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FormValues<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<V> From<BTreeMap<String, V>> for FormValues<V> {
    fn from(fields: BTreeMap<String, V>) -> Self {
        Self { fields }
    }
}

impl<V> From<HashMap<String, V>> for FormValues<V> {
    fn from(fields: HashMap<String, V>) -> Self {
        fields.into_iter().collect()
    }
}

impl<K: Into<String>, V, const N: usize> From<[(K, V); N]> for FormValues<V> {
    fn from(fields: [(K, V); N]) -> Self {
        fields.into_iter().collect()
    }
}

/// Validation errors keyed by field name
///
/// A missing key means the field is currently valid. The descriptor type is
/// whatever the validator produces; the controller never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors<E = String> {
    fields: BTreeMap<String, E>,
}

impl<E> FormErrors<E> {
    /// Create an empty error map
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Check if field has an error
    pub fn has_error(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Get error for a field
    pub fn get(&self, field: &str) -> Option<&E> {
        self.fields.get(field)
    }

    /// Record an error for a field, returning the one it replaces
    pub fn insert(&mut self, field: impl Into<String>, error: E) -> Option<E> {
        self.fields.insert(field.into(), error)
    }

    /// Clear the error for a field
    pub fn remove(&mut self, field: &str) -> Option<E> {
        self.fields.remove(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field has an error
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &E)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> BTreeMap<String, E> {
        self.fields
    }
}

impl FormErrors<String> {
    /// Get error message for a field
    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<E> Default for FormErrors<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, E> FromIterator<(K, E)> for FormErrors<E> {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<E> From<BTreeMap<String, E>> for FormErrors<E> {
    fn from(fields: BTreeMap<String, E>) -> Self {
        Self { fields }
    }
}

impl<E> From<HashMap<String, E>> for FormErrors<E> {
    fn from(fields: HashMap<String, E>) -> Self {
        fields.into_iter().collect()
    }
}

impl<K: Into<String>, E, const N: usize> From<[(K, E); N]> for FormErrors<E> {
    fn from(fields: [(K, E); N]) -> Self {
        fields.into_iter().collect()
    }
}
