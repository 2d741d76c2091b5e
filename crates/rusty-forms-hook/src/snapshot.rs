// File: src/snapshot.rs
// Purpose: Settled form state for one render cycle

use crate::values::{FormErrors, FormValues};
use serde::{Deserialize, Serialize};

/// Values, errors and validity as of one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot<V = String, E = String> {
    pub values: FormValues<V>,
    pub errors: FormErrors<E>,
    pub is_valid: bool,
}

impl<V, E> FormSnapshot<V, E> {
    /// Check if field has an error
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.has_error(field)
    }

    /// Get error for a field
    pub fn error(&self, field: &str) -> Option<&E> {
        self.errors.get(field)
    }

    /// Get value of a field
    pub fn value(&self, field: &str) -> Option<&V> {
        self.values.get(field)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<V: Serialize, E: Serialize> FormSnapshot<V, E> {
    /// Serialize for a client-side renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
