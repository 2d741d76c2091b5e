// File: src/event.rs
// Purpose: Typed input events adapted to the controller's (field, value) contract

use std::cell::Cell;

/// Suppresses the platform's default action for an event
///
/// Implemented for any `Fn()` and for the event types in this module.
pub trait PreventDefault {
    fn prevent_default(&self);
}

impl<F: Fn()> PreventDefault for F {
    fn prevent_default(&self) {
        self()
    }
}

/// Which entry point a field update came through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEventKind {
    /// Live input
    Change,
    /// Focus left the field
    Blur,
}

impl std::fmt::Display for FieldEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldEventKind::Change => write!(f, "change"),
            FieldEventKind::Blur => write!(f, "blur"),
        }
    }
}

/// The input element an event originated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTarget<V = String> {
    pub name: String,
    pub value: V,
}

/// Change or blur event raised by a named input
#[derive(Debug)]
pub struct FieldEvent<V = String> {
    pub target: FieldTarget<V>,
    default_prevented: Cell<bool>,
}

impl<V> FieldEvent<V> {
    /// Create an event for input `name` now holding `value`
    pub fn new(name: impl Into<String>, value: V) -> Self {
        Self {
            target: FieldTarget {
                name: name.into(),
                value,
            },
            default_prevented: Cell::new(false),
        }
    }

    /// Whether a handler suppressed the default action
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl<V> PreventDefault for FieldEvent<V> {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}

/// Form submission event
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: Cell<bool>,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl PreventDefault for SubmitEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}
