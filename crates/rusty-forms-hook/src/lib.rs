//! # rusty-forms-hook
//!
//! Form state as a hook: one controller owns the field values, the error map
//! produced by a caller-supplied validator, and a validity flag derived from
//! that map. Submission is delegated to a caller-supplied handler.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_forms_hook::{use_form, FormController, FormErrors, FormValues};
//!
//! fn validations(changed: &str, values: &FormValues, previous: &FormErrors) -> FormErrors {
//!     let mut errors = previous.clone();
//!     if values.get_str(changed) == Some("") {
//!         errors.insert(changed, format!("{} is required", changed));
//!     } else {
//!         errors.remove(changed);
//!     }
//!     errors
//! }
//!
//! let initial = FormValues::from([("name", "john".to_string()), ("zip", "12345".to_string())]);
//! let form: FormController = use_form(initial, validations, |values: &FormValues| {
//!     println!("submitting {} fields", values.len());
//! });
//!
//! form.handle_change("name", String::new()).unwrap();
//! assert_eq!(form.errors().message("name"), Some("name is required"));
//! assert!(!form.is_valid());
//!
//! // Submission is never gated on validity
//! form.handle_submit(None).unwrap();
//! ```
//!
//! ## The validation cycle
//!
//! A change or blur builds a new value map with the field replaced, stores
//! it, then calls the validator with the changed field name, the new values
//! and the *previous* errors. The validator's return value replaces the error
//! map wholesale and `is_valid` becomes `errors.is_empty()`. Both writes land
//! in the same render, so readers never see them out of step.
//!
//! `is_valid` starts out `false` and only becomes meaningful after the first
//! validation pass.
//!
//! ## Architecture
//!
//! - [`controller`] - [`FormController`] and its builder
//! - [`validation`] - [`Validator`] and [`SubmitHandler`] callback seams
//! - [`event`] - typed change/blur/submit events and [`PreventDefault`]
//! - [`values`] - [`FormValues`] and [`FormErrors`] maps
//! - [`snapshot`] - [`FormSnapshot`], the state one render sees
//! - [`config`] - [`FormOptions`], loadable from TOML
//! - [`testing`] - `render_hook`/`act` harness
//!
//! State cells and render batching come from `rusty-forms-state`.

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod snapshot;
pub mod testing;
pub mod validation;
pub mod values;

pub use config::FormOptions;
pub use controller::{FormBuilder, FormController};
pub use error::FormError;
pub use event::{FieldEvent, FieldEventKind, FieldTarget, PreventDefault, SubmitEvent};
pub use snapshot::FormSnapshot;
pub use validation::{AlwaysValid, SubmitHandler, Validator};
pub use values::{FormErrors, FormValues};

pub use rusty_forms_state::{RenderQueue, SubscriptionId};

use std::fmt::Debug;

/// Create a form controller, hook style
///
/// `validations` runs on every change and blur; `submit_form` receives the
/// current values on every submit.
pub fn use_form<V, E, F, S>(
    initial: impl Into<FormValues<V>>,
    validations: F,
    submit_form: S,
) -> FormController<V, E>
where
    V: Clone + Debug + 'static,
    E: Clone + Debug + 'static,
    F: Fn(&str, &FormValues<V>, &FormErrors<E>) -> FormErrors<E> + 'static,
    S: FnMut(&FormValues<V>) + 'static,
{
    FormController::new(initial, validations, submit_form)
}
