// File: src/error.rs
// Purpose: Controller failures caused by misconfigured callbacks

use thiserror::Error;

/// Failure of a controller operation
///
/// Field validation messages are data and never show up here; these variants
/// only report a callback the caller did not wire up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field `{field}` changed but the form has no validator")]
    MissingValidator { field: String },

    #[error("form submitted but no submit handler is configured")]
    MissingSubmitHandler,

    #[error("submit handler re-entered the form's submit")]
    ReentrantSubmit,
}
