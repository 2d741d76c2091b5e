// File: src/validation.rs
// Purpose: Caller-supplied validation and submission callbacks

use crate::values::{FormErrors, FormValues};

/// Computes the full error map for a form after one field changed
///
/// Implemented for any `Fn(&str, &FormValues<V>, &FormErrors<E>) -> FormErrors<E>`.
/// The returned map replaces the previous one wholesale, so a validator that
/// only checks `changed` must carry the other entries of `previous` forward.
pub trait Validator<V, E> {
    /// Validate `values` after `changed` was updated
    fn validate(
        &self,
        changed: &str,
        values: &FormValues<V>,
        previous: &FormErrors<E>,
    ) -> FormErrors<E>;
}

impl<V, E, F> Validator<V, E> for F
where
    F: Fn(&str, &FormValues<V>, &FormErrors<E>) -> FormErrors<E>,
{
    fn validate(
        &self,
        changed: &str,
        values: &FormValues<V>,
        previous: &FormErrors<E>,
    ) -> FormErrors<E> {
        self(changed, values, previous)
    }
}

/// Validator that accepts every value
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl<V, E> Validator<V, E> for AlwaysValid {
    fn validate(&self, _: &str, _: &FormValues<V>, _: &FormErrors<E>) -> FormErrors<E> {
        FormErrors::new()
    }
}

/// Receives the form values on submit
///
/// Implemented for any `FnMut(&FormValues<V>)`.
pub trait SubmitHandler<V> {
    fn submit(&mut self, values: &FormValues<V>);
}

impl<V, F> SubmitHandler<V> for F
where
    F: FnMut(&FormValues<V>),
{
    fn submit(&mut self, values: &FormValues<V>) {
        self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn require_non_empty(
        changed: &str,
        values: &FormValues,
        previous: &FormErrors,
    ) -> FormErrors {
        let mut errors = previous.clone();
        match values.get_str(changed) {
            Some("") => {
                errors.insert(changed, format!("{} is required", changed));
            }
            _ => {
                errors.remove(changed);
            }
        }
        errors
    }

    #[test]
    fn test_fn_validator_sees_previous_errors() {
        let values = FormValues::from([("name", String::new()), ("zip", "1".to_string())]);
        let previous = FormErrors::from([("zip", "zip is required".to_string())]);

        let errors = require_non_empty.validate("name", &values, &previous);
        assert_eq!(errors.len(), 2);

        let values = values.with_field("zip", "12345".to_string());
        let errors = require_non_empty.validate("zip", &values, &errors);
        assert_eq!(errors.message("name"), Some("name is required"));
        assert!(!errors.has_error("zip"));
    }

    #[test]
    fn test_always_valid_ignores_previous_errors() {
        let previous = FormErrors::from([("name", "bad".to_string())]);
        let errors: FormErrors =
            AlwaysValid.validate("name", &FormValues::<String>::new(), &previous);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_closure_submit_handler() {
        let mut seen = Vec::new();
        {
            let mut handler = |values: &FormValues| seen.push(values.len());
            handler.submit(&FormValues::from([("a", "1".to_string())]));
            handler.submit(&FormValues::<String>::new());
        }
        assert_eq!(seen, vec![1, 0]);
    }
}
