// File: src/controller.rs
// Purpose: Form state controller: values, errors, validity and submission

use crate::config::FormOptions;
use crate::error::FormError;
use crate::event::{FieldEvent, FieldEventKind, PreventDefault, SubmitEvent};
use crate::snapshot::FormSnapshot;
use crate::validation::{SubmitHandler, Validator};
use crate::values::{FormErrors, FormValues};
use rusty_forms_state::{use_state, LocalCell, RenderQueue, StateCell, SubscriptionId};
use std::cell::RefCell;
use std::fmt::{self, Debug};
use tracing::{debug, info, warn};

/// Owns the state of one form
///
/// Three independent cells hold the field values, the validator's error map
/// and the derived validity flag. Every operation runs as one render batch on
/// the controller's [`RenderQueue`], so subscribers only ever see settled
/// state where `is_valid == errors.is_empty()` after a validation pass.
pub struct FormController<V = String, E = String> {
    options: FormOptions,
    queue: RenderQueue,
    values: LocalCell<FormValues<V>>,
    errors: LocalCell<FormErrors<E>>,
    is_valid: LocalCell<bool>,
    validator: Option<Box<dyn Validator<V, E>>>,
    submit: Option<RefCell<Box<dyn SubmitHandler<V>>>>,
}

/// Builder for [`FormController`]
pub struct FormBuilder<V = String, E = String> {
    initial: FormValues<V>,
    options: FormOptions,
    queue: Option<RenderQueue>,
    validator: Option<Box<dyn Validator<V, E>>>,
    submit: Option<Box<dyn SubmitHandler<V>>>,
}

impl<V, E> FormBuilder<V, E>
where
    V: Clone + Debug + 'static,
    E: Clone + Debug + 'static,
{
    /// Set controller options
    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    /// Render through an existing queue instead of a private one
    pub fn queue(mut self, queue: &RenderQueue) -> Self {
        self.queue = Some(queue.clone());
        self
    }

    /// Validate with a closure
    pub fn validations<F>(mut self, validations: F) -> Self
    where
        F: Fn(&str, &FormValues<V>, &FormErrors<E>) -> FormErrors<E> + 'static,
    {
        self.validator = Some(Box::new(validations));
        self
    }

    /// Validate with any [`Validator`] implementation
    pub fn validator(mut self, validator: impl Validator<V, E> + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Submit with a closure
    pub fn on_submit<S>(mut self, submit: S) -> Self
    where
        S: FnMut(&FormValues<V>) + 'static,
    {
        self.submit = Some(Box::new(submit));
        self
    }

    /// Submit with any [`SubmitHandler`] implementation
    pub fn submit_handler(mut self, submit: impl SubmitHandler<V> + 'static) -> Self {
        self.submit = Some(Box::new(submit));
        self
    }

    /// Create the controller; errors start empty and validity false
    pub fn build(self) -> FormController<V, E> {
        let queue = self.queue.unwrap_or_default();

        debug!(
            name = %self.options.name,
            field_count = self.initial.len(),
            has_validator = self.validator.is_some(),
            has_submit = self.submit.is_some(),
            "form controller created"
        );

        FormController {
            values: use_state(self.initial, &queue),
            errors: use_state(FormErrors::new(), &queue),
            is_valid: use_state(false, &queue),
            options: self.options,
            queue,
            validator: self.validator,
            submit: self.submit.map(RefCell::new),
        }
    }
}

impl<V, E> FormController<V, E> {
    /// Options this form was built with
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// The queue this form renders through
    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    /// Stop a subscription made with [`subscribe`](Self::subscribe)
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.queue.unsubscribe(id)
    }
}

impl<V, E> FormController<V, E>
where
    V: Clone + Debug + 'static,
    E: Clone + Debug + 'static,
{
    /// Create a controller seeded with `initial`
    pub fn new<F, S>(initial: impl Into<FormValues<V>>, validations: F, submit_form: S) -> Self
    where
        F: Fn(&str, &FormValues<V>, &FormErrors<E>) -> FormErrors<E> + 'static,
        S: FnMut(&FormValues<V>) + 'static,
    {
        Self::builder(initial)
            .validations(validations)
            .on_submit(submit_form)
            .build()
    }

    /// Start building a controller; validator and submit handler are optional
    pub fn builder(initial: impl Into<FormValues<V>>) -> FormBuilder<V, E> {
        FormBuilder {
            initial: initial.into(),
            options: FormOptions::default(),
            queue: None,
            validator: None,
            submit: None,
        }
    }

    /// Set `field` to `value` and validate, on live input
    pub fn handle_change(&self, field: &str, value: V) -> Result<(), FormError> {
        self.update_field(FieldEventKind::Change, field, value)
    }

    /// Same transition as [`handle_change`](Self::handle_change), on focus loss
    ///
    /// `suppress` runs before any state changes.
    pub fn handle_blur(
        &self,
        field: &str,
        value: V,
        suppress: Option<&dyn PreventDefault>,
    ) -> Result<(), FormError> {
        if let Some(suppress) = suppress {
            suppress.prevent_default();
        }
        self.update_field(FieldEventKind::Blur, field, value)
    }

    /// Forward the current values to the submit handler
    ///
    /// Neither validates nor checks validity first; gating on
    /// [`is_valid`](Self::is_valid) is left to the caller.
    pub fn handle_submit(&self, suppress: Option<&dyn PreventDefault>) -> Result<(), FormError> {
        let span = self.span();
        let _enter = span.enter();

        if let Some(suppress) = suppress {
            suppress.prevent_default();
        }

        let Some(handler) = self.submit.as_ref() else {
            warn!("form submitted without a submit handler");
            return Err(FormError::MissingSubmitHandler);
        };

        let mut handler = handler.try_borrow_mut().map_err(|_| {
            warn!("submit handler re-entered submit");
            FormError::ReentrantSubmit
        })?;

        let values = self.values.get();
        info!(
            field_count = values.len(),
            is_valid = self.is_valid.get(),
            "submitting form"
        );
        handler.submit(&values);
        Ok(())
    }

    /// [`handle_change`](Self::handle_change) driven by an input event
    pub fn handle_change_event(&self, event: &FieldEvent<V>) -> Result<(), FormError> {
        self.handle_change(&event.target.name, event.target.value.clone())
    }

    /// [`handle_blur`](Self::handle_blur) driven by an input event
    pub fn handle_blur_event(&self, event: &FieldEvent<V>) -> Result<(), FormError> {
        self.handle_blur(
            &event.target.name,
            event.target.value.clone(),
            Some(event as &dyn PreventDefault),
        )
    }

    /// [`handle_submit`](Self::handle_submit) driven by a submit event
    pub fn handle_submit_event(&self, event: &SubmitEvent) -> Result<(), FormError> {
        self.handle_submit(Some(event as &dyn PreventDefault))
    }

    /// Current field values
    pub fn values(&self) -> FormValues<V> {
        self.values.get()
    }

    /// Current error map
    pub fn errors(&self) -> FormErrors<E> {
        self.errors.get()
    }

    /// False until the first validation pass
    pub fn is_valid(&self) -> bool {
        self.is_valid.get()
    }

    /// Get value of a field
    pub fn value(&self, field: &str) -> Option<V> {
        self.values.with(|values| values.get(field).cloned())
    }

    /// Get error for a field
    pub fn error(&self, field: &str) -> Option<E> {
        self.errors.with(|errors| errors.get(field).cloned())
    }

    /// Check if field has an error
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.with(|errors| errors.has_error(field))
    }

    /// Values, errors and validity read together
    pub fn snapshot(&self) -> FormSnapshot<V, E> {
        read_snapshot(&self.values, &self.errors, &self.is_valid)
    }

    /// Call `f` with a fresh snapshot after every render of this form
    pub fn subscribe(&self, f: impl Fn(&FormSnapshot<V, E>) + 'static) -> SubscriptionId {
        let (values, errors, is_valid) =
            (self.values.clone(), self.errors.clone(), self.is_valid.clone());
        self.queue
            .subscribe(move |_| f(&read_snapshot(&values, &errors, &is_valid)))
    }

    fn span(&self) -> tracing::Span {
        tracing::debug_span!("form", name = %self.options.name)
    }

    fn update_field(&self, kind: FieldEventKind, field: &str, value: V) -> Result<(), FormError> {
        let span = self.span();
        let _enter = span.enter();

        if self.options.log_values {
            debug!(field, %kind, ?value, "field updated");
        } else {
            debug!(field, %kind, "field updated");
        }

        let validate = match kind {
            FieldEventKind::Change => self.options.validate_on_change,
            FieldEventKind::Blur => self.options.validate_on_blur,
        };

        self.queue.batch(|| {
            let next = self.values.with(|values| values.with_field(field, value));
            self.values.replace(next.clone());

            if validate {
                self.apply_validation(field, &next)
            } else {
                Ok(())
            }
        })
    }

    /// Replace errors with the validator's output and recompute validity
    fn apply_validation(&self, field: &str, candidate: &FormValues<V>) -> Result<(), FormError> {
        let Some(validator) = self.validator.as_deref() else {
            warn!(field, "field changed without a validator");
            return Err(FormError::MissingValidator {
                field: field.to_string(),
            });
        };

        let previous = self.errors.get();
        let errors = validator.validate(field, candidate, &previous);
        let is_valid = errors.is_empty();
        let error_count = errors.len();

        self.queue.batch(|| {
            self.errors.replace(errors);
            self.is_valid.replace(is_valid);
        });

        debug!(field, error_count, is_valid, "validation applied");
        Ok(())
    }
}

fn read_snapshot<V: Clone, E: Clone>(
    values: &LocalCell<FormValues<V>>,
    errors: &LocalCell<FormErrors<E>>,
    is_valid: &LocalCell<bool>,
) -> FormSnapshot<V, E> {
    FormSnapshot {
        values: values.get(),
        errors: errors.get(),
        is_valid: is_valid.get(),
    }
}

impl<V: Debug, E: Debug> Debug for FormController<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("options", &self.options)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("is_valid", &self.is_valid)
            .field("has_validator", &self.validator.is_some())
            .field("has_submit", &self.submit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::AlwaysValid;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn contact() -> FormValues {
        FormValues::from([("name", "john"), ("last", "doe")].map(|(k, v)| (k, v.to_string())))
    }

    fn flag_empty(changed: &str, values: &FormValues, previous: &FormErrors) -> FormErrors {
        let mut errors = previous.clone();
        if values.get_str(changed) == Some("") {
            errors.insert(changed, format!("{} is empty", changed));
        } else {
            errors.remove(changed);
        }
        errors
    }

    #[test]
    fn test_initial_state() {
        let form: FormController = FormController::builder(contact()).build();
        assert_eq!(form.values(), contact());
        assert!(form.errors().is_empty());
        assert!(!form.is_valid());
    }

    #[test]
    fn test_change_renders_once() {
        let form: FormController = FormController::builder(contact())
            .validations(flag_empty)
            .build();

        form.handle_change("name", String::new()).unwrap();

        assert_eq!(form.queue().render_count(), 1);
        assert_eq!(form.error("name").as_deref(), Some("name is empty"));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_validator_receives_previous_errors() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let form: FormController = FormController::builder(contact())
            .validations(move |changed: &str, values: &FormValues, previous: &FormErrors| {
                sink.borrow_mut().push(previous.len());
                flag_empty(changed, values, previous)
            })
            .build();

        form.handle_change("name", String::new()).unwrap();
        form.handle_change("last", String::new()).unwrap();
        form.handle_change("name", "jane".to_string()).unwrap();

        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert_eq!(form.errors().len(), 1);
        assert!(form.has_error("last"));
    }

    #[test]
    fn test_change_without_validator_keeps_new_values() {
        let form: FormController = FormController::builder(contact()).build();

        let err = form.handle_change("name", "jane".to_string()).unwrap_err();

        assert_eq!(
            err,
            FormError::MissingValidator {
                field: "name".to_string()
            }
        );
        assert_eq!(form.value("name").as_deref(), Some("jane"));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_validate_on_change_disabled() {
        let options = FormOptions {
            validate_on_change: false,
            ..FormOptions::default()
        };
        let form: FormController = FormController::builder(contact())
            .options(options)
            .validations(flag_empty)
            .build();

        form.handle_change("name", String::new()).unwrap();
        assert!(form.errors().is_empty());

        form.handle_blur("name", String::new(), None).unwrap();
        assert!(form.has_error("name"));
    }

    #[test]
    fn test_blur_event_suppresses_default() {
        let form: FormController = FormController::builder(contact())
            .validator(AlwaysValid)
            .build();
        let event = FieldEvent::new("last", "dane".to_string());

        form.handle_blur_event(&event).unwrap();

        assert!(event.default_prevented());
        assert_eq!(form.value("last").as_deref(), Some("dane"));
        assert!(form.is_valid());
    }

    #[test]
    fn test_suppress_default_runs_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (validate_log, submit_log) = (Rc::clone(&log), Rc::clone(&log));
        let form: FormController = FormController::builder(contact())
            .validations(move |changed: &str, values: &FormValues, previous: &FormErrors| {
                validate_log.borrow_mut().push(format!("validate {}", changed));
                flag_empty(changed, values, previous)
            })
            .on_submit(move |_: &FormValues| submit_log.borrow_mut().push("submit".to_string()))
            .build();
        let prevent = || log.borrow_mut().push("prevent".to_string());

        form.handle_blur("name", "jane".to_string(), Some(&prevent))
            .unwrap();
        form.handle_submit(Some(&prevent)).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["prevent", "validate name", "prevent", "submit"]
        );
    }

    #[test]
    fn test_change_event_does_not_suppress_default() {
        let form: FormController = FormController::builder(contact())
            .validator(AlwaysValid)
            .build();
        let event = FieldEvent::new("name", "jane".to_string());

        form.handle_change_event(&event).unwrap();

        assert!(!event.default_prevented());
        assert_eq!(form.value("name").as_deref(), Some("jane"));
    }

    #[test]
    fn test_submit_without_handler() {
        let form: FormController = FormController::builder(contact())
            .validator(AlwaysValid)
            .build();
        let event = SubmitEvent::new();

        assert_eq!(
            form.handle_submit_event(&event),
            Err(FormError::MissingSubmitHandler)
        );
        assert!(event.default_prevented());
    }

    #[test]
    fn test_submit_with_closure_suppression() {
        let submitted = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&submitted);
        let form: FormController = FormController::new(
            contact(),
            |_: &str, _: &FormValues, _: &FormErrors| FormErrors::new(),
            move |values: &FormValues| *sink.borrow_mut() = Some(values.clone()),
        );
        let prevented = Cell::new(false);
        let prevent = || prevented.set(true);

        form.handle_submit(Some(&prevent)).unwrap();

        assert!(prevented.get());
        assert_eq!(*submitted.borrow(), Some(contact()));
    }

    #[test]
    fn test_reentrant_submit_is_rejected() {
        let slot: Rc<RefCell<Option<Rc<FormController>>>> = Rc::default();
        let outcome = Rc::new(RefCell::new(None));
        let (inner, sink) = (Rc::clone(&slot), Rc::clone(&outcome));

        let form: Rc<FormController> = Rc::new(
            FormController::builder(contact())
                .on_submit(move |_: &FormValues| {
                    let form = inner.borrow().clone();
                    if let Some(form) = form {
                        *sink.borrow_mut() = Some(form.handle_submit(None));
                    }
                })
                .build(),
        );
        *slot.borrow_mut() = Some(Rc::clone(&form));

        form.handle_submit(None).unwrap();

        assert_eq!(*outcome.borrow(), Some(Err(FormError::ReentrantSubmit)));
        slot.borrow_mut().take();
    }

    #[test]
    fn test_subscribers_see_consistent_snapshots() {
        let form: FormController = FormController::builder(contact())
            .validations(flag_empty)
            .build();
        let snapshots = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&snapshots);
        let id = form.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));

        form.handle_change("name", String::new()).unwrap();
        form.handle_change("name", "jo".to_string()).unwrap();
        assert!(form.unsubscribe(id));
        form.handle_change("last", String::new()).unwrap();

        let snapshots = snapshots.borrow();
        assert_eq!(snapshots.len(), 2);
        for snapshot in snapshots.iter() {
            assert_eq!(snapshot.is_valid, snapshot.errors.is_empty());
        }
        assert!(snapshots[0].has_error("name"));
        assert!(snapshots[1].is_valid);
    }

    #[test]
    fn test_shared_queue_across_forms() {
        let queue = RenderQueue::new();
        let first: FormController = FormController::builder(contact())
            .queue(&queue)
            .validator(AlwaysValid)
            .build();
        let second: FormController = FormController::builder(contact())
            .queue(&queue)
            .validator(AlwaysValid)
            .build();

        queue.batch(|| {
            first.handle_change("name", "a".to_string()).unwrap();
            second.handle_change("name", "b".to_string()).unwrap();
        });

        assert_eq!(queue.render_count(), 1);
        assert_eq!(first.value("name").as_deref(), Some("a"));
        assert_eq!(second.value("name").as_deref(), Some("b"));
    }
}
