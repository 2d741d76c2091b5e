// File: src/testing.rs
// Purpose: Render-and-act harness for exercising a form hook in tests

use crate::controller::FormController;
use crate::snapshot::FormSnapshot;
use rusty_forms_state::SubscriptionId;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// A form controller mounted under a recording renderer
///
/// [`current`](Self::current) returns what the last completed render saw,
/// the way a component would read the hook's return value.
pub struct RenderedHook<V = String, E = String> {
    form: FormController<V, E>,
    current: Rc<RefCell<FormSnapshot<V, E>>>,
    subscription: SubscriptionId,
}

/// Mount `form` and record every render
pub fn render_hook<V, E>(form: FormController<V, E>) -> RenderedHook<V, E>
where
    V: Clone + Debug + 'static,
    E: Clone + Debug + 'static,
{
    let current = Rc::new(RefCell::new(form.snapshot()));
    let sink = Rc::clone(&current);
    let subscription = form.subscribe(move |snapshot| *sink.borrow_mut() = snapshot.clone());

    RenderedHook {
        form,
        current,
        subscription,
    }
}

impl<V, E> RenderedHook<V, E>
where
    V: Clone + Debug + 'static,
    E: Clone + Debug + 'static,
{
    /// State as of the last render
    pub fn current(&self) -> FormSnapshot<V, E> {
        self.current.borrow().clone()
    }

    /// The mounted controller
    pub fn result(&self) -> &FormController<V, E> {
        &self.form
    }

    /// Run `f` against the controller as a single render cycle
    pub fn act<R>(&self, f: impl FnOnce(&FormController<V, E>) -> R) -> R {
        self.form.queue().batch(|| f(&self.form))
    }

    /// Number of renders since the form was created
    pub fn render_count(&self) -> u64 {
        self.form.queue().render_count()
    }
}

impl<V, E> Drop for RenderedHook<V, E> {
    fn drop(&mut self) {
        self.form.queue().unsubscribe(self.subscription);
    }
}
