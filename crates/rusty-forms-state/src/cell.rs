//! State cells: one independently replaceable slot of hook state

use crate::render::RenderQueue;
use std::cell::RefCell;
use std::rc::Rc;

/// Accessor/mutator pair for one slot of hook state
pub trait StateCell<T> {
    /// Settled value of the slot
    fn get(&self) -> T;

    /// Borrow the settled value without cloning it
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    /// Replace the value and schedule a render. Returns the previous value
    fn replace(&self, value: T) -> T;

    /// Replace the value with one computed from the current value
    fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let next = self.with(f);
        self.replace(next)
    }
}

/// Single-threaded state cell bound to a [`RenderQueue`]
///
/// Clones share the same slot.
pub struct LocalCell<T> {
    value: Rc<RefCell<T>>,
    queue: RenderQueue,
}

impl<T> LocalCell<T> {
    /// Create a cell holding `initial` that renders through `queue`
    pub fn new(initial: T, queue: &RenderQueue) -> Self {
        Self {
            value: Rc::new(RefCell::new(initial)),
            queue: queue.clone(),
        }
    }
}

impl<T> Clone for LocalCell<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            queue: self.queue.clone(),
        }
    }
}

impl<T: Clone> StateCell<T> for LocalCell<T> {
    fn get(&self) -> T {
        self.value.borrow().clone()
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.value.borrow())
    }

    fn replace(&self, value: T) -> T {
        let previous = std::mem::replace(&mut *self.value.borrow_mut(), value);
        self.queue.schedule();
        previous
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LocalCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LocalCell").field(&self.value.borrow()).finish()
    }
}

/// Allocate a state slot, hook style
pub fn use_state<T>(initial: T, queue: &RenderQueue) -> LocalCell<T> {
    LocalCell::new(initial, queue)
}
