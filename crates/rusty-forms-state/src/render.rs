//! Render batching and subscriber notification

use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`RenderQueue::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(u64)>;

#[derive(Default)]
struct QueueState {
    depth: usize,
    pending: bool,
    renders: u64,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

/// Coalesces state replacements into render cycles
///
/// Every cell created against a queue calls [`RenderQueue::schedule`] when it
/// is replaced. Outside a batch that renders immediately; inside a batch the
/// render is deferred until the outermost batch returns. Cloning the queue
/// yields another handle to the same render loop.
#[derive(Clone, Default)]
pub struct RenderQueue {
    state: Rc<RefCell<QueueState>>,
}

impl RenderQueue {
    /// Create a new render queue with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` as one render cycle
    ///
    /// Batches nest; only the outermost one flushes.
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        self.state.borrow_mut().depth += 1;
        let guard = BatchGuard { queue: self };
        let result = f();
        drop(guard);
        result
    }

    /// Request a render after a state replacement
    pub fn schedule(&self) {
        let batching = {
            let mut state = self.state.borrow_mut();
            state.pending = true;
            state.depth > 0
        };

        if !batching {
            self.flush();
        }
    }

    /// Register a callback invoked with the render number after each render
    pub fn subscribe(&self, subscriber: impl Fn(u64) + 'static) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.subscribers.push((id, Rc::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns false if it was already removed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.subscribers.len();
        state.subscribers.retain(|(sub_id, _)| *sub_id != id);
        state.subscribers.len() != before
    }

    /// Number of completed render cycles
    pub fn render_count(&self) -> u64 {
        self.state.borrow().renders
    }

    /// Whether a batch is currently open
    pub fn is_batching(&self) -> bool {
        self.state.borrow().depth > 0
    }

    fn flush(&self) {
        let (render, subscribers) = {
            let mut state = self.state.borrow_mut();
            if !state.pending {
                return;
            }
            state.pending = false;
            state.renders += 1;
            let subscribers: Vec<Subscriber> =
                state.subscribers.iter().map(|(_, s)| Rc::clone(s)).collect();
            (state.renders, subscribers)
        };

        tracing::trace!(render, subscribers = subscribers.len(), "render cycle");

        // Subscribers may read cells or open new batches, so no borrow is held here
        for subscriber in subscribers {
            subscriber(render);
        }
    }
}

impl std::fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RenderQueue")
            .field("depth", &state.depth)
            .field("pending", &state.pending)
            .field("renders", &state.renders)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

struct BatchGuard<'a> {
    queue: &'a RenderQueue,
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        let outermost = {
            let mut state = self.queue.state.borrow_mut();
            state.depth -= 1;
            state.depth == 0
        };

        if outermost && !std::thread::panicking() {
            self.queue.flush();
        }
    }
}
