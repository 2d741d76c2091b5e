//! # rusty-forms-state
//!
//! Reactive state cells for rusty-forms hooks.
//!
//! A hook keeps its state in independent slots. Each slot is a [`StateCell`]:
//! reading returns the settled value, replacing requests a new value and
//! schedules a render on the owning [`RenderQueue`]. Replacements made inside
//! [`RenderQueue::batch`] are coalesced into a single render cycle, so a
//! subscriber never observes one slot updated and its sibling stale.
//!
//! ## Example
//!
//! ```rust
//! use rusty_forms_state::{use_state, RenderQueue, StateCell};
//!
//! let queue = RenderQueue::new();
//! let count = use_state(0_u32, &queue);
//! let label = use_state(String::from("zero"), &queue);
//!
//! queue.batch(|| {
//!     count.replace(1);
//!     label.replace("one".to_string());
//! });
//!
//! assert_eq!(count.get(), 1);
//! assert_eq!(label.get(), "one");
//! assert_eq!(queue.render_count(), 1);
//! ```

pub mod cell;
pub mod render;

pub use cell::{use_state, LocalCell, StateCell};
pub use render::{RenderQueue, SubscriptionId};
