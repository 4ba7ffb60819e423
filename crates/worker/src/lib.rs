//! Scheduling primitives for the inline diagnostics core.
//!
//! Everything here assumes one logical event thread: callbacks are deferred
//! onto the ambient tokio runtime, and every scheduler keeps at most one
//! pending firing. Consumers that need to mutate their own state from a
//! callback should post a message back to their event loop instead of
//! sharing state with the timer task.
//!
//! - [`Debounce`]: fire once after a quiet period.
//! - [`Throttle`]: fire at most once per interval, with one trailing call.
//! - [`Observers`]: ordered, failure-isolated change subscriptions.

mod debounce;
mod observers;
mod panic;
mod throttle;
mod token;

pub use debounce::Debounce;
pub use observers::{Observers, SubscriptionId};
pub use throttle::Throttle;
