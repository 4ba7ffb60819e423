use std::fmt;

use crate::panic::run_contained;

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of change handlers for values of type `T`.
///
/// Handlers run synchronously in registration order. A panicking handler is
/// logged and skipped; the remaining handlers still run.
pub struct Observers<T: ?Sized> {
	scope: &'static str,
	next_id: u64,
	handlers: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T: ?Sized> fmt::Debug for Observers<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Observers")
			.field("scope", &self.scope)
			.field("handlers", &self.handlers.len())
			.finish()
	}
}

impl<T: ?Sized> Observers<T> {
	/// Creates an empty registry; `scope` labels failure logs.
	pub fn new(scope: &'static str) -> Self {
		Self {
			scope,
			next_id: 0,
			handlers: Vec::new(),
		}
	}

	pub fn subscribe(&mut self, handler: impl FnMut(&T) + 'static) -> SubscriptionId {
		self.next_id += 1;
		let id = SubscriptionId(self.next_id);
		self.handlers.push((id, Box::new(handler)));
		tracing::trace!(scope = self.scope, id = id.0, "worker.observers.subscribe");
		id
	}

	/// Removes a handler. Returns false when `id` was not registered.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.handlers.len();
		self.handlers.retain(|(sid, _)| *sid != id);
		before != self.handlers.len()
	}

	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}

	/// Invokes every handler with `value`. Returns how many handlers failed.
	pub fn notify(&mut self, value: &T) -> usize {
		let mut failed = 0;
		for (_, handler) in &mut self.handlers {
			if !run_contained(self.scope, || handler(value)) {
				failed += 1;
			}
		}
		failed
	}

	pub fn clear(&mut self) {
		self.handlers.clear();
	}
}
