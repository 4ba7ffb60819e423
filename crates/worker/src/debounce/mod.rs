use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::panic::run_contained;
use crate::token::PendingFire;

/// Coalesces bursts of requests into one callback after a quiet period.
///
/// Each [`Debounce::execute`] replaces whatever firing was pending, so only the
/// callback from the *last* call in a burst runs, `delay` after that call.
/// Dropping the debounce cancels pending work.
#[derive(Debug)]
pub struct Debounce {
	name: &'static str,
	delay: Duration,
	pending: Option<PendingFire>,
	disposed: bool,
}

impl Debounce {
	/// Creates a debounce; `name` only labels trace output.
	pub fn new(name: &'static str, delay: Duration) -> Self {
		Self {
			name,
			delay,
			pending: None,
			disposed: false,
		}
	}

	/// Delay applied to the next [`Debounce::execute`].
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Changes the delay used by future calls. A firing that is already
	/// scheduled keeps its original deadline.
	pub fn set_delay(&mut self, delay: Duration) {
		self.delay = delay;
	}

	/// Returns true while a scheduled callback has not yet run.
	pub fn is_pending(&self) -> bool {
		self.pending.as_ref().is_some_and(PendingFire::is_live)
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// Schedules `callback` to run `delay` from now, replacing any pending one.
	///
	/// A zero delay still defers the callback past the current call stack.
	/// Calls after [`Debounce::dispose`] are ignored.
	pub fn execute<F>(&mut self, callback: F)
	where
		F: FnOnce() + Send + 'static,
	{
		if self.disposed {
			trace!(debounce = self.name, "worker.debounce.execute_after_dispose");
			return;
		}
		self.cancel();

		let delay = self.delay;
		let deadline = Instant::now() + delay;
		let name = self.name;
		let pending = PendingFire::arm(name, deadline, move || {
			trace!(debounce = name, "worker.debounce.fire");
			run_contained(name, callback);
		});
		trace!(debounce = self.name, delay_ms = delay.as_millis() as u64, "worker.debounce.schedule");
		self.pending = Some(pending);
	}

	/// Cancels pending work and runs `callback` synchronously.
	///
	/// Returns `None` without running anything once disposed.
	pub fn immediate<R>(&mut self, callback: impl FnOnce() -> R) -> Option<R> {
		if self.disposed {
			trace!(debounce = self.name, "worker.debounce.immediate_after_dispose");
			return None;
		}
		self.cancel();
		Some(callback())
	}

	/// Drops the pending callback, if any, without running it.
	pub fn cancel(&mut self) {
		if let Some(pending) = self.pending.take() {
			if pending.is_live() {
				trace!(debounce = self.name, "worker.debounce.cancel");
			}
			pending.cancel();
		}
	}

	/// Cancels pending work and refuses all future scheduling.
	pub fn dispose(&mut self) {
		self.cancel();
		self.disposed = true;
	}
}

impl Drop for Debounce {
	fn drop(&mut self) {
		self.cancel();
	}
}
