use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::trace;

use crate::panic::run_contained;
use crate::token::PendingFire;

/// Rate-limits a callback to one invocation per `delay`.
///
/// A call arriving while the window is open is deferred to the end of the
/// window; later calls in the same window replace it, so at most one trailing
/// invocation is ever pending.
#[derive(Debug)]
pub struct Throttle {
	name: &'static str,
	delay: Duration,
	/// Time of the last actual invocation, shared with the trailing task.
	last_run: Arc<Mutex<Option<Instant>>>,
	pending: Option<PendingFire>,
	disposed: bool,
}

impl Throttle {
	pub fn new(name: &'static str, delay: Duration) -> Self {
		Self {
			name,
			delay,
			last_run: Arc::new(Mutex::new(None)),
			pending: None,
			disposed: false,
		}
	}

	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Changes the window used by future calls.
	pub fn set_delay(&mut self, delay: Duration) {
		self.delay = delay;
	}

	/// Returns true while a trailing invocation is scheduled.
	pub fn is_pending(&self) -> bool {
		self.pending.as_ref().is_some_and(PendingFire::is_live)
	}

	/// Runs `callback` now when the window has elapsed, otherwise schedules it
	/// as the single trailing invocation.
	pub fn execute<F>(&mut self, callback: F)
	where
		F: FnOnce() + Send + 'static,
	{
		if self.disposed {
			trace!(throttle = self.name, "worker.throttle.execute_after_dispose");
			return;
		}
		self.cancel();

		let now = Instant::now();
		let remaining = {
			let mut last = self.last_run.lock();
			match *last {
				Some(at) if now.duration_since(at) < self.delay => Some(self.delay - now.duration_since(at)),
				_ => {
					*last = Some(now);
					None
				}
			}
		};

		let Some(remaining) = remaining else {
			trace!(throttle = self.name, "worker.throttle.fire");
			run_contained(self.name, callback);
			return;
		};

		let deadline = now + remaining;
		let name = self.name;
		let last_run = Arc::clone(&self.last_run);
		let pending = PendingFire::arm(name, deadline, move || {
			*last_run.lock() = Some(Instant::now());
			trace!(throttle = name, "worker.throttle.fire_trailing");
			run_contained(name, callback);
		});
		trace!(throttle = self.name, remaining_ms = remaining.as_millis() as u64, "worker.throttle.defer");
		self.pending = Some(pending);
	}

	/// Drops the trailing invocation, if any.
	pub fn cancel(&mut self) {
		if let Some(pending) = self.pending.take() {
			pending.cancel();
		}
	}

	/// Cancels pending work and refuses all future scheduling.
	pub fn dispose(&mut self) {
		self.cancel();
		self.disposed = true;
	}
}

impl Drop for Throttle {
	fn drop(&mut self) {
		self.cancel();
	}
}
