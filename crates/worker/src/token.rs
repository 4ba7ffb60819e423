use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Runtime that hosts timers armed from a thread without an ambient runtime.
///
/// Only the sleep and the cancellation check run here; callbacks are expected
/// to hand their work back to the caller's own event loop.
fn timer_runtime() -> Handle {
	if let Ok(handle) = Handle::try_current() {
		return handle;
	}

	static TIMERS: OnceLock<Runtime> = OnceLock::new();
	TIMERS
		.get_or_init(|| {
			trace!("worker.timer_runtime.start");
			Builder::new_multi_thread()
				.enable_time()
				.worker_threads(1)
				.thread_name("glint-timers")
				.build()
				.expect("glint timer runtime must build")
		})
		.handle()
		.clone()
}

/// One scheduled firing: the timer task plus the token that vetoes it.
///
/// Aborting the task alone is not enough: a task that already woke from its
/// sleep may be mid-poll when the abort lands. The callback therefore checks
/// the token right before running, which makes cancellation take effect even
/// in that window.
#[derive(Debug)]
pub(crate) struct PendingFire {
	cancel: CancellationToken,
	handle: JoinHandle<()>,
}

impl PendingFire {
	/// Runs `fire` once `deadline` has passed, unless cancelled first.
	pub fn arm<F>(scheduler: &'static str, deadline: Instant, fire: F) -> Self
	where
		F: FnOnce() + Send + 'static,
	{
		let cancel = CancellationToken::new();
		let guard = cancel.clone();
		let handle = timer_runtime().spawn(async move {
			tokio::select! {
				biased;
				_ = guard.cancelled() => {}
				_ = tokio::time::sleep_until(deadline) => {
					if guard.is_cancelled() {
						trace!(scheduler, "worker.timer.vetoed");
					} else {
						fire();
					}
				}
			}
		});
		Self { cancel, handle }
	}

	/// Returns true while the firing has neither run nor been cancelled.
	pub fn is_live(&self) -> bool {
		!self.cancel.is_cancelled() && !self.handle.is_finished()
	}

	/// Vetoes the firing and aborts the timer task.
	pub fn cancel(self) {
		self.cancel.cancel();
		self.handle.abort();
	}
}
