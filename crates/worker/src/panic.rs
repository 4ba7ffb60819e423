use std::any::Any;
use std::panic::AssertUnwindSafe;

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		msg
	} else if let Some(msg) = payload.downcast_ref::<String>() {
		msg.as_str()
	} else {
		"<non-string panic payload>"
	}
}

/// Runs `callback`, containing any panic so the caller's loop survives.
///
/// Returns `false` when the callback panicked.
pub(crate) fn run_contained<F: FnOnce()>(scope: &'static str, callback: F) -> bool {
	match std::panic::catch_unwind(AssertUnwindSafe(callback)) {
		Ok(()) => true,
		Err(payload) => {
			tracing::warn!(scope, panic = panic_message(payload.as_ref()), "worker.callback_panicked");
			false
		}
	}
}
