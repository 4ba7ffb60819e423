use std::sync::Arc;

use glint_worker::{Observers, SubscriptionId};
use tracing::debug;

use super::Settings;

/// A configuration transition delivered to subscribers.
#[derive(Debug, Clone)]
pub struct ConfigChange {
	pub previous: Arc<Settings>,
	pub current: Arc<Settings>,
}

impl ConfigChange {
	/// True when the switch from enabled to disabled happened in this change.
	pub fn disabled(&self) -> bool {
		self.previous.enabled && !self.current.enabled
	}

	/// True when the switch from disabled to enabled happened in this change.
	pub fn enabled(&self) -> bool {
		!self.previous.enabled && self.current.enabled
	}

	/// True when style handles built for `previous` no longer match `current`.
	pub fn style_changed(&self) -> bool {
		self.previous.style_differs(&self.current)
	}
}

/// Sole owner of the current [`Settings`] snapshot.
///
/// Consumers read shared snapshots and never mutate them; a change replaces
/// the snapshot as a whole.
#[derive(Debug)]
pub struct ConfigStore {
	current: Arc<Settings>,
	observers: Observers<ConfigChange>,
}

impl Default for ConfigStore {
	fn default() -> Self {
		Self::new(Settings::default())
	}
}

impl ConfigStore {
	pub fn new(settings: Settings) -> Self {
		Self {
			current: Arc::new(settings.sanitized()),
			observers: Observers::new("config"),
		}
	}

	/// Current settings.
	pub fn settings(&self) -> &Settings {
		&self.current
	}

	/// Shared handle to the current snapshot.
	pub fn snapshot(&self) -> Arc<Settings> {
		Arc::clone(&self.current)
	}

	/// Replaces the snapshot when `next` differs structurally.
	///
	/// Subscribers are notified synchronously before this returns. Returns
	/// `None` when nothing changed.
	pub fn replace(&mut self, next: Settings) -> Option<ConfigChange> {
		let next = next.sanitized();
		if *self.current == next {
			return None;
		}
		let change = ConfigChange {
			previous: std::mem::replace(&mut self.current, Arc::new(next)),
			current: Arc::clone(&self.current),
		};
		debug!(enabled = change.current.enabled, "config.store.replaced");
		let failed = self.observers.notify(&change);
		if failed > 0 {
			debug!(failed, "config.store.observer_failures");
		}
		Some(change)
	}

	/// Registers a handler invoked on every effective change.
	pub fn subscribe(&mut self, handler: impl FnMut(&ConfigChange) + 'static) -> SubscriptionId {
		self.observers.subscribe(handler)
	}

	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.observers.unsubscribe(id)
	}
}
