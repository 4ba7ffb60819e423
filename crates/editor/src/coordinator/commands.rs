//! User-facing commands.

use tracing::{debug, warn};

use super::Coordinator;
use crate::config::{CONFIG_SECTION, keys};
use crate::error::{CommandError, CommandResult};
use crate::host::{EditorHost, NoticeLevel};

const REFRESHED: &str = "Inline diagnostics refreshed";

impl<H: EditorHost> Coordinator<H> {
	/// Flips the master switch, persists it, and applies it right away.
	///
	/// Returns the new value of `enabled`. When the host cannot persist the
	/// setting, an error notice is shown and nothing changes.
	pub fn toggle(&mut self) -> CommandResult<bool> {
		if self.disposed {
			return Err(CommandError::Disposed);
		}
		let mut next = self.settings().clone();
		next.enabled = !next.enabled;

		let key = format!("{CONFIG_SECTION}.{}", keys::ENABLED);
		if let Err(error) = self.engine.host.persist_setting(&key, serde_json::Value::Bool(next.enabled)) {
			warn!(%error, "coordinator.toggle_persist_failed");
			self.engine.host.notify(NoticeLevel::Error, &error.to_string());
			return Err(error.into());
		}

		let enabled = next.enabled;
		self.apply_settings(next);
		let message = if enabled {
			"Inline diagnostics enabled"
		} else {
			"Inline diagnostics disabled"
		};
		self.engine.host.notify(NoticeLevel::Info, message);
		debug!(enabled, "coordinator.toggled");
		Ok(enabled)
	}

	/// Re-aggregates the focused document and renders it, bypassing the
	/// redundancy guard.
	pub fn refresh(&mut self) -> CommandResult<()> {
		if self.disposed {
			return Err(CommandError::Disposed);
		}
		if self.engine.enabled() {
			self.engine.invalidate_signature();
			if self.engine.state.is_none() {
				self.engine.sync_active();
			}
			if let Some(document) = self.engine.active_document() {
				self.engine.aggregate(document);
				self.render_now();
			}
		}
		self.engine.host.notify(NoticeLevel::Info, REFRESHED);
		Ok(())
	}
}
