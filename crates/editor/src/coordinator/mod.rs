//! Event loop tying host events, aggregation, timers, and rendering together.
//!
//! All state lives in one [`Coordinator`] driven by a single task. Timer
//! callbacks never touch that state: when a debounce fires it posts
//! [`Event::RenderDue`] back into the coordinator's channel, so every mutation
//! happens sequentially in arrival order.
//!
//! Render requests carry the render epoch current when they were scheduled.
//! Switching editors, disabling, and disposing bump the epoch, which turns
//! any request still in flight into a no-op.
//!
//! The coordinator is not `Send` (observer handlers need not be), so drive
//! [`Coordinator::run`] on a current-thread runtime or a `LocalSet`.

mod commands;
mod engine;

use std::sync::Arc;

use glint_primitives::{DocumentId, EditorId};
use glint_worker::{Debounce, SubscriptionId};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace, warn};

use crate::config::{CURSOR_DEBOUNCE, ConfigChange, Settings};
use crate::diagnostics::{DiagnosticStore, DiagnosticsUpdate};
use crate::host::EditorHost;
use crate::metrics::CoordinatorMetrics;

pub use engine::{RenderOutcome, RenderState};

use engine::Engine;

/// Inputs to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	/// Diagnostics of these documents changed.
	DiagnosticsChanged(Vec<DocumentId>),
	/// The primary cursor of `editor` moved to `line`.
	SelectionChanged { editor: EditorId, line: u32 },
	/// Focus moved to another editor, or to none.
	ActiveEditorChanged(Option<EditorId>),
	/// The text of a document changed.
	DocumentEdited(DocumentId),
	/// A document was closed.
	DocumentClosed(DocumentId),
	/// The host's settings changed.
	ConfigurationChanged(Settings),
	/// Re-aggregate and re-render now.
	Refresh,
	/// Flip the master switch.
	Toggle,
	/// A debounced render is due.
	RenderDue { epoch: u64 },
	/// Dispose and leave [`Coordinator::run`].
	Shutdown,
}

#[derive(Debug)]
struct Timers {
	/// Renders requested by diagnostics changes.
	diagnostics: Debounce,
	/// Renders requested by cursor movement.
	cursor: Debounce,
}

impl Timers {
	fn cancel(&mut self) {
		self.diagnostics.cancel();
		self.cursor.cancel();
	}

	fn dispose(&mut self) {
		self.diagnostics.dispose();
		self.cursor.dispose();
	}
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
	Diagnostics,
	Cursor,
}

/// Owns every piece of inline diagnostics state for one host.
pub struct Coordinator<H> {
	engine: Engine<H>,
	timers: Timers,
	epoch: u64,
	tx: UnboundedSender<Event>,
	disposed: bool,
}

impl<H: EditorHost> Coordinator<H> {
	/// Creates a coordinator and the receiving end of its event channel.
	///
	/// Nothing is read from the host until [`Self::initialize`].
	pub fn new(host: H, settings: Settings) -> (Self, UnboundedReceiver<Event>) {
		let (tx, rx) = mpsc::unbounded_channel();
		let engine = Engine::new(host, settings);
		let timers = Timers {
			diagnostics: Debounce::new("diagnostics", engine.config.settings().update_debounce()),
			cursor: Debounce::new("cursor", CURSOR_DEBOUNCE),
		};
		let coordinator = Self {
			engine,
			timers,
			epoch: 0,
			tx,
			disposed: false,
		};
		(coordinator, rx)
	}

	/// Sender for host events.
	pub fn sender(&self) -> UnboundedSender<Event> {
		self.tx.clone()
	}

	pub fn host(&self) -> &H {
		&self.engine.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.engine.host
	}

	pub fn settings(&self) -> &Settings {
		self.engine.config.settings()
	}

	pub fn store(&self) -> &DiagnosticStore {
		&self.engine.store
	}

	pub fn render_state(&self) -> Option<&RenderState> {
		self.engine.state.as_ref()
	}

	pub fn metrics(&self) -> Arc<CoordinatorMetrics> {
		Arc::clone(&self.engine.metrics)
	}

	/// Current render epoch.
	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// True while a debounced render is scheduled.
	pub fn render_pending(&self) -> bool {
		self.timers.diagnostics.is_pending() || self.timers.cursor.is_pending()
	}

	/// Subscribes to summary replacements of every document.
	pub fn subscribe_diagnostics(&mut self, handler: impl FnMut(&DiagnosticsUpdate) + 'static) -> SubscriptionId {
		self.engine.store.subscribe(handler)
	}

	/// Subscribes to effective settings changes.
	pub fn subscribe_config(&mut self, handler: impl FnMut(&ConfigChange) + 'static) -> SubscriptionId {
		self.engine.config.subscribe(handler)
	}

	/// Picks up the focused editor and renders it right away.
	pub fn initialize(&mut self) {
		if self.disposed || !self.engine.enabled() {
			return;
		}
		if let Some(state) = self.engine.sync_active() {
			self.engine.aggregate(state.document);
			self.render_now();
		}
	}

	/// Processes events until [`Event::Shutdown`] or until every sender is gone.
	pub async fn run(mut self, mut rx: UnboundedReceiver<Event>) -> Self {
		debug!("coordinator.run_start");
		while let Some(event) = rx.recv().await {
			self.handle(event);
			if self.disposed {
				break;
			}
		}
		debug!("coordinator.run_stop");
		self
	}

	/// Processes one event.
	pub fn handle(&mut self, event: Event) {
		if self.disposed {
			trace!(?event, "coordinator.event_after_dispose");
			return;
		}
		match event {
			Event::DiagnosticsChanged(documents) => self.on_diagnostics_changed(&documents),
			Event::SelectionChanged { editor, line } => self.on_selection_changed(editor, line),
			Event::ActiveEditorChanged(editor) => self.on_active_editor_changed(editor),
			Event::DocumentEdited(document) => self.on_document_edited(document),
			Event::DocumentClosed(document) => {
				self.engine.store.remove(document);
			}
			Event::ConfigurationChanged(settings) => self.apply_settings(settings),
			Event::Refresh => {
				if let Err(error) = self.refresh() {
					warn!(%error, "coordinator.refresh_failed");
				}
			}
			Event::Toggle => {
				if let Err(error) = self.toggle() {
					warn!(%error, "coordinator.toggle_failed");
				}
			}
			Event::RenderDue { epoch } => self.on_render_due(epoch),
			Event::Shutdown => self.dispose(),
		}
	}

	/// Cancels timers, clears decorations, and releases styles. Idempotent.
	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.bump_epoch();
		self.timers.dispose();
		self.engine.clear();
		self.engine.styles.invalidate(&mut self.engine.host);
		self.engine.store.clear();
		self.disposed = true;
		debug!("coordinator.disposed");
	}

	fn on_diagnostics_changed(&mut self, documents: &[DocumentId]) {
		if !self.engine.enabled() {
			return;
		}
		let active = self.engine.active_document();
		let mut render = false;
		for &document in documents {
			self.engine.aggregate(document);
			render |= Some(document) == active;
		}
		if render {
			self.schedule_render(Trigger::Diagnostics);
		}
	}

	fn on_selection_changed(&mut self, editor: EditorId, line: u32) {
		if !self.engine.enabled() {
			return;
		}
		let Some(state) = &mut self.engine.state else {
			return;
		};
		if state.editor != editor {
			trace!(%editor, tracked = %state.editor, "coordinator.selection_foreign_editor");
			return;
		}
		if state.cursor_line == line {
			return;
		}
		state.cursor_line = line;
		self.schedule_render(Trigger::Cursor);
	}

	/// Edits can move the cursor without a selection event; pick up the new
	/// line so the next render expands the right one. Nothing is rendered.
	fn on_document_edited(&mut self, document: DocumentId) {
		if !self.engine.enabled() {
			return;
		}
		let Some(active) = self.engine.host.active_editor() else {
			return;
		};
		let Some(state) = &mut self.engine.state else {
			return;
		};
		if state.document != document || state.editor != active.editor {
			return;
		}
		if state.cursor_line != active.cursor_line {
			trace!(from = state.cursor_line, to = active.cursor_line, "coordinator.cursor_resynced");
			state.cursor_line = active.cursor_line;
		}
	}

	fn on_active_editor_changed(&mut self, editor: Option<EditorId>) {
		if !self.engine.enabled() {
			return;
		}
		self.bump_epoch();
		self.timers.cancel();

		let previous = self.engine.state.take();
		if let Some(previous) = previous {
			if Some(previous.editor) != editor {
				self.engine.clear_editor(previous.editor);
			}
		}

		let Some(state) = self.engine.sync_active() else {
			return;
		};
		if Some(state.editor) != editor {
			debug!(expected = ?editor, actual = %state.editor, "coordinator.active_editor_mismatch");
		}
		self.engine.aggregate(state.document);
		self.render_now();
	}

	fn on_render_due(&mut self, epoch: u64) {
		if epoch != self.epoch {
			self.engine.metrics.inc_stale_request();
			trace!(epoch, current = self.epoch, "coordinator.render_stale");
			return;
		}
		if !self.engine.enabled() {
			return;
		}
		self.engine.render();
	}

	/// Replaces settings and reacts to the transition.
	fn apply_settings(&mut self, settings: Settings) {
		let Some(change) = self.engine.config.replace(settings) else {
			trace!("coordinator.settings_unchanged");
			return;
		};
		self.timers.diagnostics.set_delay(change.current.update_debounce());

		if change.disabled() {
			self.bump_epoch();
			self.timers.cancel();
			self.engine.clear();
			self.engine.store.clear();
			debug!("coordinator.disabled");
			return;
		}
		if !change.current.enabled {
			return;
		}

		self.engine.adopt(&change);
		if change.enabled() {
			debug!("coordinator.enabled");
			self.engine.sync_active();
		}
		if let Some(document) = self.engine.active_document() {
			self.engine.aggregate(document);
			self.render_now();
		}
	}

	fn schedule_render(&mut self, trigger: Trigger) {
		let epoch = self.epoch;
		let tx = self.tx.clone();
		let debounce = match trigger {
			Trigger::Diagnostics => &mut self.timers.diagnostics,
			Trigger::Cursor => &mut self.timers.cursor,
		};
		debounce.execute(move || {
			if tx.send(Event::RenderDue { epoch }).is_err() {
				trace!(epoch, "coordinator.render_due_dropped");
			}
		});
	}

	/// Cancels every pending render and renders synchronously. Returns `None`
	/// once the timers are disposed.
	fn render_now(&mut self) -> Option<RenderOutcome> {
		self.timers.diagnostics.cancel();
		self.timers.cursor.immediate(|| self.engine.render())
	}

	fn bump_epoch(&mut self) {
		self.epoch = self.epoch.wrapping_add(1);
		trace!(epoch = self.epoch, "coordinator.epoch");
	}
}
