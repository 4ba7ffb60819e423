use std::sync::Arc;

use glint_primitives::{DocumentId, EditorId};
use tracing::{debug, trace};

use crate::config::{ConfigChange, ConfigStore, Settings};
use crate::diagnostics::{DiagnosticAnalyzer, DiagnosticStore, LineSummaryMap};
use crate::host::{ActiveEditor, EditorHost};
use crate::metrics::CoordinatorMetrics;
use crate::render::{self, RenderPlan, RenderSignature};
use crate::styles::StyleCache;

/// What the coordinator tracks about the focused editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
	pub editor: EditorId,
	pub document: DocumentId,
	pub cursor_line: u32,
	/// Signature of the last render pushed to the host.
	pub last_applied: Option<RenderSignature>,
}

impl From<ActiveEditor> for RenderState {
	fn from(active: ActiveEditor) -> Self {
		Self {
			editor: active.editor,
			document: active.document,
			cursor_line: active.cursor_line,
			last_applied: None,
		}
	}
}

/// Result of one render attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
	/// Decorations were pushed; carries the number painted.
	Applied(usize),
	/// The signature matched the last render.
	Unchanged,
	/// No editor is tracked.
	NoEditor,
}

/// State the coordinator mutates; kept apart from the timers so an immediate
/// render can borrow it while a debounce is borrowed too.
pub(super) struct Engine<H> {
	pub(super) host: H,
	pub(super) config: ConfigStore,
	pub(super) analyzer: DiagnosticAnalyzer,
	pub(super) store: DiagnosticStore,
	pub(super) styles: StyleCache,
	pub(super) state: Option<RenderState>,
	pub(super) metrics: Arc<CoordinatorMetrics>,
}

impl<H: EditorHost> Engine<H> {
	pub(super) fn new(host: H, settings: Settings) -> Self {
		let config = ConfigStore::new(settings);
		Self {
			analyzer: DiagnosticAnalyzer::new(config.settings()),
			host,
			config,
			store: DiagnosticStore::new(),
			styles: StyleCache::new(),
			state: None,
			metrics: Arc::new(CoordinatorMetrics::new()),
		}
	}

	pub(super) fn enabled(&self) -> bool {
		self.config.settings().enabled
	}

	pub(super) fn active_document(&self) -> Option<DocumentId> {
		self.state.as_ref().map(|s| s.document)
	}

	/// Re-reads the focused editor from the host, dropping the old signature.
	pub(super) fn sync_active(&mut self) -> Option<ActiveEditor> {
		let active = self.host.active_editor();
		self.state = active.map(RenderState::from);
		trace!(
			editor = ?active.map(|a| a.editor),
			document = ?active.map(|a| a.document),
			"coordinator.active_synced"
		);
		active
	}

	/// Rebuilds and stores the summaries of `document`.
	pub(super) fn aggregate(&mut self, document: DocumentId) -> Arc<LineSummaryMap> {
		let raw = self.host.diagnostics(document);
		let summaries = self.analyzer.analyze(&raw);
		self.metrics.inc_aggregation();
		trace!(%document, diagnostics = raw.len(), lines = summaries.len(), "coordinator.aggregated");
		self.store.replace(document, summaries)
	}

	/// Forces the next render through the redundancy guard.
	pub(super) fn invalidate_signature(&mut self) {
		if let Some(state) = &mut self.state {
			state.last_applied = None;
		}
	}

	/// Paints the tracked editor unless the signature is unchanged.
	pub(super) fn render(&mut self) -> RenderOutcome {
		let Some(state) = &mut self.state else {
			trace!("coordinator.render_no_editor");
			return RenderOutcome::NoEditor;
		};

		let summaries = self.store.get(state.document).unwrap_or_default();
		let signature = RenderSignature::new(state.document, Arc::clone(&summaries), state.cursor_line);
		if state.last_applied.as_ref() == Some(&signature) {
			self.metrics.inc_render_skipped();
			trace!(editor = %state.editor, "coordinator.render_skipped");
			return RenderOutcome::Unchanged;
		}

		let settings = self.config.settings();
		self.styles.ensure(&mut self.host, settings.background_opacity);
		let plan = RenderPlan::build(&summaries, state.cursor_line, &self.analyzer, settings.compact_mode);
		let painted = render::apply(&mut self.host, &self.styles, state.editor, state.document, plan);

		state.last_applied = Some(signature);
		self.metrics.inc_render_applied();
		debug!(
			editor = %state.editor,
			document = %state.document,
			cursor_line = state.cursor_line,
			painted,
			"coordinator.render_applied"
		);
		RenderOutcome::Applied(painted)
	}

	/// Clears the tracked editor and forgets it.
	pub(super) fn clear(&mut self) {
		if let Some(state) = self.state.take() {
			self.clear_editor(state.editor);
		}
	}

	pub(super) fn clear_editor(&mut self, editor: EditorId) {
		if !self.styles.is_allocated() {
			return;
		}
		render::clear(&mut self.host, &self.styles, editor);
		self.metrics.inc_clear();
		debug!(%editor, "coordinator.cleared");
	}

	/// Applies the analyzer and style consequences of a settings change.
	pub(super) fn adopt(&mut self, change: &ConfigChange) {
		self.analyzer = DiagnosticAnalyzer::new(&change.current);
		if change.style_changed() {
			self.styles.invalidate(&mut self.host);
		}
		self.invalidate_signature();
	}
}
