//! Turning line summaries into decorations.
//!
//! [`RenderPlan::build`] is pure: it decides which text each line shows and
//! with which style. [`apply`] resolves anchors through the host and pushes a
//! list to every allocated style handle.

use std::sync::Arc;

use glint_primitives::{DocumentId, EditorId, Severity};
use tracing::trace;

use crate::diagnostics::{DiagnosticAnalyzer, LineSummaryMap};
use crate::host::{Decoration, EditorHost};
use crate::styles::{DecorationKind, StyleCache};

/// Everything a render depends on.
///
/// Two renders with equal signatures paint the same decorations, so the second
/// one can be skipped. Summaries compare by pointer first and fall back to
/// content, so a re-aggregation that produced the same map still matches.
#[derive(Debug, Clone)]
pub struct RenderSignature {
	document: DocumentId,
	summaries: Arc<LineSummaryMap>,
	cursor_line: u32,
}

impl RenderSignature {
	pub fn new(document: DocumentId, summaries: Arc<LineSummaryMap>, cursor_line: u32) -> Self {
		Self {
			document,
			summaries,
			cursor_line,
		}
	}
}

impl PartialEq for RenderSignature {
	fn eq(&self, other: &Self) -> bool {
		self.document == other.document
			&& self.cursor_line == other.cursor_line
			&& (Arc::ptr_eq(&self.summaries, &other.summaries) || self.summaries == other.summaries)
	}
}

impl Eq for RenderSignature {}

/// Decoration text decided for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLine {
	pub line: u32,
	pub kind: DecorationKind,
	pub severity: Severity,
	pub text: String,
}

/// Per-line decisions for one render, in ascending line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
	pub lines: Vec<PlannedLine>,
}

impl RenderPlan {
	/// The cursor line gets the expanded message; other lines get the compact
	/// indicator when `compact_mode` is on and nothing otherwise.
	pub fn build(
		summaries: &LineSummaryMap,
		cursor_line: u32,
		analyzer: &DiagnosticAnalyzer,
		compact_mode: bool,
	) -> Self {
		let lines = summaries
			.values()
			.filter_map(|summary| {
				let (kind, text) = if summary.line == cursor_line {
					(DecorationKind::Expanded, analyzer.expanded_message(summary))
				} else if compact_mode {
					(DecorationKind::Compact, analyzer.compact_indicator(summary))
				} else {
					return None;
				};
				Some(PlannedLine {
					line: summary.line,
					kind,
					severity: summary.highest_severity,
					text,
				})
			})
			.collect();
		Self { lines }
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}
}

/// Paints `plan` into `editor` and returns the number of decorations shown.
///
/// Every allocated handle receives a list, empty ones included, so nothing a
/// previous render painted survives. Lines the host cannot resolve are skipped.
pub fn apply<H: EditorHost + ?Sized>(
	host: &mut H,
	styles: &StyleCache,
	editor: EditorId,
	document: DocumentId,
	plan: RenderPlan,
) -> usize {
	let mut buckets: [[Vec<Decoration>; 2]; 4] = Default::default();
	let mut painted = 0;

	for planned in plan.lines {
		let Some(position) = host.line_end(document, planned.line) else {
			trace!(%document, line = planned.line, "render.line_unresolved");
			continue;
		};
		buckets[usize::from(planned.severity.rank())][planned.kind.index()].push(Decoration {
			position,
			text: planned.text,
			color: planned.severity.foreground_token(),
		});
		painted += 1;
	}

	for (severity, kind, handle) in styles.all_handles() {
		let decorations = std::mem::take(&mut buckets[usize::from(severity.rank())][kind.index()]);
		host.set_decorations(editor, handle, decorations);
	}
	painted
}

/// Pushes an empty list to every allocated handle in `editor`.
pub fn clear<H: EditorHost + ?Sized>(host: &mut H, styles: &StyleCache, editor: EditorId) {
	for (_, _, handle) in styles.all_handles() {
		host.set_decorations(editor, handle, Vec::new());
	}
}
