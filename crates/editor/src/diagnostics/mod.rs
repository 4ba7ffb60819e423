//! Per-line diagnostic aggregation and message formatting.
//!
//! [`DiagnosticAnalyzer::analyze`] turns the full diagnostic list of one
//! document into a [`LineSummaryMap`]. The map is always rebuilt from scratch,
//! so a line whose diagnostics disappeared simply has no entry in the next map.
//!
//! Messages are normalized (trimmed, whitespace collapsed, length capped) before
//! deduplication, and the formatting helpers degrade long output in a fixed
//! order: joined list, first message with a count, hard truncation.

mod store;

use std::collections::BTreeMap;

use glint_primitives::graphemes::{grapheme_len, truncate_with_ellipsis};
use glint_primitives::{RawDiagnostic, Severity};

use crate::config::Settings;

pub use store::{DiagnosticStore, DiagnosticsUpdate};

/// Glyph repeated in compact summaries.
pub const DOT: char = '●';

/// Separator between messages in a merged message.
pub const SEPARATOR: &str = " | ";

/// Aggregated diagnostics anchored to one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineSummary {
	/// Zero-based line index.
	pub line: u32,
	/// Diagnostics on this line, most severe first. Equal severities keep
	/// their input order.
	pub diagnostics: Vec<RawDiagnostic>,
	/// Most severe severity present.
	pub highest_severity: Severity,
	/// Normalized messages without duplicates, ordered like `diagnostics`.
	pub messages: Vec<String>,
	/// Number of dot glyphs for the compact summary.
	pub dot_count: usize,
}

impl LineSummary {
	pub fn diagnostic_count(&self) -> usize {
		self.diagnostics.len()
	}
}

/// Line summaries of one document, iterated in ascending line order.
pub type LineSummaryMap = BTreeMap<u32, LineSummary>;

/// Aggregates and formats diagnostics under a fixed set of limits.
///
/// Built from a [`Settings`] snapshot; rebuild it when settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticAnalyzer {
	max_message_length: usize,
	max_dots: usize,
	show_icons: bool,
}

impl Default for DiagnosticAnalyzer {
	fn default() -> Self {
		Self::new(&Settings::default())
	}
}

impl DiagnosticAnalyzer {
	pub fn new(settings: &Settings) -> Self {
		Self {
			max_message_length: settings.max_message_length.max(1),
			max_dots: settings.dot_count.max(1),
			show_icons: settings.show_icons,
		}
	}

	pub fn max_message_length(&self) -> usize {
		self.max_message_length
	}

	pub fn max_dots(&self) -> usize {
		self.max_dots
	}

	/// Groups `diagnostics` by start line and summarizes each line.
	///
	/// An empty input yields an empty map.
	pub fn analyze(&self, diagnostics: &[RawDiagnostic]) -> LineSummaryMap {
		let mut grouped: BTreeMap<u32, Vec<RawDiagnostic>> = BTreeMap::new();
		for diag in diagnostics {
			grouped.entry(diag.line).or_default().push(diag.clone());
		}

		grouped
			.into_iter()
			.map(|(line, diags)| (line, self.summarize(line, diags)))
			.collect()
	}

	fn summarize(&self, line: u32, mut diagnostics: Vec<RawDiagnostic>) -> LineSummary {
		// stable: equal severities keep their input order
		diagnostics.sort_by_key(|d| d.severity().rank());

		let highest_severity = diagnostics.first().map_or(Severity::FALLBACK, RawDiagnostic::severity);

		let mut messages: Vec<String> = Vec::with_capacity(diagnostics.len());
		for diag in &diagnostics {
			let normalized = self.normalize_message(&diag.message);
			if !messages.contains(&normalized) {
				messages.push(normalized);
			}
		}

		LineSummary {
			line,
			dot_count: diagnostics.len().min(self.max_dots),
			highest_severity,
			messages,
			diagnostics,
		}
	}

	/// Trims, collapses whitespace runs (newlines included) to single spaces,
	/// and caps the result at the configured length.
	pub fn normalize_message(&self, message: &str) -> String {
		let collapsed = message.split_whitespace().collect::<Vec<_>>().join(" ");
		truncate_with_ellipsis(&collapsed, self.max_message_length)
	}

	/// All messages of a line as one string that fits the length limit.
	pub fn merged_message(&self, summary: &LineSummary) -> String {
		match summary.messages.as_slice() {
			[] => String::new(),
			[only] => only.clone(),
			[first, rest @ ..] => {
				let joined = summary.messages.join(SEPARATOR);
				if grapheme_len(&joined) <= self.max_message_length {
					return joined;
				}
				let counted = format!("{first} (+{} more)", rest.len());
				truncate_with_ellipsis(&counted, self.max_message_length)
			}
		}
	}

	/// Dot glyphs for a compact summary, with an overflow count when the line
	/// has more diagnostics than dots.
	pub fn compact_indicator(&self, summary: &LineSummary) -> String {
		let dots: String = std::iter::repeat_n(DOT, summary.dot_count).collect();
		let count = summary.diagnostic_count();
		if count > self.max_dots {
			format!("{dots} +{}", count - summary.dot_count)
		} else {
			dots
		}
	}

	/// Full message for the cursor line, optionally prefixed by the icon of
	/// the line's highest severity.
	pub fn expanded_message(&self, summary: &LineSummary) -> String {
		let message = self.merged_message(summary);
		if self.show_icons {
			format!("{} {message}", summary.highest_severity.icon())
		} else {
			message
		}
	}
}
