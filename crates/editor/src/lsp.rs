//! Diagnostics feed for hosts that receive `textDocument/publishDiagnostics`.
//!
//! A host keeps one [`LspDiagnostics`], answers
//! [`EditorHost::diagnostics`](crate::EditorHost::diagnostics) from it, and
//! forwards the returned events to the coordinator.

use glint_primitives::{DocumentId, RawDiagnostic};
use lsp_types::Diagnostic;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::coordinator::Event;

/// Latest published diagnostics per document, already converted.
#[derive(Debug, Default)]
pub struct LspDiagnostics {
	documents: FxHashMap<DocumentId, Vec<RawDiagnostic>>,
}

impl LspDiagnostics {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the diagnostics of `document` with a published set.
	pub fn publish(&mut self, document: DocumentId, diagnostics: &[Diagnostic]) -> Event {
		let converted: Vec<RawDiagnostic> = diagnostics.iter().map(RawDiagnostic::from).collect();
		trace!(%document, count = converted.len(), "lsp.diagnostics.publish");
		self.documents.insert(document, converted);
		Event::DiagnosticsChanged(vec![document])
	}

	/// Diagnostics of `document`; empty when nothing was published.
	pub fn get(&self, document: DocumentId) -> &[RawDiagnostic] {
		self.documents.get(&document).map(Vec::as_slice).unwrap_or_default()
	}

	/// Forgets `document`.
	pub fn close(&mut self, document: DocumentId) -> Event {
		self.documents.remove(&document);
		Event::DocumentClosed(document)
	}
}
