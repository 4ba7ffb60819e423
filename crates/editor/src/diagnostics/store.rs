use std::sync::Arc;

use glint_primitives::DocumentId;
use glint_worker::{Observers, SubscriptionId};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::{LineSummary, LineSummaryMap};

/// Notification sent after a document's summaries were replaced.
#[derive(Debug, Clone)]
pub struct DiagnosticsUpdate {
	pub document: DocumentId,
	pub summaries: Arc<LineSummaryMap>,
}

/// Per-document line summaries.
///
/// Maps are swapped whole; a reader holding an `Arc` from [`Self::get`] keeps
/// a consistent snapshot no matter what is stored afterwards.
#[derive(Debug)]
pub struct DiagnosticStore {
	documents: FxHashMap<DocumentId, Arc<LineSummaryMap>>,
	observers: Observers<DiagnosticsUpdate>,
}

impl Default for DiagnosticStore {
	fn default() -> Self {
		Self::new()
	}
}

impl DiagnosticStore {
	pub fn new() -> Self {
		Self {
			documents: FxHashMap::default(),
			observers: Observers::new("diagnostics"),
		}
	}

	/// Replaces the summaries of `document` and notifies subscribers.
	pub fn replace(&mut self, document: DocumentId, summaries: LineSummaryMap) -> Arc<LineSummaryMap> {
		let summaries = Arc::new(summaries);
		trace!(%document, lines = summaries.len(), "diagnostics.store.replace");
		self.documents.insert(document, Arc::clone(&summaries));
		self.observers.notify(&DiagnosticsUpdate {
			document,
			summaries: Arc::clone(&summaries),
		});
		summaries
	}

	/// Current summaries of `document`, if it was ever aggregated.
	pub fn get(&self, document: DocumentId) -> Option<Arc<LineSummaryMap>> {
		self.documents.get(&document).cloned()
	}

	/// Summary of a single line.
	pub fn line(&self, document: DocumentId, line: u32) -> Option<&LineSummary> {
		self.documents.get(&document)?.get(&line)
	}

	/// Forgets a closed document.
	pub fn remove(&mut self, document: DocumentId) -> bool {
		let removed = self.documents.remove(&document).is_some();
		if removed {
			debug!(%document, "diagnostics.store.remove");
		}
		removed
	}

	pub fn clear(&mut self) {
		self.documents.clear();
	}

	pub fn len(&self) -> usize {
		self.documents.len()
	}

	pub fn is_empty(&self) -> bool {
		self.documents.is_empty()
	}

	/// Registers a handler invoked after every replacement.
	pub fn subscribe(&mut self, handler: impl FnMut(&DiagnosticsUpdate) + 'static) -> SubscriptionId {
		self.observers.subscribe(handler)
	}

	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.observers.unsubscribe(id)
	}
}
