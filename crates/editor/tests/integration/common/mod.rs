//! Common utilities for coordinator integration tests.

use std::time::Duration;

use glint_editor::{
	ActiveEditor, Coordinator, Decoration, DecorationKind, DocumentId, EditorHost, EditorId, Event, HostError,
	LinePosition, NoticeLevel, RawDiagnostic, RenderSpec, Settings, Severity, StyleHandle,
};
use rustc_hash::FxHashMap;
use tokio::sync::mpsc::UnboundedReceiver;

pub const DOC: DocumentId = DocumentId(1);
pub const EDITOR: EditorId = EditorId(1);

/// One line as the user would see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Painted {
	pub line: u32,
	pub kind: DecorationKind,
	pub severity: Severity,
	pub text: String,
}

/// Editor double recording every call made by the coordinator.
#[derive(Debug, Default)]
pub struct TestHost {
	pub diagnostics: FxHashMap<DocumentId, Vec<RawDiagnostic>>,
	pub active: Option<ActiveEditor>,
	pub specs: FxHashMap<StyleHandle, RenderSpec>,
	pub disposed: Vec<StyleHandle>,
	pub set_calls: Vec<(EditorId, StyleHandle, Vec<Decoration>)>,
	pub notices: Vec<(NoticeLevel, String)>,
	next_style: u64,
}

impl TestHost {
	pub fn focused(editor: EditorId, document: DocumentId, cursor_line: u32) -> Self {
		Self {
			active: Some(ActiveEditor {
				editor,
				document,
				cursor_line,
			}),
			..Self::default()
		}
	}

	pub fn with_diagnostics(mut self, document: DocumentId, diagnostics: Vec<RawDiagnostic>) -> Self {
		self.diagnostics.insert(document, diagnostics);
		self
	}

	/// What is currently visible in `editor`, sorted by line.
	pub fn painted(&self, editor: EditorId) -> Vec<Painted> {
		let mut latest: FxHashMap<StyleHandle, &Vec<Decoration>> = FxHashMap::default();
		for (target, style, decorations) in &self.set_calls {
			if *target == editor && !self.disposed.contains(style) {
				latest.insert(*style, decorations);
			}
		}
		let mut painted: Vec<Painted> = latest
			.into_iter()
			.flat_map(|(style, decorations)| {
				let spec = self.specs[&style];
				decorations.iter().map(move |d| Painted {
					line: d.position.line,
					kind: spec.kind,
					severity: spec.severity,
					text: d.text.clone(),
				})
			})
			.collect();
		painted.sort_by_key(|p| p.line);
		painted
	}

	/// Number of `set_decorations` calls aimed at `editor`.
	pub fn calls_for(&self, editor: EditorId) -> usize {
		self.set_calls.iter().filter(|(target, _, _)| *target == editor).count()
	}
}

impl EditorHost for TestHost {
	fn diagnostics(&self, document: DocumentId) -> Vec<RawDiagnostic> {
		self.diagnostics.get(&document).cloned().unwrap_or_default()
	}

	fn active_editor(&self) -> Option<ActiveEditor> {
		self.active
	}

	fn line_end(&self, _document: DocumentId, line: u32) -> Option<LinePosition> {
		Some(LinePosition::new(line, 80))
	}

	fn set_decorations(&mut self, editor: EditorId, style: StyleHandle, decorations: Vec<Decoration>) {
		self.set_calls.push((editor, style, decorations));
	}

	fn create_style(&mut self, spec: &RenderSpec) -> StyleHandle {
		self.next_style += 1;
		let handle = StyleHandle(self.next_style);
		self.specs.insert(handle, *spec);
		handle
	}

	fn dispose_style(&mut self, style: StyleHandle) {
		self.disposed.push(style);
	}

	fn persist_setting(&mut self, _key: &str, _value: serde_json::Value) -> Result<(), HostError> {
		Ok(())
	}

	fn notify(&mut self, level: NoticeLevel, message: &str) {
		self.notices.push((level, message.to_string()));
	}
}

pub type Harness = (Coordinator<TestHost>, UnboundedReceiver<Event>);

/// Builds and initializes a coordinator around `host`.
pub fn start(host: TestHost) -> Harness {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
	let (mut coordinator, rx) = Coordinator::new(host, Settings::default());
	coordinator.initialize();
	(coordinator, rx)
}

/// Lets the paused clock run past `delay`, then feeds every queued event back
/// into the coordinator. Returns the number of events handled.
pub async fn advance_and_pump(harness: &mut Harness, delay: Duration) -> usize {
	tokio::time::sleep(delay + Duration::from_millis(1)).await;
	tokio::task::yield_now().await;
	let (coordinator, rx) = harness;
	let mut handled = 0;
	while let Ok(event) = rx.try_recv() {
		coordinator.handle(event);
		handled += 1;
	}
	handled
}

pub fn diag(line: u32, severity: Severity, message: &str) -> RawDiagnostic {
	RawDiagnostic::new(line, severity, message)
}
