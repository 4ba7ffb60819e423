use glint_primitives::{DocumentId, EditorId, LinePosition, RawDiagnostic, StyleHandle};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{ActiveEditor, Decoration, EditorHost, NoticeLevel};
use crate::error::HostError;
use crate::styles::RenderSpec;

/// In-memory host that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
	pub diagnostics: FxHashMap<DocumentId, Vec<RawDiagnostic>>,
	pub active: Option<ActiveEditor>,
	pub unresolved_lines: FxHashSet<u32>,
	pub created: Vec<(StyleHandle, RenderSpec)>,
	pub disposed: Vec<StyleHandle>,
	pub set_calls: Vec<(EditorId, StyleHandle, Vec<Decoration>)>,
	pub persisted: Vec<(String, serde_json::Value)>,
	pub fail_persist: bool,
	pub unavailable: bool,
	pub notices: Vec<(NoticeLevel, String)>,
	next_style: u64,
}

impl RecordingHost {
	pub fn spec(&self, handle: StyleHandle) -> Option<&RenderSpec> {
		self.created.iter().find(|(h, _)| *h == handle).map(|(_, spec)| spec)
	}

	/// Latest decorations per style in `editor`, skipping empty lists.
	pub fn painted(&self, editor: EditorId) -> Vec<(RenderSpec, Vec<Decoration>)> {
		let mut latest: Vec<(StyleHandle, &Vec<Decoration>)> = Vec::new();
		for (target, style, decorations) in &self.set_calls {
			if *target != editor {
				continue;
			}
			match latest.iter_mut().find(|(h, _)| h == style) {
				Some(slot) => slot.1 = decorations,
				None => latest.push((*style, decorations)),
			}
		}
		latest
			.into_iter()
			.filter(|(_, decorations)| !decorations.is_empty())
			.filter_map(|(style, decorations)| Some((*self.spec(style)?, decorations.clone())))
			.collect()
	}
}

impl EditorHost for RecordingHost {
	fn diagnostics(&self, document: DocumentId) -> Vec<RawDiagnostic> {
		self.diagnostics.get(&document).cloned().unwrap_or_default()
	}

	fn active_editor(&self) -> Option<ActiveEditor> {
		self.active
	}

	fn line_end(&self, _document: DocumentId, line: u32) -> Option<LinePosition> {
		(!self.unresolved_lines.contains(&line)).then(|| LinePosition::new(line, 40))
	}

	fn set_decorations(&mut self, editor: EditorId, style: StyleHandle, decorations: Vec<Decoration>) {
		self.set_calls.push((editor, style, decorations));
	}

	fn create_style(&mut self, spec: &RenderSpec) -> StyleHandle {
		self.next_style += 1;
		let handle = StyleHandle(self.next_style);
		self.created.push((handle, *spec));
		handle
	}

	fn dispose_style(&mut self, style: StyleHandle) {
		self.disposed.push(style);
	}

	fn persist_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), HostError> {
		if self.unavailable {
			return Err(HostError::Unavailable);
		}
		if self.fail_persist {
			return Err(HostError::Persist {
				key: key.to_string(),
				reason: "read-only settings".into(),
			});
		}
		self.persisted.push((key.to_string(), value));
		Ok(())
	}

	fn notify(&mut self, level: NoticeLevel, message: &str) {
		self.notices.push((level, message.to_string()));
	}
}
