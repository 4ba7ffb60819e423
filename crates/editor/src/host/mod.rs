//! Boundary to the editor that owns documents, cursors, and painting.

use glint_primitives::{DocumentId, EditorId, LinePosition, RawDiagnostic, StyleHandle};

use crate::error::HostError;
use crate::styles::RenderSpec;

/// The focused editor pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveEditor {
	pub editor: EditorId,
	pub document: DocumentId,
	/// Line holding the primary cursor.
	pub cursor_line: u32,
}

/// One piece of text painted after the end of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
	pub position: LinePosition,
	pub text: String,
	/// Theme color token for the text.
	pub color: &'static str,
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Warning,
	Error,
}

/// Services the engine consumes from the editor.
///
/// All methods are called from the coordinator's event loop. Lookups that the
/// host cannot answer return `None` and the engine skips the affected work.
pub trait EditorHost {
	/// Current diagnostics of `document`, in the host's order.
	fn diagnostics(&self, document: DocumentId) -> Vec<RawDiagnostic>;

	/// The focused editor, if any.
	fn active_editor(&self) -> Option<ActiveEditor>;

	/// Position just past the last character of `line`.
	fn line_end(&self, document: DocumentId, line: u32) -> Option<LinePosition>;

	/// Replaces everything painted with `style` in `editor`.
	///
	/// An empty list clears the style.
	fn set_decorations(&mut self, editor: EditorId, style: StyleHandle, decorations: Vec<Decoration>);

	fn create_style(&mut self, spec: &RenderSpec) -> StyleHandle;

	fn dispose_style(&mut self, style: StyleHandle);

	/// Writes `value` to the user's persistent settings under the fully
	/// qualified `key`.
	fn persist_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), HostError>;

	/// Shows a transient message to the user.
	fn notify(&mut self, level: NoticeLevel, message: &str);
}

#[cfg(test)]
pub(crate) mod recording;
