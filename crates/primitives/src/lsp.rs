/// Position in line/character coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinePosition {
	/// Zero-based line index.
	pub line: u32,
	/// Zero-based character offset in the line.
	pub character: u32,
}

impl LinePosition {
	/// Creates a new position.
	pub const fn new(line: u32, character: u32) -> Self {
		Self { line, character }
	}
}

#[cfg(feature = "lsp")]
mod interop {
	use lsp_types::{Diagnostic, DiagnosticSeverity};

	use super::LinePosition;
	use crate::{RawDiagnostic, Severity};

	impl From<lsp_types::Position> for LinePosition {
		fn from(pos: lsp_types::Position) -> Self {
			Self::new(pos.line, pos.character)
		}
	}

	impl From<LinePosition> for lsp_types::Position {
		fn from(pos: LinePosition) -> Self {
			lsp_types::Position::new(pos.line, pos.character)
		}
	}

	/// Maps an LSP severity; unknown values are treated as missing.
	pub fn severity_from_lsp(severity: Option<DiagnosticSeverity>) -> Option<Severity> {
		match severity? {
			DiagnosticSeverity::ERROR => Some(Severity::Error),
			DiagnosticSeverity::WARNING => Some(Severity::Warning),
			DiagnosticSeverity::INFORMATION => Some(Severity::Info),
			DiagnosticSeverity::HINT => Some(Severity::Hint),
			_ => None,
		}
	}

	impl From<&Diagnostic> for RawDiagnostic {
		fn from(diag: &Diagnostic) -> Self {
			Self {
				line: diag.range.start.line,
				severity: severity_from_lsp(diag.severity),
				message: diag.message.clone(),
			}
		}
	}
}

#[cfg(feature = "lsp")]
pub use interop::severity_from_lsp;
