use crate::Severity;

/// A diagnostic as reported by the host, anchored to its start line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawDiagnostic {
	/// Zero-based line the diagnostic range starts on.
	pub line: u32,
	/// Reported severity; `None` when the producer omitted it.
	pub severity: Option<Severity>,
	/// Message text, not yet normalized.
	pub message: String,
}

impl RawDiagnostic {
	/// Creates a diagnostic with a known severity.
	pub fn new(line: u32, severity: Severity, message: impl Into<String>) -> Self {
		Self {
			line,
			severity: Some(severity),
			message: message.into(),
		}
	}

	/// Severity used for ranking; missing severities count as hints.
	pub fn severity(&self) -> Severity {
		self.severity.unwrap_or(Severity::FALLBACK)
	}
}
