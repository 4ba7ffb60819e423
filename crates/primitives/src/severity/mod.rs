use std::cmp::Ordering;

/// Severity of a diagnostic.
///
/// Ordering follows [`Severity::rank`]: a *lower* value is *more* severe, so
/// `Severity::Error < Severity::Hint` and the minimum of a set of severities is
/// the most severe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
	Error,
	Warning,
	Info,
	Hint,
}

impl Severity {
	/// All severities, most severe first.
	pub const ALL: [Severity; 4] = [Self::Error, Self::Warning, Self::Info, Self::Hint];

	/// Severity assumed for diagnostics that arrive without one.
	pub const FALLBACK: Severity = Self::Hint;

	/// Total order used for every severity comparison (0 = most severe).
	pub const fn rank(self) -> u8 {
		match self {
			Self::Error => 0,
			Self::Warning => 1,
			Self::Info => 2,
			Self::Hint => 3,
		}
	}

	/// Icon glyph prefixed to expanded messages.
	pub const fn icon(self) -> &'static str {
		match self {
			Self::Error => "✖",
			Self::Warning => "⚠",
			Self::Info => "ℹ",
			Self::Hint => "💡",
		}
	}

	/// Theme color token for the decoration foreground.
	pub const fn foreground_token(self) -> &'static str {
		match self {
			Self::Error => "editorError.foreground",
			Self::Warning => "editorWarning.foreground",
			Self::Info => "editorInfo.foreground",
			Self::Hint => "editorHint.foreground",
		}
	}

	/// Theme color token for the tinted background of expanded decorations.
	pub const fn background_token(self) -> &'static str {
		match self {
			Self::Error => "editorError.background",
			Self::Warning => "editorWarning.background",
			Self::Info => "editorInfo.background",
			Self::Hint => "editorHint.background",
		}
	}
}

impl PartialOrd for Severity {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Severity {
	fn cmp(&self, other: &Self) -> Ordering {
		self.rank().cmp(&other.rank())
	}
}
