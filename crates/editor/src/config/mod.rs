//! Settings snapshot and the store that owns it.
//!
//! Settings live under the [`CONFIG_SECTION`] namespace of the host's JSON
//! settings document. Reading is lenient per key: a missing or mistyped value
//! falls back to its default, and numeric values outside their valid range are
//! clamped instead of rejected.

mod parse;
mod store;

use std::time::Duration;

pub use parse::{from_json_str, from_section};
pub use store::{ConfigChange, ConfigStore};

/// Namespace all setting keys live under.
pub const CONFIG_SECTION: &str = "inlineDiagnostics";

/// Fixed debounce applied to cursor movement, independent of
/// [`Settings::update_debounce_ms`], so expansion follows the cursor quickly.
pub const CURSOR_DEBOUNCE: Duration = Duration::from_millis(50);

/// Setting keys, relative to [`CONFIG_SECTION`].
pub mod keys {
	pub const ENABLED: &str = "enabled";
	pub const COMPACT_MODE: &str = "compactMode";
	pub const BACKGROUND_OPACITY: &str = "backgroundOpacity";
	pub const DOT_COUNT: &str = "dotCount";
	pub const SHOW_ICONS: &str = "showIcons";
	pub const MAX_MESSAGE_LENGTH: &str = "maxMessageLength";
	pub const UPDATE_DEBOUNCE: &str = "updateDebounce";
}

/// Immutable settings snapshot.
///
/// Equality is structural over every field; it is what decides whether a
/// configuration event is a real change.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
	/// Master switch.
	pub enabled: bool,
	/// Render glyph summaries on lines other than the cursor line.
	pub compact_mode: bool,
	/// Opacity of the expanded decoration background, in `[0, 1]`.
	pub background_opacity: f64,
	/// Maximum number of dot glyphs in a compact summary (at least 1).
	pub dot_count: usize,
	/// Prefix expanded messages with a severity icon.
	pub show_icons: bool,
	/// Maximum message length in grapheme clusters (at least 1).
	pub max_message_length: usize,
	/// Debounce applied to diagnostics-driven renders, in milliseconds.
	pub update_debounce_ms: u64,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			enabled: true,
			compact_mode: true,
			background_opacity: 0.15,
			dot_count: 3,
			show_icons: true,
			max_message_length: 200,
			update_debounce_ms: 100,
		}
	}
}

impl Settings {
	/// Debounce applied to diagnostics-driven renders.
	pub fn update_debounce(&self) -> Duration {
		Duration::from_millis(self.update_debounce_ms)
	}

	/// Clamps every field into its valid range.
	pub fn sanitized(mut self) -> Self {
		self.background_opacity = clamp_opacity(self.background_opacity);
		self.dot_count = self.dot_count.max(1);
		self.max_message_length = self.max_message_length.max(1);
		self
	}

	/// Returns true when switching from `self` to `other` changes how styles
	/// must be allocated.
	pub fn style_differs(&self, other: &Settings) -> bool {
		self.background_opacity != other.background_opacity
	}
}

pub(crate) fn clamp_opacity(value: f64) -> f64 {
	if value.is_finite() {
		value.clamp(0.0, 1.0)
	} else {
		Settings::default().background_opacity
	}
}
