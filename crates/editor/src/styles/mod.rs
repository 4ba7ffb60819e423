//! Decoration styles, allocated lazily through the host and cached.
//!
//! Every render touches all eight (severity × kind) handles so that a handle
//! which has nothing to show this cycle is explicitly cleared.

use glint_primitives::{Severity, StyleHandle};
use tracing::debug;

use crate::host::EditorHost;

/// Margin between the end of the line and the decoration.
pub const DECORATION_MARGIN: &str = "0 0 0 1.5em";
/// Inner padding of expanded decorations.
pub const DECORATION_PADDING: &str = "0 0.5em";
/// Corner radius of expanded decorations.
pub const DECORATION_BORDER_RADIUS: &str = "3px";

/// How a line's diagnostics are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
	/// Dot glyph summary on lines away from the cursor.
	Compact,
	/// Full message on the cursor line.
	Expanded,
}

impl DecorationKind {
	pub const ALL: [DecorationKind; 2] = [Self::Compact, Self::Expanded];

	pub(crate) const fn index(self) -> usize {
		match self {
			Self::Compact => 0,
			Self::Expanded => 1,
		}
	}
}

/// Tinted background of an expanded decoration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
	pub color: &'static str,
	pub opacity: f64,
}

/// Everything the host needs to allocate one decoration style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSpec {
	pub kind: DecorationKind,
	pub severity: Severity,
	pub color: &'static str,
	pub background: Option<Background>,
	pub margin: &'static str,
	pub padding: Option<&'static str>,
	pub border_radius: Option<&'static str>,
}

impl RenderSpec {
	pub fn new(severity: Severity, kind: DecorationKind, background_opacity: f64) -> Self {
		let color = severity.foreground_token();
		match kind {
			DecorationKind::Compact => Self {
				kind,
				severity,
				color,
				background: None,
				margin: DECORATION_MARGIN,
				padding: None,
				border_radius: None,
			},
			DecorationKind::Expanded => Self {
				kind,
				severity,
				color,
				background: Some(Background {
					color: severity.background_token(),
					opacity: background_opacity,
				}),
				margin: DECORATION_MARGIN,
				padding: Some(DECORATION_PADDING),
				border_radius: Some(DECORATION_BORDER_RADIUS),
			},
		}
	}
}

#[derive(Debug)]
struct StyleSet {
	opacity: f64,
	handles: [[StyleHandle; 2]; 4],
}

/// Lazily allocated style handles, one per (severity, kind) pair.
///
/// The set is rebuilt when the background opacity it was built for changes.
#[derive(Debug, Default)]
pub struct StyleCache {
	set: Option<StyleSet>,
}

impl StyleCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_allocated(&self) -> bool {
		self.set.is_some()
	}

	/// Makes sure handles exist for `opacity`, reallocating a stale set.
	pub fn ensure<H: EditorHost + ?Sized>(&mut self, host: &mut H, opacity: f64) {
		if let Some(set) = &self.set {
			if set.opacity == opacity {
				return;
			}
			self.invalidate(host);
		}

		let handles = Severity::ALL.map(|severity| {
			DecorationKind::ALL.map(|kind| host.create_style(&RenderSpec::new(severity, kind, opacity)))
		});
		debug!(opacity, "styles.cache.allocated");
		self.set = Some(StyleSet { opacity, handles });
	}

	/// Handle for `severity` and `kind`, if allocated.
	pub fn handle(&self, severity: Severity, kind: DecorationKind) -> Option<StyleHandle> {
		self.set
			.as_ref()
			.map(|set| set.handles[usize::from(severity.rank())][kind.index()])
	}

	/// All allocated handles with their severity and kind, most severe first.
	pub fn all_handles(&self) -> Vec<(Severity, DecorationKind, StyleHandle)> {
		let Some(set) = &self.set else {
			return Vec::new();
		};
		Severity::ALL
			.iter()
			.flat_map(|&severity| {
				DecorationKind::ALL
					.iter()
					.map(move |&kind| (severity, kind, set.handles[usize::from(severity.rank())][kind.index()]))
			})
			.collect()
	}

	/// Releases every handle; the next [`Self::ensure`] allocates anew.
	pub fn invalidate<H: EditorHost + ?Sized>(&mut self, host: &mut H) {
		if let Some(set) = self.set.take() {
			for handle in set.handles.into_iter().flatten() {
				host.dispose_style(handle);
			}
			debug!("styles.cache.disposed");
		}
	}
}
