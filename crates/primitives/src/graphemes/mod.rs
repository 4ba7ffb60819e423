use unicode_segmentation::UnicodeSegmentation;

/// Suffix appended to text cut by [`truncate_with_ellipsis`].
pub const ELLIPSIS: &str = "...";

/// Number of extended grapheme clusters in `text`.
///
/// This is the unit every message length limit is measured in, so a
/// multi-codepoint emoji counts as one.
pub fn grapheme_len(text: &str) -> usize {
	text.graphemes(true).count()
}

/// Returns the longest prefix of `text` holding at most `max` grapheme clusters.
pub fn grapheme_prefix(text: &str, max: usize) -> &str {
	match text.grapheme_indices(true).nth(max) {
		Some((byte_idx, _)) => &text[..byte_idx],
		None => text,
	}
}

/// Cuts `text` so it holds at most `max` grapheme clusters, marking the cut
/// with [`ELLIPSIS`].
///
/// Text that already fits is returned unchanged. Otherwise the result is the
/// first `max - 3` clusters followed by `"..."`; when `max` is too small for
/// even the ellipsis, the ellipsis itself is shortened so the result never
/// exceeds `max`.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
	if grapheme_len(text) <= max {
		return text.to_string();
	}
	let keep = max.saturating_sub(ELLIPSIS.len());
	let mut out = String::with_capacity(text.len().min(max.saturating_mul(4)) + ELLIPSIS.len());
	out.push_str(grapheme_prefix(text, keep));
	out.push_str(&ELLIPSIS[..ELLIPSIS.len().min(max)]);
	out
}
