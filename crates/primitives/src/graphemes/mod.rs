use ropey::RopeSlice;
use unicode_segmentation::UnicodeSegmentation;

use crate::CharIdx;

/// Number of chars inspected on either side of a position.
///
/// Clusters longer than this (long emoji ZWJ sequences, stacked combining marks)
/// are split at the window edge.
const WINDOW: usize = 32;

/// Returns the char index of the next grapheme cluster boundary after `char_idx`.
///
/// If `char_idx` is at or past the end, returns `text.len_chars()`.
pub fn next_grapheme_boundary(text: RopeSlice, char_idx: CharIdx) -> CharIdx {
	let len = text.len_chars();
	if char_idx >= len {
		return len;
	}

	let end = (char_idx + WINDOW).min(len);
	let chunk: String = text.slice(char_idx..end).into();
	let width = chunk.graphemes(true).next().map_or(1, |g| g.chars().count());
	char_idx + width.max(1)
}

/// Returns the char index of the previous grapheme cluster boundary before `char_idx`.
///
/// If `char_idx` is 0, returns 0.
pub fn prev_grapheme_boundary(text: RopeSlice, char_idx: CharIdx) -> CharIdx {
	let char_idx = char_idx.min(text.len_chars());
	if char_idx == 0 {
		return 0;
	}

	let start = char_idx.saturating_sub(WINDOW);
	let chunk: String = text.slice(start..char_idx).into();
	let width = chunk.graphemes(true).next_back().map_or(1, |g| g.chars().count());
	char_idx - width.clamp(1, char_idx)
}
