//! Word and line boundaries over block content.
//!
//! Line breaks and atomic nodes are single-char units (see [`crate::LINE_BREAK`]
//! and [`crate::OBJECT_CHAR`]); a word motion never crosses one together with
//! other text.

use ropey::RopeSlice;

use crate::{CharIdx, LINE_BREAK, OBJECT_CHAR};

/// Coarse character classification used for word motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
	/// Alphanumeric or underscore.
	Word,
	/// Any other visible character.
	Punctuation,
	/// Whitespace other than a line break.
	Whitespace,
	/// A line-break node.
	LineBreak,
	/// An atomic inline node.
	Object,
}

impl CharClass {
	/// Classifies a single char.
	pub fn of(c: char) -> Self {
		match c {
			LINE_BREAK => Self::LineBreak,
			OBJECT_CHAR => Self::Object,
			c if c.is_alphanumeric() || c == '_' => Self::Word,
			c if c.is_whitespace() => Self::Whitespace,
			_ => Self::Punctuation,
		}
	}

	/// Units that a word motion consumes one at a time.
	#[inline]
	pub fn is_standalone(self) -> bool {
		matches!(self, Self::LineBreak | Self::Object)
	}
}

/// Returns the start of the word before `pos`.
///
/// Skips whitespace, then a run of chars of the same class. A line break or atomic
/// node directly before `pos` is consumed alone; one reached after skipping
/// whitespace stops the motion.
pub fn prev_word_boundary(text: RopeSlice, pos: CharIdx) -> CharIdx {
	let pos = pos.min(text.len_chars());
	let mut idx = pos;
	while idx > 0 && CharClass::of(text.char(idx - 1)) == CharClass::Whitespace {
		idx -= 1;
	}
	if idx == 0 {
		return 0;
	}

	let class = CharClass::of(text.char(idx - 1));
	if class.is_standalone() {
		return if idx == pos { idx - 1 } else { idx };
	}
	while idx > 0 && CharClass::of(text.char(idx - 1)) == class {
		idx -= 1;
	}
	idx
}

/// Returns the end of the word after `pos`. Mirror image of [`prev_word_boundary`].
pub fn next_word_boundary(text: RopeSlice, pos: CharIdx) -> CharIdx {
	let len = text.len_chars();
	let pos = pos.min(len);
	let mut idx = pos;
	while idx < len && CharClass::of(text.char(idx)) == CharClass::Whitespace {
		idx += 1;
	}
	if idx == len {
		return len;
	}

	let class = CharClass::of(text.char(idx));
	if class.is_standalone() {
		return if idx == pos { idx + 1 } else { idx };
	}
	while idx < len && CharClass::of(text.char(idx)) == class {
		idx += 1;
	}
	idx
}

/// Returns the first position of the line containing `pos`.
pub fn line_start(text: RopeSlice, pos: CharIdx) -> CharIdx {
	let mut idx = pos.min(text.len_chars());
	while idx > 0 && text.char(idx - 1) != LINE_BREAK {
		idx -= 1;
	}
	idx
}

/// Returns the position just before the line break ending the line containing `pos`,
/// or the end of the text.
pub fn line_end(text: RopeSlice, pos: CharIdx) -> CharIdx {
	let len = text.len_chars();
	let mut idx = pos.min(len);
	while idx < len && text.char(idx) != LINE_BREAK {
		idx += 1;
	}
	idx
}
