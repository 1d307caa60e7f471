#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Char-indexed text primitives shared by the document model and the editor.

/// Word, line and character-class boundaries.
pub mod boundary;
/// Grapheme cluster boundary detection.
pub mod graphemes;
/// Key modifier flags.
pub mod key;
/// Newline normalization and line splitting.
pub mod text;

pub use boundary::{CharClass, line_end, line_start, next_word_boundary, prev_word_boundary};
pub use graphemes::{next_grapheme_boundary, prev_grapheme_boundary};
pub use key::Modifiers;
pub use ropey::{Rope, RopeSlice};
pub use text::{normalize_to_lf, split_lines};

/// A position in the text, measured in characters (not bytes).
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
pub type CharLen = usize;

/// Character that stands in for a line-break node inside block content.
pub const LINE_BREAK: char = '\n';

/// Character that stands in for an atomic inline node inside block content.
///
/// This is U+FFFC OBJECT REPLACEMENT CHARACTER; it never survives text insertion.
pub const OBJECT_CHAR: char = '\u{FFFC}';
