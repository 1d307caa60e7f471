//! Editor-state snapshots and the selection-level editing surface.
//!
//! The editing methods mirror what a plain-text editor needs from a
//! document/selection API: each acts on the current [`RangeSelection`] and returns
//! `false` without touching anything when there is none.

use plume_primitives::{
	CharIdx, OBJECT_CHAR, line_end, line_start, next_grapheme_boundary, next_word_boundary, prev_grapheme_boundary,
	prev_word_boundary,
};
use serde::{Deserialize, Serialize};

use crate::block::{AtomicNode, Block};
use crate::selection::{Point, RangeSelection, Selection};
use crate::serialized::SerializedState;


/// Separator placed between blocks in text extracted from the document.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// The document root: an ordered list of paragraph blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
	pub(crate) children: Vec<Block>,
}

impl Root {
	/// All blocks in document order.
	pub fn children(&self) -> &[Block] {
		&self.children
	}

	/// Number of blocks.
	pub fn len(&self) -> usize {
		self.children.len()
	}

	/// Returns true if the root has no children.
	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// The first block, if any.
	pub fn first_child(&self) -> Option<&Block> {
		self.children.first()
	}

	/// The block at `index`, if any.
	pub fn child(&self, index: usize) -> Option<&Block> {
		self.children.get(index)
	}

	/// Visible text of the whole document, blocks separated by [`BLOCK_SEPARATOR`].
	pub fn text_content(&self) -> String {
		self.children.iter().map(Block::text_content).collect::<Vec<_>>().join(BLOCK_SEPARATOR)
	}
}

/// A complete document snapshot: content plus selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializedState", into = "SerializedState")]
pub struct EditorState {
	pub(crate) root: Root,
	pub(crate) selection: Option<Selection>,
}

impl EditorState {
	/// Creates an empty state: no blocks, no selection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a state from blocks, without selection.
	pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
		Self {
			root: Root {
				children: blocks.into_iter().collect(),
			},
			selection: None,
		}
	}

	/// Creates a single-paragraph state holding `text`.
	pub fn from_text(text: &str) -> Self {
		Self::from_blocks([Block::from_text(text)])
	}

	/// The document root.
	pub fn root(&self) -> &Root {
		&self.root
	}

	/// The active selection.
	pub fn selection(&self) -> Option<&Selection> {
		self.selection.as_ref()
	}

	/// The active selection if it is a range selection.
	pub fn range_selection(&self) -> Option<RangeSelection> {
		self.selection.as_ref().and_then(Selection::as_range).copied()
	}

	/// Returns true if the active selection is a range selection.
	pub fn is_range_selection(&self) -> bool {
		self.selection.as_ref().is_some_and(Selection::is_range)
	}

	/// Replaces the selection, clamping range points into the document.
	///
	/// A node selection that does not address an atomic node, or any selection on an
	/// empty root, clears the selection instead.
	pub fn set_selection(&mut self, selection: Option<Selection>) {
		self.selection = selection.and_then(|selection| self.clamp_selection(selection));
	}

	/// Selects from `anchor` to `focus`.
	pub fn select(&mut self, anchor: Point, focus: Point) {
		self.set_selection(Some(RangeSelection::new(anchor, focus).into()));
	}

	/// Places a caret at `point`.
	pub fn select_caret(&mut self, point: Point) {
		self.select(point, point);
	}

	/// Removes the selection.
	pub fn clear_selection(&mut self) {
		self.selection = None;
	}

	/// Selects the whole document. Returns false on an empty root.
	pub fn select_all(&mut self) -> bool {
		let Some(last) = self.root.children.len().checked_sub(1) else {
			return false;
		};
		let end = Point::new(last, self.root.children[last].len_chars());
		self.selection = Some(RangeSelection::new(Point::default(), end).into());
		true
	}

	/// Visible text of the whole document.
	pub fn text_content(&self) -> String {
		self.root.text_content()
	}

	/// Visible text covered by the range selection.
	pub fn selected_text(&self) -> Option<String> {
		let range = self.range_selection()?;
		Some(self.text_between(range.start(), range.end()))
	}

	/// Copies of the blocks covered by the range selection, trimmed to its bounds.
	pub fn selected_blocks(&self) -> Option<Vec<Block>> {
		let range = self.range_selection()?;
		let (start, end) = (range.start(), range.end());
		let blocks = (start.block..=end.block)
			.map(|index| {
				let block = &self.root.children[index];
				let from = if index == start.block { start.offset } else { 0 };
				let to = if index == end.block { end.offset } else { block.len_chars() };
				block.slice(from..to)
			})
			.collect();
		Some(blocks)
	}

	/// Appends a block to the root, returning its index.
	pub fn append_block(&mut self, block: Block) -> usize {
		self.root.children.push(block);
		self.root.children.len() - 1
	}

	/// Deletes the selected span and collapses the selection to its start.
	pub fn remove_text(&mut self) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		let at = self.delete_range(range.start(), range.end());
		self.set_caret(at);
		true
	}

	/// Replaces the selected span with `text`, leaving the caret after it.
	///
	/// Newlines in `text` become line breaks.
	pub fn insert_text(&mut self, text: &str) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		let at = self.delete_range(range.start(), range.end());
		let inserted = self.root.children[at.block].insert_text(at.offset, text);
		self.set_caret(Point::new(at.block, at.offset + inserted));
		true
	}

	/// Replaces the selected span with a line break.
	///
	/// With `select_start` the caret stays before the break, otherwise it lands after it.
	pub fn insert_line_break(&mut self, select_start: bool) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		let at = self.delete_range(range.start(), range.end());
		let inserted = self.root.children[at.block].insert_text(at.offset, "\n");
		let offset = if select_start { at.offset } else { at.offset + inserted };
		self.set_caret(Point::new(at.block, offset));
		true
	}

	/// Replaces the selected span with an atomic node, leaving the caret after it.
	pub fn insert_atom(&mut self, atom: AtomicNode) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		let at = self.delete_range(range.start(), range.end());
		self.root.children[at.block].insert_atom(at.offset, atom);
		self.set_caret(Point::new(at.block, at.offset + 1));
		true
	}

	/// Deletes one grapheme before or after a caret, or the selected span.
	///
	/// At a block edge the neighbouring block is merged into the current one.
	pub fn delete_character(&mut self, backward: bool) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		if !range.is_collapsed() {
			return self.remove_text();
		}
		let caret = range.focus;
		let target = if backward { self.prev_position(caret) } else { self.next_position(caret) };
		self.delete_between(caret, target);
		true
	}

	/// Deletes to the previous or next word boundary, or the selected span.
	pub fn delete_word(&mut self, backward: bool) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		if !range.is_collapsed() {
			return self.remove_text();
		}
		let caret = range.focus;
		let len = self.root.children[caret.block].len_chars();
		if backward && caret.offset == 0 {
			return self.delete_character(true);
		}
		if !backward && caret.offset == len {
			return self.delete_character(false);
		}
		let content = self.root.children[caret.block].content();
		let target = if backward {
			prev_word_boundary(content, caret.offset)
		} else {
			next_word_boundary(content, caret.offset)
		};
		self.delete_between(caret, Point::new(caret.block, target));
		true
	}

	/// Deletes to the start or end of the current line, or the selected span.
	///
	/// Lines are bounded by line breaks and block edges. A caret already at the
	/// line edge deletes the adjacent character instead.
	pub fn delete_line(&mut self, backward: bool) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		if !range.is_collapsed() {
			return self.remove_text();
		}
		let caret = range.focus;
		let content = self.root.children[caret.block].content();
		let target = if backward {
			line_start(content, caret.offset)
		} else {
			line_end(content, caret.offset)
		};
		if target == caret.offset {
			return self.delete_character(backward);
		}
		self.delete_between(caret, Point::new(caret.block, target));
		true
	}

	/// Moves the focus by one character, keeping the anchor when `extend` is set.
	pub fn move_character(&mut self, extend: bool, backward: bool) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		let focus = if backward { self.prev_position(range.focus) } else { self.next_position(range.focus) };
		let anchor = if extend { range.anchor } else { focus };
		self.selection = Some(RangeSelection::new(anchor, focus).into());
		true
	}

	/// Returns true when the unit next to the focus in the given direction is an
	/// atomic node, which native caret movement cannot step over.
	pub fn should_override_default_character_selection(&self, backward: bool) -> bool {
		let Some(range) = self.range_selection() else {
			return false;
		};
		let focus = range.focus;
		let Some(block) = self.root.children.get(focus.block) else {
			return false;
		};
		let adjacent = if backward {
			focus.offset.checked_sub(1).and_then(|idx| block.char(idx))
		} else {
			block.char(focus.offset)
		};
		adjacent == Some(OBJECT_CHAR)
	}

	pub(crate) fn from_parts(root: Root, selection: Option<Selection>) -> Self {
		Self { root, selection }
	}

	fn set_caret(&mut self, point: Point) {
		self.selection = Some(RangeSelection::caret(point).into());
	}

	fn delete_between(&mut self, a: Point, b: Point) {
		let at = self.delete_range(a.min(b), a.max(b));
		self.set_caret(at);
	}

	/// Removes `start..end`, merging blocks when the range spans several. Returns `start`.
	fn delete_range(&mut self, start: Point, end: Point) -> Point {
		if start == end {
			return start;
		}
		if start.block == end.block {
			self.root.children[start.block].remove(start.offset..end.offset);
			return start;
		}
		let tail = self.root.children[end.block].split_off(end.offset);
		let first = &mut self.root.children[start.block];
		first.truncate(start.offset);
		first.append(tail);
		self.root.children.drain(start.block + 1..=end.block);
		start
	}

	fn prev_position(&self, point: Point) -> Point {
		if point.offset > 0 {
			let content = self.root.children[point.block].content();
			return Point::new(point.block, prev_grapheme_boundary(content, point.offset));
		}
		match point.block.checked_sub(1) {
			Some(prev) => Point::new(prev, self.root.children[prev].len_chars()),
			None => point,
		}
	}

	fn next_position(&self, point: Point) -> Point {
		let block = &self.root.children[point.block];
		if point.offset < block.len_chars() {
			return Point::new(point.block, next_grapheme_boundary(block.content(), point.offset));
		}
		if point.block + 1 < self.root.children.len() {
			return Point::new(point.block + 1, 0);
		}
		point
	}

	fn text_between(&self, start: Point, end: Point) -> String {
		if start.block == end.block {
			return self.root.children[start.block].text_in(start.offset..end.offset);
		}
		(start.block..=end.block)
			.map(|index| {
				let block = &self.root.children[index];
				let from = if index == start.block { start.offset } else { 0 };
				let to = if index == end.block { end.offset } else { block.len_chars() };
				block.text_in(from..to)
			})
			.collect::<Vec<_>>()
			.join(BLOCK_SEPARATOR)
	}

	fn clamp_point(&self, point: Point) -> Option<Point> {
		let last = self.root.children.len().checked_sub(1)?;
		let block = point.block.min(last);
		let offset: CharIdx = point.offset.min(self.root.children[block].len_chars());
		Some(Point::new(block, offset))
	}

	fn clamp_selection(&self, selection: Selection) -> Option<Selection> {
		match selection {
			Selection::Range(range) => {
				let anchor = self.clamp_point(range.anchor)?;
				let focus = self.clamp_point(range.focus)?;
				Some(RangeSelection::new(anchor, focus).into())
			}
			Selection::Node(node) => {
				let block = self.root.children.get(node.block)?;
				block.atom_at(node.offset)?;
				Some(Selection::Node(node))
			}
		}
	}
}
