//! Selection types.

use plume_primitives::CharIdx;
use serde::{Deserialize, Serialize};

/// A position in the document: a block index plus a char offset inside it.
///
/// Points order by block first, then offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Point {
	/// Index of the block among the root's children.
	pub block: usize,
	/// Char offset within the block; `0..=len_chars`.
	pub offset: CharIdx,
}

impl Point {
	/// Creates a point.
	pub const fn new(block: usize, offset: CharIdx) -> Self {
		Self { block, offset }
	}
}

/// A text selection spanning zero or more positions.
///
/// The anchor is the fixed end, the focus the end that moves when the selection is
/// extended. A collapsed range is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeSelection {
	/// The fixed end.
	pub anchor: Point,
	/// The moving end.
	pub focus: Point,
}

impl RangeSelection {
	/// Creates a range from anchor to focus.
	pub const fn new(anchor: Point, focus: Point) -> Self {
		Self { anchor, focus }
	}

	/// Creates a caret at `point`.
	pub const fn caret(point: Point) -> Self {
		Self::new(point, point)
	}

	/// Returns true if anchor equals focus.
	#[inline]
	pub fn is_collapsed(&self) -> bool {
		self.anchor == self.focus
	}

	/// Returns true if the focus precedes the anchor.
	#[inline]
	pub fn is_backward(&self) -> bool {
		self.focus < self.anchor
	}

	/// The earlier of anchor and focus.
	#[inline]
	pub fn start(&self) -> Point {
		self.anchor.min(self.focus)
	}

	/// The later of anchor and focus.
	#[inline]
	pub fn end(&self) -> Point {
		self.anchor.max(self.focus)
	}
}

/// An atomic node selected as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeSelection {
	/// Block holding the node.
	pub block: usize,
	/// Offset of the node inside the block.
	pub offset: CharIdx,
}

/// The active selection of an [`crate::EditorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Selection {
	/// A text range; the only kind plain-text editing acts on.
	Range(RangeSelection),
	/// A single atomic node.
	Node(NodeSelection),
}

impl Selection {
	/// Returns the range selection, if this is one.
	pub fn as_range(&self) -> Option<&RangeSelection> {
		match self {
			Self::Range(range) => Some(range),
			Self::Node(_) => None,
		}
	}

	/// Returns true for [`Selection::Range`].
	pub fn is_range(&self) -> bool {
		matches!(self, Self::Range(_))
	}
}

impl From<RangeSelection> for Selection {
	fn from(range: RangeSelection) -> Self {
		Self::Range(range)
	}
}

impl From<NodeSelection> for Selection {
	fn from(node: NodeSelection) -> Self {
		Self::Node(node)
	}
}
