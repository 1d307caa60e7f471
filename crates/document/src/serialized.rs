//! JSON snapshot format.
//!
//! ```json
//! {
//!   "version": 1,
//!   "root": { "children": [
//!     { "type": "paragraph", "children": [
//!       { "type": "text", "text": "ab" },
//!       { "type": "linebreak" },
//!       { "type": "atomic", "kind": "mention", "data": "@ada" }
//!     ] }
//!   ] },
//!   "selection": { "type": "range", "anchor": { "block": 0, "offset": 2 }, "focus": { "block": 0, "offset": 2 } }
//! }
//! ```

use plume_primitives::{LINE_BREAK, OBJECT_CHAR};
use serde::{Deserialize, Serialize};

use crate::block::{AtomicNode, Block};
use crate::error::DeserializationError;
use crate::selection::{Point, Selection};
use crate::state::{EditorState, Root};

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SerializedState {
	version: u32,
	root: SerializedRoot,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	selection: Option<Selection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializedRoot {
	children: Vec<SerializedBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SerializedBlock {
	Paragraph { children: Vec<SerializedInline> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SerializedInline {
	Text { text: String },
	Linebreak,
	Atomic(AtomicNode),
}

/// Parses a JSON snapshot into an [`EditorState`].
pub fn parse_state(json: &str) -> Result<EditorState, DeserializationError> {
	let serialized: SerializedState = serde_json::from_str(json)?;
	EditorState::try_from(serialized)
}

/// Serializes blocks as a JSON array of paragraph nodes, the shape used for
/// clipboard fragments.
pub fn serialize_fragment(blocks: &[Block]) -> serde_json::Result<String> {
	let nodes: Vec<SerializedBlock> = blocks.iter().map(SerializedBlock::from).collect();
	serde_json::to_string(&nodes)
}

impl EditorState {
	/// Serializes this state to its JSON snapshot form.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}

	/// Parses a JSON snapshot. Alias of [`parse_state`].
	pub fn from_json(json: &str) -> Result<Self, DeserializationError> {
		parse_state(json)
	}
}

impl From<&Block> for SerializedBlock {
	fn from(block: &Block) -> Self {
		let mut children = Vec::new();
		let mut text = String::new();
		let mut atoms = block.atoms().iter();

		for c in block.content().chars() {
			match c {
				LINE_BREAK | OBJECT_CHAR => {
					if !text.is_empty() {
						children.push(SerializedInline::Text {
							text: std::mem::take(&mut text),
						});
					}
					if c == LINE_BREAK {
						children.push(SerializedInline::Linebreak);
					} else if let Some(atom) = atoms.next() {
						children.push(SerializedInline::Atomic(atom.clone()));
					}
				}
				c => text.push(c),
			}
		}
		if !text.is_empty() {
			children.push(SerializedInline::Text { text });
		}

		SerializedBlock::Paragraph { children }
	}
}

impl From<EditorState> for SerializedState {
	fn from(state: EditorState) -> Self {
		Self {
			version: SNAPSHOT_VERSION,
			root: SerializedRoot {
				children: state.root.children().iter().map(SerializedBlock::from).collect(),
			},
			selection: state.selection,
		}
	}
}

impl TryFrom<SerializedState> for EditorState {
	type Error = DeserializationError;

	fn try_from(serialized: SerializedState) -> Result<Self, Self::Error> {
		if serialized.version != SNAPSHOT_VERSION {
			return Err(DeserializationError::UnsupportedVersion {
				found: serialized.version,
				expected: SNAPSHOT_VERSION,
			});
		}

		let mut children = Vec::with_capacity(serialized.root.children.len());
		for (index, node) in serialized.root.children.into_iter().enumerate() {
			let SerializedBlock::Paragraph { children: inlines } = node;
			let mut block = Block::new();
			for inline in inlines {
				let at = block.len_chars();
				match inline {
					SerializedInline::Text { text } => {
						if text.contains([LINE_BREAK, '\r', OBJECT_CHAR]) {
							return Err(DeserializationError::InvalidText { block: index });
						}
						block.insert_text(at, &text);
					}
					SerializedInline::Linebreak => {
						block.insert_text(at, "\n");
					}
					SerializedInline::Atomic(atom) => block.insert_atom(at, atom),
				}
			}
			children.push(block);
		}

		let root = Root { children };
		if let Some(selection) = &serialized.selection {
			validate_selection(&root, selection)?;
		}
		Ok(EditorState::from_parts(root, serialized.selection))
	}
}

fn validate_selection(root: &Root, selection: &Selection) -> Result<(), DeserializationError> {
	match selection {
		Selection::Range(range) => {
			check_point(root, range.anchor)?;
			check_point(root, range.focus)
		}
		Selection::Node(node) => {
			let point = Point::new(node.block, node.offset);
			check_point(root, point)?;
			match root.child(node.block).and_then(|block| block.atom_at(node.offset)) {
				Some(_) => Ok(()),
				None => Err(DeserializationError::NotAnAtomicNode {
					block: node.block,
					offset: node.offset,
				}),
			}
		}
	}
}

fn check_point(root: &Root, point: Point) -> Result<(), DeserializationError> {
	match root.child(point.block) {
		Some(block) if point.offset <= block.len_chars() => Ok(()),
		_ => Err(DeserializationError::SelectionOutOfBounds {
			block: point.block,
			offset: point.offset,
		}),
	}
}
