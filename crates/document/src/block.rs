//! Paragraph blocks and their inline content.

use std::ops::Range;

use plume_primitives::{CharIdx, CharLen, OBJECT_CHAR, normalize_to_lf};
use ropey::{Rope, RopeSlice};
use serde::{Deserialize, Serialize};

/// An inline node that occupies a single position and is never entered by the caret.
///
/// The editor core does not interpret `kind` or `data`; hosts use them to render
/// embedded objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomicNode {
	/// Host-defined node type, e.g. `"mention"`.
	pub kind: String,
	/// Opaque host payload.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<String>,
}

impl AtomicNode {
	/// Creates a node without payload.
	pub fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			data: None,
		}
	}

	/// Attaches a payload.
	pub fn with_data(mut self, data: impl Into<String>) -> Self {
		self.data = Some(data.into());
		self
	}
}

/// A paragraph: a run of text, line breaks and atomic nodes.
///
/// Every [`OBJECT_CHAR`] in `content` has exactly one entry in `atoms`, in
/// document order. All mutators keep the two in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
	content: Rope,
	atoms: Vec<AtomicNode>,
}

impl Block {
	/// Creates an empty paragraph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a paragraph holding `text`; `\n` becomes a line break.
	pub fn from_text(text: &str) -> Self {
		let mut block = Self::new();
		block.insert_text(0, text);
		block
	}

	/// Length in positions (chars, line breaks and atomic nodes).
	#[inline]
	pub fn len_chars(&self) -> CharLen {
		self.content.len_chars()
	}

	/// Returns true if the paragraph has no content.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.content.len_chars() == 0
	}

	/// Raw content including placeholder chars.
	pub fn content(&self) -> RopeSlice<'_> {
		self.content.slice(..)
	}

	/// Atomic nodes in document order.
	pub fn atoms(&self) -> &[AtomicNode] {
		&self.atoms
	}

	/// Returns the unit at `idx`, if any.
	pub fn char(&self, idx: CharIdx) -> Option<char> {
		self.content.get_char(idx)
	}

	/// Returns the atomic node at `idx` if that position holds one.
	pub fn atom_at(&self, idx: CharIdx) -> Option<&AtomicNode> {
		if self.char(idx)? != OBJECT_CHAR {
			return None;
		}
		self.atoms.get(self.atoms_before(idx))
	}

	/// Visible text: line breaks as `\n`, atomic nodes omitted.
	pub fn text_content(&self) -> String {
		self.text_in(0..self.len_chars())
	}

	/// Visible text of a sub-range.
	pub fn text_in(&self, range: Range<CharIdx>) -> String {
		self.content.slice(range).chars().filter(|&c| c != OBJECT_CHAR).collect()
	}

	/// Inserts text at `at`, returning the number of positions inserted.
	///
	/// Carriage returns are normalized to line breaks and placeholder chars are
	/// dropped, so text can never fabricate an atomic node.
	pub fn insert_text(&mut self, at: CharIdx, text: &str) -> CharLen {
		let normalized = normalize_to_lf(text);
		let clean: String = normalized.chars().filter(|&c| c != OBJECT_CHAR).collect();
		if clean.is_empty() {
			return 0;
		}
		self.content.insert(at, &clean);
		clean.chars().count()
	}

	/// Inserts an atomic node at `at`.
	pub fn insert_atom(&mut self, at: CharIdx, atom: AtomicNode) {
		let index = self.atoms_before(at);
		self.content.insert_char(at, OBJECT_CHAR);
		self.atoms.insert(index, atom);
	}

	/// Removes the positions in `range`, including any atomic nodes it covers.
	pub fn remove(&mut self, range: Range<CharIdx>) {
		if range.is_empty() {
			return;
		}
		let first = self.atoms_before(range.start);
		let covered = self.count_atoms(range.clone());
		self.atoms.drain(first..first + covered);
		self.content.remove(range);
	}

	/// Splits the paragraph at `at`, returning everything after it.
	pub fn split_off(&mut self, at: CharIdx) -> Block {
		let index = self.atoms_before(at);
		Block {
			atoms: self.atoms.split_off(index),
			content: self.content.split_off(at),
		}
	}

	/// Drops everything from `at` onwards.
	pub fn truncate(&mut self, at: CharIdx) {
		let index = self.atoms_before(at);
		self.atoms.truncate(index);
		self.content.remove(at..);
	}

	/// Appends another paragraph's content.
	pub fn append(&mut self, other: Block) {
		self.content.append(other.content);
		self.atoms.extend(other.atoms);
	}

	/// Copies a sub-range into a new paragraph.
	pub fn slice(&self, range: Range<CharIdx>) -> Block {
		let first = self.atoms_before(range.start);
		let covered = self.count_atoms(range.clone());
		Block {
			content: Rope::from(self.content.slice(range)),
			atoms: self.atoms[first..first + covered].to_vec(),
		}
	}

	fn atoms_before(&self, idx: CharIdx) -> usize {
		self.count_atoms(0..idx)
	}

	fn count_atoms(&self, range: Range<CharIdx>) -> usize {
		if self.atoms.is_empty() {
			return 0;
		}
		self.content.slice(range).chars().filter(|&c| c == OBJECT_CHAR).count()
	}
}
