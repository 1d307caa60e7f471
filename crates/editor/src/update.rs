//! Update transactions.
//!
//! [`crate::Editor::update`] runs a closure against a private working copy of the
//! committed [`EditorState`]. The closure reaches the document only through the
//! [`UpdateCtx`] it is handed; once the transaction ends, any clone of that
//! context fails with [`EditorError::IllegalMutationContext`].

use std::collections::BTreeSet;
use std::fmt;

use plume_document::{AtomicNode, Block, EditorState, Point, Selection};

use crate::{Editor, EditorError};

/// Marks an update that must not become its own undo step.
pub const HISTORY_MERGE_TAG: &str = "history-merge";
/// Marks an update produced by undo/redo itself.
pub const HISTORIC_TAG: &str = "historic";
/// Marks an update produced by a paste.
pub const PASTE_TAG: &str = "paste";

/// Free-form tags attached to a transaction.
///
/// The core never interprets tags; it only hands them to listeners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
	/// An empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a tag.
	pub fn insert(&mut self, tag: impl Into<String>) -> bool {
		self.0.insert(tag.into())
	}

	/// Returns true if `tag` is present.
	pub fn contains(&self, tag: &str) -> bool {
		self.0.contains(tag)
	}

	/// Returns true if there are no tags.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Tags in lexical order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Adds every tag of `other`.
	pub fn merge(&mut self, other: TagSet) {
		self.0.extend(other.0);
	}
}

impl<S: Into<String>> FromIterator<S> for TagSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl fmt::Display for TagSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, tag) in self.iter().enumerate() {
			if i > 0 {
				f.write_str(",")?;
			}
			f.write_str(tag)?;
		}
		Ok(())
	}
}

/// Options for [`crate::Editor::update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
	/// Tags threaded through to update listeners.
	pub tags: TagSet,
}

impl UpdateOptions {
	/// Options carrying a single tag.
	pub fn tagged(tag: impl Into<String>) -> Self {
		Self::default().with_tag(tag)
	}

	/// Adds a tag.
	pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
		self.tags.insert(tag);
		self
	}
}

/// A committed transaction, as seen by update listeners.
#[derive(Debug, Clone)]
pub struct UpdateEvent {
	/// The newly committed snapshot.
	pub state: EditorState,
	/// The snapshot it replaced.
	pub previous: EditorState,
	/// Tags of the transaction.
	pub tags: TagSet,
}

impl UpdateEvent {
	/// Returns true if only the selection changed.
	pub fn is_selection_only(&self) -> bool {
		self.state.root() == self.previous.root()
	}
}

/// Transaction-scoped access to the document.
///
/// Cloning is allowed, but a context is only valid while its transaction runs.
#[derive(Clone)]
pub struct UpdateCtx {
	editor: Editor,
	txn: u64,
}

impl UpdateCtx {
	pub(crate) fn new(editor: Editor, txn: u64) -> Self {
		Self { editor, txn }
	}

	/// The editor running this transaction.
	pub fn editor(&self) -> &Editor {
		&self.editor
	}

	/// Reads the working copy.
	pub fn read<R>(&self, f: impl FnOnce(&EditorState) -> R) -> Result<R, EditorError> {
		self.editor.with_pending_ref(self.txn, f)
	}

	/// Mutates the working copy.
	pub fn mutate<R>(&self, f: impl FnOnce(&mut EditorState) -> R) -> Result<R, EditorError> {
		self.editor.with_pending(self.txn, f)
	}

	/// A copy of the current selection.
	pub fn selection(&self) -> Result<Option<Selection>, EditorError> {
		self.read(|state| state.selection().copied())
	}

	/// Returns true if the selection is a range selection.
	pub fn has_range_selection(&self) -> Result<bool, EditorError> {
		self.read(EditorState::is_range_selection)
	}

	/// Visible text of the whole document.
	pub fn text_content(&self) -> Result<String, EditorError> {
		self.read(EditorState::text_content)
	}

	/// Visible text covered by the range selection.
	pub fn selected_text(&self) -> Result<Option<String>, EditorError> {
		self.read(EditorState::selected_text)
	}

	/// Returns true if the root has no children.
	pub fn root_is_empty(&self) -> Result<bool, EditorError> {
		self.read(|state| state.root().is_empty())
	}

	/// Appends an empty paragraph, returning its index.
	pub fn append_paragraph(&self) -> Result<usize, EditorError> {
		self.mutate(|state| state.append_block(Block::new()))
	}

	/// Replaces the whole working copy.
	pub fn set_state(&self, next: EditorState) -> Result<(), EditorError> {
		self.mutate(|state| *state = next)
	}

	/// Replaces the selection.
	pub fn set_selection(&self, selection: Option<Selection>) -> Result<(), EditorError> {
		self.mutate(|state| state.set_selection(selection))
	}

	/// Places a caret.
	pub fn select_caret(&self, point: Point) -> Result<(), EditorError> {
		self.mutate(|state| state.select_caret(point))
	}

	/// Removes the selection.
	pub fn clear_selection(&self) -> Result<(), EditorError> {
		self.mutate(EditorState::clear_selection)
	}

	/// Selects the whole document.
	pub fn select_all(&self) -> Result<bool, EditorError> {
		self.mutate(EditorState::select_all)
	}

	/// See [`EditorState::delete_character`].
	pub fn delete_character(&self, backward: bool) -> Result<bool, EditorError> {
		self.mutate(|state| state.delete_character(backward))
	}

	/// See [`EditorState::delete_word`].
	pub fn delete_word(&self, backward: bool) -> Result<bool, EditorError> {
		self.mutate(|state| state.delete_word(backward))
	}

	/// See [`EditorState::delete_line`].
	pub fn delete_line(&self, backward: bool) -> Result<bool, EditorError> {
		self.mutate(|state| state.delete_line(backward))
	}

	/// See [`EditorState::insert_text`].
	pub fn insert_text(&self, text: &str) -> Result<bool, EditorError> {
		self.mutate(|state| state.insert_text(text))
	}

	/// See [`EditorState::remove_text`].
	pub fn remove_text(&self) -> Result<bool, EditorError> {
		self.mutate(EditorState::remove_text)
	}

	/// See [`EditorState::insert_line_break`].
	pub fn insert_line_break(&self, select_start: bool) -> Result<bool, EditorError> {
		self.mutate(|state| state.insert_line_break(select_start))
	}

	/// See [`EditorState::insert_atom`].
	pub fn insert_atomic(&self, atom: AtomicNode) -> Result<bool, EditorError> {
		self.mutate(|state| state.insert_atom(atom))
	}

	/// See [`EditorState::move_character`].
	pub fn move_character(&self, extend: bool, backward: bool) -> Result<bool, EditorError> {
		self.mutate(|state| state.move_character(extend, backward))
	}

	/// See [`EditorState::should_override_default_character_selection`].
	pub fn should_override_default_character_selection(&self, backward: bool) -> Result<bool, EditorError> {
		self.read(|state| state.should_override_default_character_selection(backward))
	}
}

impl fmt::Debug for UpdateCtx {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UpdateCtx").field("txn", &self.txn).finish()
	}
}
