//! Bootstrapping a freshly attached document.

use std::fmt;

use plume_document::{EditorState, Point, parse_state};
use tracing::{debug, warn};

use crate::update::{HISTORY_MERGE_TAG, UpdateCtx, UpdateOptions};
use crate::{Editor, EditorError};

/// A function run once to populate the document.
pub type Initializer = Box<dyn FnOnce(&UpdateCtx) -> Result<(), EditorError>>;

/// How to bring a new document into its starting state.
#[derive(Default)]
pub enum InitialState {
	/// Leave the document untouched.
	None,
	/// Ensure the root holds at least one paragraph.
	#[default]
	Default,
	/// Install a previously saved snapshot.
	Snapshot {
		/// The snapshot.
		state: SnapshotSource,
		/// Clear the snapshot's selection after installing it.
		ignore_selection: bool,
	},
	/// Run arbitrary setup once.
	Initializer(Initializer),
}

impl InitialState {
	/// A snapshot given as JSON text.
	pub fn json(json: impl Into<String>) -> Self {
		Self::Snapshot {
			state: SnapshotSource::Json(json.into()),
			ignore_selection: false,
		}
	}

	/// A setup function.
	pub fn initializer(f: impl FnOnce(&UpdateCtx) -> Result<(), EditorError> + 'static) -> Self {
		Self::Initializer(Box::new(f))
	}

	/// Sets `ignore_selection` on a snapshot descriptor; other variants are unchanged.
	pub fn ignoring_selection(self) -> Self {
		match self {
			Self::Snapshot { state, .. } => Self::Snapshot {
				state,
				ignore_selection: true,
			},
			other => other,
		}
	}
}

impl fmt::Debug for InitialState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::None => f.write_str("None"),
			Self::Default => f.write_str("Default"),
			Self::Snapshot { state, ignore_selection } => f
				.debug_struct("Snapshot")
				.field("state", state)
				.field("ignore_selection", ignore_selection)
				.finish(),
			Self::Initializer(_) => f.write_str("Initializer(..)"),
		}
	}
}

/// Where a snapshot comes from.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
	/// Serialized JSON text.
	Json(String),
	/// An already-decoded JSON value.
	Value(serde_json::Value),
	/// A parsed state.
	State(EditorState),
}

impl SnapshotSource {
	fn resolve(self) -> Result<EditorState, EditorError> {
		let parsed = match self {
			Self::Json(json) => parse_state(&json),
			Self::Value(value) => serde_json::from_value(value).map_err(Into::into),
			Self::State(state) => return Ok(state),
		};
		parsed.map_err(|error| {
			warn!(%error, "initial snapshot rejected");
			error.into()
		})
	}
}

/// Brings the editor's document into its starting state.
///
/// Runs at most one transaction, tagged [`HISTORY_MERGE_TAG`] so it never
/// becomes an undo step. A snapshot that fails to parse leaves the document
/// unchanged.
pub fn initialize(editor: &Editor, initial: InitialState) -> Result<(), EditorError> {
	let options = UpdateOptions::tagged(HISTORY_MERGE_TAG);
	match initial {
		InitialState::None => {
			debug!("initial state: none");
			Ok(())
		}
		InitialState::Default => {
			debug!("initial state: default");
			let focused = editor.is_focused();
			editor.update(options, |ctx| {
				if !ctx.root_is_empty()? {
					return Ok(());
				}
				let index = ctx.append_paragraph()?;
				if focused || ctx.selection()?.is_some() {
					ctx.select_caret(Point::new(index, 0))?;
				}
				Ok(())
			})
		}
		InitialState::Snapshot { state, ignore_selection } => {
			debug!(ignore_selection, "initial state: snapshot");
			let state = state.resolve()?;
			editor.update(options, |ctx| {
				ctx.set_state(state)?;
				if ignore_selection {
					ctx.clear_selection()?;
				}
				Ok(())
			})
		}
		InitialState::Initializer(init) => {
			debug!("initial state: initializer");
			editor.update(options, init)
		}
	}
}

#[cfg(test)]
mod tests {
	use plume_document::{Block, Selection};
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn none_leaves_document_empty() {
		let editor = Editor::new();
		initialize(&editor, InitialState::None).unwrap();
		assert!(editor.state().root().is_empty());
	}

	#[test]
	fn default_appends_one_block_without_caret_when_unfocused() {
		let editor = Editor::new();
		initialize(&editor, InitialState::Default).unwrap();
		let state = editor.state();
		assert_eq!(state.root().len(), 1);
		assert!(state.selection().is_none());
	}

	#[test]
	fn default_places_caret_when_focused() {
		let editor = Editor::new();
		editor.set_focused(true);
		initialize(&editor, InitialState::Default).unwrap();
		assert_eq!(editor.state().range_selection().map(|r| r.focus), Some(Point::new(0, 0)));
	}

	#[test]
	fn default_is_idempotent_on_populated_root() {
		let editor = Editor::new();
		let populated = EditorState::from_blocks([Block::from_text("keep")]);
		editor.set_state(populated.clone(), UpdateOptions::default()).unwrap();
		initialize(&editor, InitialState::Default).unwrap();
		initialize(&editor, InitialState::Default).unwrap();
		assert_eq!(editor.state(), populated);
	}

	#[test]
	fn snapshot_json_installs_state() {
		let mut saved = EditorState::from_text("saved");
		saved.select_caret(Point::new(0, 5));
		let editor = Editor::new();
		initialize(&editor, InitialState::json(saved.to_json().unwrap())).unwrap();
		assert_eq!(editor.state(), saved);
	}

	#[test]
	fn snapshot_can_drop_selection() {
		let mut saved = EditorState::from_text("saved");
		saved.select_caret(Point::new(0, 1));
		let editor = Editor::new();
		let initial = InitialState::Snapshot {
			state: SnapshotSource::State(saved),
			ignore_selection: true,
		};
		initialize(&editor, initial).unwrap();
		let state = editor.state();
		assert_eq!(state.text_content(), "saved");
		assert_eq!(state.selection(), None::<&Selection>);
	}

	#[test]
	fn snapshot_from_json_value() {
		let value = serde_json::json!({
			"version": 1,
			"root": { "children": [{ "type": "paragraph", "children": [{ "type": "text", "text": "v" }] }] }
		});
		let editor = Editor::new();
		let initial = InitialState::Snapshot {
			state: SnapshotSource::Value(value),
			ignore_selection: false,
		};
		initialize(&editor, initial).unwrap();
		assert_eq!(editor.state().text_content(), "v");
	}

	#[test]
	fn malformed_snapshot_fails_and_leaves_document_empty() {
		let editor = Editor::new();
		let err = initialize(&editor, InitialState::json("{\"version\":")).unwrap_err();
		assert!(matches!(err, EditorError::Deserialization(_)));
		assert!(editor.state().root().is_empty());
	}

	#[test]
	fn initializer_runs_once_in_a_history_merge_transaction() {
		let editor = Editor::new();
		let tags = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
		let seen = tags.clone();
		let _listener = editor.register_update_listener(move |event| {
			seen.borrow_mut().push(event.tags.contains(HISTORY_MERGE_TAG));
		});
		let initial = InitialState::initializer(|ctx| {
			let index = ctx.append_paragraph()?;
			ctx.select_caret(Point::new(index, 0))?;
			ctx.insert_text("hi")?;
			Ok(())
		});
		initialize(&editor, initial).unwrap();
		assert_eq!(editor.state().text_content(), "hi");
		assert_eq!(*tags.borrow(), vec![true]);
	}
}
