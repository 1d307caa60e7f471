//! Common utilities for editor integration tests.

use plume_document::{EditorState, Point};
use plume_editor::history::register_history;
use plume_editor::{Editor, InitialState, Registrations, SnapshotSource, register_plain_text};

/// Installs a log subscriber once per test binary.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// An editor holding one paragraph of `text` with the selection `anchor..focus`,
/// plain-text handlers and history attached.
pub fn attached(text: &str, anchor: usize, focus: usize) -> (Editor, Registrations) {
	init_tracing();
	let mut state = EditorState::from_text(text);
	state.select(Point::new(0, anchor), Point::new(0, focus));
	let editor = Editor::new();
	let initial = InitialState::Snapshot {
		state: SnapshotSource::State(state),
		ignore_selection: false,
	};
	let plain = register_plain_text(&editor, initial).expect("snapshot installs");
	let history = register_history(&editor, &editor.config().history);
	(editor, Registrations::merge([plain, history]))
}

/// Visible text of the committed document.
pub fn text(editor: &Editor) -> String {
	editor.read(EditorState::text_content)
}
