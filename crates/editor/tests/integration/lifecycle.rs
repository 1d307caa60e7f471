//! Attach, observe and detach.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use plume_document::{EditorState, Point};
use plume_editor::clipboard::{ClipboardData, fragment_mime};
use plume_editor::commands::{COPY, ClipboardIntent, PASTE};
use plume_editor::{
	Editor, EditorConfig, EditorError, HISTORY_MERGE_TAG, InitialState, UpdateOptions, register_plain_text,
};

use crate::common::{attached, init_tracing, text};

#[test]
fn malformed_snapshot_fails_attach_and_registers_nothing() {
	init_tracing();
	let editor = Editor::new();
	let err = register_plain_text(&editor, InitialState::json("[not a snapshot")).unwrap_err();
	assert!(matches!(err, EditorError::Deserialization(_)));
	assert!(editor.state().root().is_empty());
	assert_eq!(editor.total_handler_count(), 0);
}

#[test]
fn snapshot_attach_is_a_history_merge_commit() {
	init_tracing();
	let mut saved = EditorState::from_text("restored");
	saved.select_caret(Point::new(0, 8));
	let editor = Editor::new();
	let tags = Rc::new(RefCell::new(Vec::new()));
	let seen = tags.clone();
	let _listener = editor.register_update_listener(move |event| {
		seen.borrow_mut().push(event.tags.contains(HISTORY_MERGE_TAG));
	});
	let _regs = register_plain_text(&editor, InitialState::json(saved.to_json().unwrap()).ignoring_selection()).unwrap();
	assert_eq!(*tags.borrow(), vec![true]);
	assert_eq!(text(&editor), "restored");
	assert!(editor.state().selection().is_none());
}

#[test]
fn subscriber_sees_attach_and_every_commit() {
	let (editor, _regs) = attached("a", 1, 1);
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = seen.clone();
	let _sub = editor.subscribe(move |state| sink.borrow_mut().push(state.text_content()));
	editor.update(UpdateOptions::default(), |ctx| ctx.insert_text("b")).unwrap();
	editor.update(UpdateOptions::default(), |ctx| ctx.text_content()).unwrap();
	assert_eq!(*seen.borrow(), vec!["a".to_string(), "ab".to_string()]);
}

#[test]
fn context_cannot_outlive_its_transaction() {
	let (editor, _regs) = attached("a", 1, 1);
	let ctx = editor.update(UpdateOptions::default(), |ctx| Ok(ctx.clone())).unwrap();
	assert!(matches!(ctx.insert_text("x"), Err(EditorError::IllegalMutationContext)));
	assert_eq!(text(&editor), "a");
}

#[test]
fn config_from_file_drives_clipboard() {
	init_tracing();
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "namespace = \"notes\"\n[clipboard]\nhtml = false\nmax_paste_bytes = 4").unwrap();
	let config = EditorConfig::load(file.path()).unwrap();

	let editor = Editor::with_config(config);
	let mut state = EditorState::from_text("abc");
	state.select_all();
	editor.set_state(state, UpdateOptions::default()).unwrap();
	let _regs = register_plain_text(&editor, InitialState::None).unwrap();

	let copy = ClipboardIntent::default();
	editor.dispatch(&COPY, copy.clone()).unwrap();
	let data = copy.transfer.borrow();
	assert!(data.get(&fragment_mime("notes")).is_some());
	assert!(data.get("text/html").is_none());

	let paste = ClipboardIntent::new(ClipboardData::plain("too long"));
	assert!(editor.dispatch(&PASTE, paste).unwrap());
	assert_eq!(text(&editor), "abc");
}
