use std::cell::RefCell;
use std::rc::Rc;

use plume_document::{AtomicNode, Block, NodeSelection, Point};
use plume_primitives::Modifiers;
use pretty_assertions::assert_eq;

use super::*;
use crate::clipboard::{ClipboardData, MIME_HTML, MIME_PLAIN, fragment_mime};
use crate::commands::NativeDefault;
use crate::initial_state::SnapshotSource;
use crate::update::TagSet;

fn attach(state: EditorState) -> (Editor, Registrations) {
	let editor = Editor::new();
	let initial = InitialState::Snapshot {
		state: SnapshotSource::State(state),
		ignore_selection: false,
	};
	let regs = register_plain_text(&editor, initial).unwrap();
	(editor, regs)
}

fn with_selection(text: &str, anchor: usize, focus: usize) -> (Editor, Registrations) {
	let mut state = EditorState::from_text(text);
	state.select(Point::new(0, anchor), Point::new(0, focus));
	attach(state)
}

fn text(editor: &Editor) -> String {
	editor.read(EditorState::text_content)
}

fn caret(editor: &Editor) -> Option<Point> {
	editor.state().range_selection().filter(|r| r.is_collapsed()).map(|r| r.focus)
}

fn key(native: &NativeDefault) -> KeyIntent {
	KeyIntent::native(Modifiers::NONE, native.clone())
}

fn with_atom() -> EditorState {
	let mut block = Block::from_text("ab");
	block.insert_atom(1, AtomicNode::new("mention"));
	EditorState::from_blocks([block])
}

#[test]
fn registers_one_handler_per_command() {
	let (editor, regs) = with_selection("", 0, 0);
	assert_eq!(regs.len(), editor.total_handler_count());
	assert!(editor.has_commands(&KEY_ENTER));
	regs.dispose_all();
	assert_eq!(editor.total_handler_count(), 0);
}

#[test]
fn delete_character_backward_after_last_char() {
	let (editor, _regs) = with_selection("abc", 3, 3);
	assert!(editor.dispatch(&DELETE_CHARACTER, true).unwrap());
	assert_eq!(text(&editor), "ab");
	assert_eq!(caret(&editor), Some(Point::new(0, 2)));
}

#[test]
fn delete_word_and_line() {
	let (editor, _regs) = with_selection("one two", 7, 7);
	assert!(editor.dispatch(&DELETE_WORD, true).unwrap());
	assert_eq!(text(&editor), "one ");
	assert!(editor.dispatch(&DELETE_LINE, true).unwrap());
	assert_eq!(text(&editor), "");
}

#[test]
fn insert_text_into_empty_document() {
	let editor = Editor::new();
	editor.set_focused(true);
	let _regs = register_plain_text(&editor, InitialState::Default).unwrap();
	assert!(editor.dispatch(&CONTROLLED_TEXT_INSERTION, "hello".into()).unwrap());
	assert_eq!(text(&editor), "hello");
}

#[test]
fn insert_transfer_splits_lines() {
	let (editor, _regs) = with_selection("", 0, 0);
	let intent = InsertTextIntent::Transfer(ClipboardData::plain("a\r\nb"));
	assert!(editor.dispatch(&CONTROLLED_TEXT_INSERTION, intent).unwrap());
	assert_eq!(text(&editor), "a\nb");
	assert_eq!(editor.state().root().len(), 1);
}

#[test]
fn remove_text_deletes_selection() {
	let (editor, _regs) = with_selection("hello", 1, 4);
	assert!(editor.dispatch(&REMOVE_TEXT, ()).unwrap());
	assert_eq!(text(&editor), "ho");
}

#[test]
fn line_break_select_start_keeps_caret_before_break() {
	let (editor, _regs) = with_selection("abcd", 2, 2);
	assert!(editor.dispatch(&INSERT_LINE_BREAK, true).unwrap());
	assert_eq!(text(&editor), "ab\ncd");
	assert_eq!(caret(&editor), Some(Point::new(0, 2)));
}

#[test]
fn paragraph_is_a_line_break() {
	let (editor, _regs) = with_selection("abcd", 2, 2);
	assert!(editor.dispatch(&INSERT_PARAGRAPH, ()).unwrap());
	assert_eq!(text(&editor), "ab\ncd");
	assert_eq!(editor.state().root().len(), 1);
	assert_eq!(caret(&editor), Some(Point::new(0, 3)));
}

#[test]
fn enter_splits_line_and_prevents_default() {
	let (editor, _regs) = with_selection("abcd", 2, 2);
	let native = NativeDefault::new();
	assert!(editor.dispatch(&KEY_ENTER, key(&native)).unwrap());
	assert!(native.is_prevented());
	assert_eq!(text(&editor), "ab\ncd");
	let state = editor.state();
	let block = &state.root().children()[0];
	assert_eq!(block.text_in(0..2), "ab");
	assert_eq!(block.text_in(3..5), "cd");
}

#[test]
fn synthetic_enter_still_inserts_break() {
	let (editor, _regs) = with_selection("ab", 2, 2);
	assert!(editor.dispatch(&KEY_ENTER, KeyIntent::synthetic(Modifiers::NONE)).unwrap());
	assert_eq!(text(&editor), "ab\n");
}

#[test]
fn backspace_and_delete_redispatch() {
	let (editor, _regs) = with_selection("abc", 1, 1);
	let native = NativeDefault::new();
	assert!(editor.dispatch(&KEY_BACKSPACE, key(&native)).unwrap());
	assert!(native.is_prevented());
	assert_eq!(text(&editor), "bc");

	let native = NativeDefault::new();
	assert!(editor.dispatch(&KEY_DELETE, key(&native)).unwrap());
	assert!(native.is_prevented());
	assert_eq!(text(&editor), "c");
}

#[test]
fn backspace_goes_through_host_override() {
	let (editor, _regs) = with_selection("abc", 3, 3);
	let _host = editor.register_command(&DELETE_CHARACTER, CommandPriority::High, |_, _| Ok(true));
	assert!(editor.dispatch(&KEY_BACKSPACE, KeyIntent::default()).unwrap());
	assert_eq!(text(&editor), "abc");
}

#[test]
fn arrows_step_over_atoms_only() {
	let mut state = with_atom();
	state.select_caret(Point::new(0, 1));
	let (editor, _regs) = attach(state);

	let native = NativeDefault::new();
	assert!(!editor.dispatch(&KEY_ARROW_LEFT, key(&native)).unwrap());
	assert!(!native.is_prevented());

	let native = NativeDefault::new();
	assert!(editor.dispatch(&KEY_ARROW_RIGHT, key(&native)).unwrap());
	assert!(native.is_prevented());
	assert_eq!(caret(&editor), Some(Point::new(0, 2)));
}

#[test]
fn shift_arrow_extends_over_atom() {
	let mut state = with_atom();
	state.select_caret(Point::new(0, 2));
	let (editor, _regs) = attach(state);
	let intent = KeyIntent::native(Modifiers::SHIFT, NativeDefault::new());
	assert!(editor.dispatch(&KEY_ARROW_LEFT, intent).unwrap());
	let range = editor.state().range_selection().unwrap();
	assert_eq!((range.anchor, range.focus), (Point::new(0, 2), Point::new(0, 1)));
}

#[test]
fn copy_writes_plain_html_and_fragment() {
	let (editor, _regs) = with_selection("abc", 0, 2);
	let intent = ClipboardIntent::default();
	assert!(editor.dispatch(&COPY, intent.clone()).unwrap());
	assert!(intent.native.is_prevented());
	let data = intent.transfer.borrow();
	assert_eq!(data.get(MIME_PLAIN), Some("ab"));
	assert_eq!(data.get(MIME_HTML), Some("<p>ab</p>"));
	assert!(data.get(&fragment_mime("plume")).is_some());
	assert_eq!(text(&editor), "abc");
}

#[test]
fn cut_copies_then_removes() {
	let (editor, _regs) = with_selection("abc", 0, 2);
	let intent = ClipboardIntent::default();
	assert!(editor.dispatch(&CUT, intent.clone()).unwrap());
	assert_eq!(intent.transfer.borrow().get(MIME_PLAIN), Some("ab"));
	assert_eq!(text(&editor), "c");
}

#[test]
fn paste_inserts_lines_with_paste_tag() {
	let (editor, _regs) = with_selection("[]", 1, 1);
	let tags = Rc::new(RefCell::new(TagSet::new()));
	let seen = tags.clone();
	let _listener = editor.register_update_listener(move |event| *seen.borrow_mut() = event.tags.clone());

	let intent = ClipboardIntent::new(ClipboardData::plain("x\ny").with(MIME_HTML, "<b>ignored</b>"));
	assert!(editor.dispatch(&PASTE, intent.clone()).unwrap());
	assert!(intent.native.is_prevented());
	assert_eq!(text(&editor), "[x\ny]");
	assert!(tags.borrow().contains(PASTE_TAG));
}

#[test]
fn oversized_paste_is_rejected() {
	let mut config = crate::EditorConfig::default();
	config.clipboard.max_paste_bytes = 3;
	let editor = Editor::with_config(config);
	let mut state = EditorState::from_text("");
	state.select_caret(Point::default());
	let initial = InitialState::Snapshot {
		state: SnapshotSource::State(state),
		ignore_selection: false,
	};
	let _regs = register_plain_text(&editor, initial).unwrap();

	let intent = ClipboardIntent::new(ClipboardData::plain("toolong"));
	assert!(editor.dispatch(&PASTE, intent.clone()).unwrap());
	assert!(intent.native.is_prevented());
	assert_eq!(text(&editor), "");
}

#[test]
fn drag_and_drop_are_suppressed_without_mutation() {
	let (editor, _regs) = with_selection("abc", 0, 3);
	for command in [DRAGSTART, DROP] {
		let intent = DragIntent::default();
		assert!(editor.dispatch(&command, intent.clone()).unwrap());
		assert!(intent.native.is_prevented());
	}
	assert_eq!(text(&editor), "abc");
}

#[test]
fn select_all_selects_every_block() {
	let (editor, _regs) = attach(EditorState::from_blocks([Block::from_text("a"), Block::from_text("b")]));
	assert!(editor.dispatch(&SELECT_ALL, ()).unwrap());
	assert_eq!(editor.read(EditorState::selected_text).as_deref(), Some("a\n\nb"));
}

#[test]
fn every_handler_declines_without_range_selection() {
	let mut state = with_atom();
	state.set_selection(Some(NodeSelection { block: 0, offset: 1 }.into()));
	let (editor, _regs) = attach(state);
	let before = editor.state();
	let commits = Rc::new(RefCell::new(0));
	let count = commits.clone();
	let _listener = editor.register_update_listener(move |_| *count.borrow_mut() += 1);

	assert!(!editor.dispatch(&DELETE_CHARACTER, true).unwrap());
	assert!(!editor.dispatch(&DELETE_WORD, false).unwrap());
	assert!(!editor.dispatch(&DELETE_LINE, true).unwrap());
	assert!(!editor.dispatch(&CONTROLLED_TEXT_INSERTION, "x".into()).unwrap());
	assert!(!editor.dispatch(&REMOVE_TEXT, ()).unwrap());
	assert!(!editor.dispatch(&INSERT_LINE_BREAK, false).unwrap());
	assert!(!editor.dispatch(&INSERT_PARAGRAPH, ()).unwrap());
	for command in [KEY_ARROW_LEFT, KEY_ARROW_RIGHT, KEY_BACKSPACE, KEY_DELETE, KEY_ENTER] {
		let native = NativeDefault::new();
		assert!(!editor.dispatch(&command, key(&native)).unwrap(), "{command:?}");
		assert!(!native.is_prevented());
	}
	for command in [COPY, CUT, PASTE] {
		let intent = ClipboardIntent::new(ClipboardData::plain("x"));
		assert!(!editor.dispatch(&command, intent.clone()).unwrap(), "{command:?}");
		assert!(!intent.native.is_prevented());
	}
	for command in [DRAGSTART, DROP] {
		assert!(!editor.dispatch(&command, DragIntent::default()).unwrap());
	}

	assert_eq!(editor.state(), before);
	assert_eq!(*commits.borrow(), 0);
}
