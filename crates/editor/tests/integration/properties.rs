//! End-to-end behaviour of an attached editor.

use std::cell::RefCell;
use std::rc::Rc;

use plume_document::{Block, EditorState, Point, parse_state};
use plume_editor::clipboard::{ClipboardData, MIME_PLAIN};
use plume_editor::commands::{
	CONTROLLED_TEXT_INSERTION, COPY, ClipboardIntent, DELETE_CHARACTER, KEY_ENTER, KeyIntent, NativeDefault, PASTE, UNDO,
};
use plume_editor::native::{InputType, NativeEvent, NativeKey, dispatch_native};
use plume_editor::{
	Command, CommandPriority, Disposable, Editor, InitialState, Registrations, UpdateOptions, register_plain_text,
};
use plume_primitives::Modifiers;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{attached, init_tracing, text};

#[test]
fn delete_character_backward_at_end_of_abc() {
	let (editor, _regs) = attached("abc", 3, 3);
	assert!(editor.dispatch(&DELETE_CHARACTER, true).unwrap());
	let state = editor.state();
	assert_eq!(state.text_content(), "ab");
	let range = state.range_selection().unwrap();
	assert!(range.is_collapsed());
	assert_eq!(range.focus, Point::new(0, 2));
}

#[test]
fn insert_hello_into_empty_document() {
	init_tracing();
	let editor = Editor::new();
	editor.set_focused(true);
	let _regs = register_plain_text(&editor, InitialState::Default).unwrap();
	assert!(editor.dispatch(&CONTROLLED_TEXT_INSERTION, "hello".into()).unwrap());
	assert_eq!(text(&editor), "hello");
}

#[test]
fn copy_first_two_chars_of_abc() {
	let (editor, _regs) = attached("abc", 0, 2);
	let intent = ClipboardIntent::default();
	assert!(editor.dispatch(&COPY, intent.clone()).unwrap());
	assert_eq!(intent.transfer.borrow().get(MIME_PLAIN), Some("ab"));
}

#[test]
fn unregistered_command_is_unhandled_and_inert() {
	const UNKNOWN: Command<u8> = Command::new("unknown");
	let (editor, _regs) = attached("abc", 1, 1);
	let before = editor.state();
	assert!(!editor.dispatch(&UNKNOWN, 7).unwrap());
	assert_eq!(editor.state(), before);
}

#[test]
fn enter_inside_abcd_splits_into_two_segments() {
	let (editor, _regs) = attached("abcd", 2, 2);
	let native = NativeDefault::new();
	assert!(editor.dispatch(&KEY_ENTER, KeyIntent::native(Modifiers::NONE, native.clone())).unwrap());
	assert!(native.is_prevented());

	let state = editor.state();
	assert_eq!(state.root().len(), 1);
	let content: String = state.root().children()[0].content().chars().collect();
	let segments: Vec<&str> = content.split('\n').collect();
	assert_eq!(segments, vec!["ab", "cd"]);
}

#[test]
fn default_bootstrap_yields_one_block_and_is_idempotent() {
	init_tracing();
	let editor = Editor::new();
	let first = register_plain_text(&editor, InitialState::Default).unwrap();
	assert_eq!(editor.state().root().len(), 1);
	first.dispose_all();

	let _second = register_plain_text(&editor, InitialState::Default).unwrap();
	assert_eq!(editor.state().root().len(), 1);

	let populated = Editor::new();
	let state = EditorState::from_blocks([Block::from_text("a"), Block::from_text("b")]);
	populated.set_state(state.clone(), UpdateOptions::default()).unwrap();
	let _regs = register_plain_text(&populated, InitialState::Default).unwrap();
	assert_eq!(populated.state(), state);
}

#[test]
fn native_typing_session_with_undo() {
	let (editor, _regs) = attached("", 0, 0);
	for c in ["h", "i"] {
		dispatch_native(&editor, NativeEvent::input(InputType::InsertText, Some(c))).unwrap();
	}
	dispatch_native(&editor, NativeEvent::key(NativeKey::Enter, Modifiers::NONE)).unwrap();
	let transfer = Rc::new(RefCell::new(ClipboardData::plain("x\ny")));
	let outcome = dispatch_native(&editor, NativeEvent::Paste { transfer }).unwrap();
	assert!(outcome.default_prevented);
	assert_eq!(text(&editor), "hi\nx\ny");

	assert!(editor.dispatch(&UNDO, ()).unwrap());
	assert_eq!(text(&editor), "hi\n");
}

#[test]
fn host_handler_can_preempt_paste() {
	let (editor, _regs) = attached("abc", 3, 3);
	let _host = editor.register_command(&PASTE, CommandPriority::High, |intent: &ClipboardIntent, _| {
		intent.native.prevent();
		Ok(true)
	});
	let intent = ClipboardIntent::new(ClipboardData::plain("zzz"));
	assert!(editor.dispatch(&PASTE, intent).unwrap());
	assert_eq!(text(&editor), "abc");
}

#[test]
fn teardown_removes_every_handler() {
	let (editor, regs) = attached("abc", 3, 3);
	assert!(editor.total_handler_count() > 0);
	regs.dispose_all();
	regs.dispose_all();
	assert_eq!(editor.total_handler_count(), 0);
	assert!(!editor.dispatch(&DELETE_CHARACTER, true).unwrap());
	assert_eq!(text(&editor), "abc");
}

#[derive(Debug, Clone)]
enum Step {
	Register(u8),
	Dispose(usize),
}

proptest! {
	#[test]
	fn aggregate_teardown_always_empties_the_bus(steps in prop::collection::vec(
		prop_oneof![(0u8..4).prop_map(Step::Register), (0usize..8).prop_map(Step::Dispose)],
		0..24,
	), repeats in 1usize..4) {
		const TARGET: Command<()> = Command::new("target");
		let editor = Editor::new();
		let mut handles = Vec::new();
		for step in steps {
			match step {
				Step::Register(p) => {
					let priority = [CommandPriority::Editor, CommandPriority::Low, CommandPriority::High, CommandPriority::Critical][p as usize];
					handles.push(Rc::new(editor.register_command(&TARGET, priority, |_, _| Ok(false))));
				}
				Step::Dispose(i) => {
					if let Some(handle) = handles.get(i) {
						handle.dispose();
					}
				}
			}
		}
		let all = Registrations::merge(handles.iter().cloned().map(SharedHandle));
		for _ in 0..repeats {
			all.dispose_all();
		}
		prop_assert_eq!(editor.total_handler_count(), 0);
	}

	#[test]
	fn snapshot_json_round_trips_after_edits(inserts in prop::collection::vec("[a-z\n ]{0,5}", 0..6)) {
		let (editor, _regs) = attached("", 0, 0);
		for chunk in inserts {
			editor.dispatch(&CONTROLLED_TEXT_INSERTION, chunk.into()).unwrap();
		}
		let state = editor.state();
		prop_assert_eq!(parse_state(&state.to_json().unwrap()).unwrap(), state);
	}
}

/// Lets shared handles join an aggregate.
struct SharedHandle<D>(Rc<D>);

impl<D: Disposable> Disposable for SharedHandle<D> {
	fn dispose(&self) {
		self.0.dispose();
	}

	fn is_disposed(&self) -> bool {
		self.0.is_disposed()
	}
}
