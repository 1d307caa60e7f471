//! Platform event normalization.
//!
//! Hosts translate their own event objects into [`NativeEvent`] and hand them to
//! [`dispatch_native`], which picks the command, builds a plain payload and
//! reports whether the platform's default behaviour must be suppressed.
//! Handlers never see platform vocabulary.
//!
//! | event | command |
//! |---|---|
//! | `ArrowLeft` / `ArrowRight` | `KEY_ARROW_LEFT` / `KEY_ARROW_RIGHT` |
//! | `Backspace` / `Delete` | `KEY_BACKSPACE` / `KEY_DELETE` |
//! | Ctrl or Alt + `Backspace` / `Delete` | `DELETE_WORD` |
//! | Meta + `Backspace` / `Delete` | `DELETE_LINE` |
//! | `Enter` | `KEY_ENTER` |
//! | Ctrl + `z`, Ctrl + Shift + `z`, Ctrl + `y` | `UNDO`, `REDO`, `REDO` |
//! | Ctrl + `a` | `SELECT_ALL` |
//! | `beforeinput` | see [`InputType`] |

use std::str::FromStr;

use plume_primitives::Modifiers;
use tracing::trace;

use crate::clipboard::ClipboardData;
use crate::command::Command;
use crate::commands::{
	CONTROLLED_TEXT_INSERTION, COPY, CUT, ClipboardIntent, DELETE_CHARACTER, DELETE_LINE, DELETE_WORD, DRAGSTART, DROP,
	DragIntent, INSERT_LINE_BREAK, INSERT_PARAGRAPH, InsertTextIntent, KEY_ARROW_LEFT, KEY_ARROW_RIGHT, KEY_BACKSPACE,
	KEY_DELETE, KEY_ENTER, KeyIntent, NativeDefault, PASTE, REDO, REMOVE_TEXT, SELECT_ALL, SharedClipboard, UNDO,
};
use crate::{Editor, EditorError};


/// A key, as named by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeKey {
	ArrowLeft,
	ArrowRight,
	ArrowUp,
	ArrowDown,
	Backspace,
	Delete,
	Enter,
	/// A printable character.
	Char(char),
	/// Any other named key.
	Named(String),
}

impl FromStr for NativeKey {
	type Err = std::convert::Infallible;

	/// Parses a DOM `KeyboardEvent.key` value.
	fn from_str(key: &str) -> Result<Self, Self::Err> {
		let mut chars = key.chars();
		Ok(match (key, chars.next(), chars.next()) {
			("ArrowLeft", ..) => Self::ArrowLeft,
			("ArrowRight", ..) => Self::ArrowRight,
			("ArrowUp", ..) => Self::ArrowUp,
			("ArrowDown", ..) => Self::ArrowDown,
			("Backspace", ..) => Self::Backspace,
			("Delete", ..) => Self::Delete,
			("Enter", ..) => Self::Enter,
			(_, Some(c), None) => Self::Char(c),
			_ => Self::Named(key.to_string()),
		})
	}
}

/// The `inputType` of a `beforeinput` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
	InsertText,
	InsertReplacementText,
	InsertFromPaste,
	InsertFromDrop,
	InsertFromYank,
	InsertLineBreak,
	InsertParagraph,
	DeleteContentBackward,
	DeleteContentForward,
	DeleteWordBackward,
	DeleteWordForward,
	DeleteSoftLineBackward,
	DeleteSoftLineForward,
	DeleteHardLineBackward,
	DeleteHardLineForward,
	DeleteByCut,
	DeleteByDrag,
	HistoryUndo,
	HistoryRedo,
	/// Composition and formatting inputs, left to the platform.
	Other(String),
}

impl FromStr for InputType {
	type Err = std::convert::Infallible;

	fn from_str(name: &str) -> Result<Self, Self::Err> {
		Ok(match name {
			"insertText" => Self::InsertText,
			"insertReplacementText" => Self::InsertReplacementText,
			"insertFromPaste" => Self::InsertFromPaste,
			"insertFromDrop" => Self::InsertFromDrop,
			"insertFromYank" => Self::InsertFromYank,
			"insertLineBreak" => Self::InsertLineBreak,
			"insertParagraph" => Self::InsertParagraph,
			"deleteContentBackward" => Self::DeleteContentBackward,
			"deleteContentForward" => Self::DeleteContentForward,
			"deleteWordBackward" => Self::DeleteWordBackward,
			"deleteWordForward" => Self::DeleteWordForward,
			"deleteSoftLineBackward" => Self::DeleteSoftLineBackward,
			"deleteSoftLineForward" => Self::DeleteSoftLineForward,
			"deleteHardLineBackward" => Self::DeleteHardLineBackward,
			"deleteHardLineForward" => Self::DeleteHardLineForward,
			"deleteByCut" => Self::DeleteByCut,
			"deleteByDrag" => Self::DeleteByDrag,
			"historyUndo" => Self::HistoryUndo,
			"historyRedo" => Self::HistoryRedo,
			other => Self::Other(other.to_string()),
		})
	}
}

/// A platform event.
#[derive(Debug, Clone)]
pub enum NativeEvent {
	KeyDown {
		key: NativeKey,
		modifiers: Modifiers,
		/// True while an IME composition is active.
		is_composing: bool,
	},
	BeforeInput {
		input_type: InputType,
		/// The event's `data`, if any.
		data: Option<String>,
		/// The event's `dataTransfer`, if any.
		transfer: Option<ClipboardData>,
	},
	Copy {
		transfer: SharedClipboard,
	},
	Cut {
		transfer: SharedClipboard,
	},
	Paste {
		transfer: SharedClipboard,
	},
	DragStart,
	Drop,
	FocusIn,
	FocusOut,
}

impl NativeEvent {
	/// A key press without composition.
	pub fn key(key: NativeKey, modifiers: Modifiers) -> Self {
		Self::KeyDown {
			key,
			modifiers,
			is_composing: false,
		}
	}

	/// A `beforeinput` carrying `data`.
	pub fn input(input_type: InputType, data: Option<&str>) -> Self {
		Self::BeforeInput {
			input_type,
			data: data.map(str::to_string),
			transfer: None,
		}
	}
}

/// Result of [`dispatch_native`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeOutcome {
	/// A handler claimed the command.
	pub handled: bool,
	/// The platform's default action must be suppressed.
	pub default_prevented: bool,
}

/// Normalizes `event` and dispatches the matching command.
///
/// Events with no matching command report an unhandled outcome, leaving the
/// platform to apply its default.
pub fn dispatch_native(editor: &Editor, event: NativeEvent) -> Result<NativeOutcome, EditorError> {
	let native = NativeDefault::new();
	let handled = match event {
		NativeEvent::KeyDown {
			is_composing: true, ..
		} => {
			trace!("key event during composition ignored");
			false
		}
		NativeEvent::KeyDown { key, modifiers, .. } => dispatch_key(editor, &key, modifiers, &native)?,
		NativeEvent::BeforeInput {
			input_type,
			data,
			transfer,
		} => {
			let handled = dispatch_input(editor, input_type, data, transfer)?;
			if handled {
				native.prevent();
			}
			handled
		}
		NativeEvent::Copy { transfer } => dispatch_clipboard(editor, &COPY, transfer, &native)?,
		NativeEvent::Cut { transfer } => dispatch_clipboard(editor, &CUT, transfer, &native)?,
		NativeEvent::Paste { transfer } => dispatch_clipboard(editor, &PASTE, transfer, &native)?,
		NativeEvent::DragStart => editor.dispatch(&DRAGSTART, DragIntent { native: native.clone() })?,
		NativeEvent::Drop => editor.dispatch(&DROP, DragIntent { native: native.clone() })?,
		NativeEvent::FocusIn => {
			editor.set_focused(true);
			false
		}
		NativeEvent::FocusOut => {
			editor.set_focused(false);
			false
		}
	};
	Ok(NativeOutcome {
		handled,
		default_prevented: native.is_prevented(),
	})
}

fn dispatch_key(editor: &Editor, key: &NativeKey, modifiers: Modifiers, native: &NativeDefault) -> Result<bool, EditorError> {
	let intent = KeyIntent::native(modifiers, native.clone());
	match key {
		NativeKey::ArrowLeft => editor.dispatch(&KEY_ARROW_LEFT, intent),
		NativeKey::ArrowRight => editor.dispatch(&KEY_ARROW_RIGHT, intent),
		NativeKey::Backspace | NativeKey::Delete => {
			let backward = *key == NativeKey::Backspace;
			let chord = if modifiers.meta {
				Some(DELETE_LINE)
			} else if modifiers.is_word_chord() {
				Some(DELETE_WORD)
			} else {
				None
			};
			match chord {
				Some(command) => prevent_if_handled(editor.dispatch(&command, backward), native),
				None if backward => editor.dispatch(&KEY_BACKSPACE, intent),
				None => editor.dispatch(&KEY_DELETE, intent),
			}
		}
		NativeKey::Enter => editor.dispatch(&KEY_ENTER, intent),
		NativeKey::Char(c) if modifiers.ctrl || modifiers.meta => {
			let command = match c.to_ascii_lowercase() {
				'z' if modifiers.shift => REDO,
				'z' => UNDO,
				'y' => REDO,
				'a' => SELECT_ALL,
				_ => return Ok(false),
			};
			prevent_if_handled(editor.dispatch(&command, ()), native)
		}
		_ => Ok(false),
	}
}

fn dispatch_input(
	editor: &Editor,
	input_type: InputType,
	data: Option<String>,
	transfer: Option<ClipboardData>,
) -> Result<bool, EditorError> {
	match input_type {
		InputType::InsertText | InputType::InsertReplacementText | InputType::InsertFromPaste | InputType::InsertFromYank => {
			let intent = match (transfer, data) {
				(Some(transfer), _) => InsertTextIntent::Transfer(transfer),
				(None, Some(data)) => InsertTextIntent::Text(data),
				(None, None) => return Ok(false),
			};
			editor.dispatch(&CONTROLLED_TEXT_INSERTION, intent)
		}
		InputType::InsertLineBreak => editor.dispatch(&INSERT_LINE_BREAK, false),
		InputType::InsertParagraph => editor.dispatch(&INSERT_PARAGRAPH, ()),
		InputType::DeleteContentBackward => editor.dispatch(&DELETE_CHARACTER, true),
		InputType::DeleteContentForward => editor.dispatch(&DELETE_CHARACTER, false),
		InputType::DeleteWordBackward => editor.dispatch(&DELETE_WORD, true),
		InputType::DeleteWordForward => editor.dispatch(&DELETE_WORD, false),
		InputType::DeleteSoftLineBackward | InputType::DeleteHardLineBackward => editor.dispatch(&DELETE_LINE, true),
		InputType::DeleteSoftLineForward | InputType::DeleteHardLineForward => editor.dispatch(&DELETE_LINE, false),
		InputType::DeleteByCut => editor.dispatch(&REMOVE_TEXT, ()),
		InputType::HistoryUndo => editor.dispatch(&UNDO, ()),
		InputType::HistoryRedo => editor.dispatch(&REDO, ()),
		// Drag-and-drop content transfer is not supported.
		InputType::InsertFromDrop | InputType::DeleteByDrag | InputType::Other(_) => Ok(false),
	}
}

fn dispatch_clipboard(
	editor: &Editor,
	command: &Command<ClipboardIntent>,
	transfer: SharedClipboard,
	native: &NativeDefault,
) -> Result<bool, EditorError> {
	editor.dispatch(
		command,
		ClipboardIntent {
			transfer,
			native: native.clone(),
		},
	)
}

fn prevent_if_handled(result: Result<bool, EditorError>, native: &NativeDefault) -> Result<bool, EditorError> {
	let handled = result?;
	if handled {
		native.prevent();
	}
	Ok(handled)
}
