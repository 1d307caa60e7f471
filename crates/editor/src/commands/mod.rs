//! Built-in commands.
//!
//! Payloads are plain data: platform events are normalized by [`crate::native`]
//! before they get here. Intents that came from a real platform event carry a
//! [`NativeDefault`] so handlers can suppress the platform's own behaviour.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use plume_primitives::Modifiers;

use crate::clipboard::ClipboardData;
use crate::command::Command;

/// Delete one character; payload is `backward`.
pub const DELETE_CHARACTER: Command<bool> = Command::new("delete-character");
/// Delete to the previous or next word boundary; payload is `backward`.
pub const DELETE_WORD: Command<bool> = Command::new("delete-word");
/// Delete to the start or end of the line; payload is `backward`.
pub const DELETE_LINE: Command<bool> = Command::new("delete-line");
/// Insert text from a string or a data transfer.
pub const CONTROLLED_TEXT_INSERTION: Command<InsertTextIntent> = Command::new("controlled-text-insertion");
/// Delete the selected span.
pub const REMOVE_TEXT: Command<()> = Command::new("remove-text");
/// Insert a line break; payload is `select_start`.
pub const INSERT_LINE_BREAK: Command<bool> = Command::new("insert-line-break");
/// Insert a paragraph; in plain text this is a line break.
pub const INSERT_PARAGRAPH: Command<()> = Command::new("insert-paragraph");
/// Select the whole document.
pub const SELECT_ALL: Command<()> = Command::new("select-all");
/// Undo the last step.
pub const UNDO: Command<()> = Command::new("undo");
/// Redo the last undone step.
pub const REDO: Command<()> = Command::new("redo");

pub const KEY_ARROW_LEFT: Command<KeyIntent> = Command::new("key-arrow-left");
pub const KEY_ARROW_RIGHT: Command<KeyIntent> = Command::new("key-arrow-right");
pub const KEY_BACKSPACE: Command<KeyIntent> = Command::new("key-backspace");
pub const KEY_DELETE: Command<KeyIntent> = Command::new("key-delete");
pub const KEY_ENTER: Command<KeyIntent> = Command::new("key-enter");

pub const COPY: Command<ClipboardIntent> = Command::new("copy");
pub const CUT: Command<ClipboardIntent> = Command::new("cut");
pub const PASTE: Command<ClipboardIntent> = Command::new("paste");

pub const DRAGSTART: Command<DragIntent> = Command::new("dragstart");
pub const DROP: Command<DragIntent> = Command::new("drop");

/// Shared "prevent default" flag of a platform event.
#[derive(Debug, Clone, Default)]
pub struct NativeDefault(Rc<Cell<bool>>);

impl NativeDefault {
	/// A fresh, not yet prevented flag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Suppresses the platform's default action.
	pub fn prevent(&self) {
		self.0.set(true);
	}

	/// Returns true once [`NativeDefault::prevent`] has been called.
	pub fn is_prevented(&self) -> bool {
		self.0.get()
	}
}

/// What to insert for [`CONTROLLED_TEXT_INSERTION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertTextIntent {
	/// Literal text.
	Text(String),
	/// A data transfer to decompose into plain-text lines.
	Transfer(ClipboardData),
}

impl From<&str> for InsertTextIntent {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for InsertTextIntent {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

/// A key press.
#[derive(Debug, Clone, Default)]
pub struct KeyIntent {
	/// Modifiers held.
	pub modifiers: Modifiers,
	/// Present when the key press came from a platform event.
	pub native: Option<NativeDefault>,
}

impl KeyIntent {
	/// A synthetic key press with no platform event behind it.
	pub fn synthetic(modifiers: Modifiers) -> Self {
		Self { modifiers, native: None }
	}

	/// A key press backed by a platform event.
	pub fn native(modifiers: Modifiers, native: NativeDefault) -> Self {
		Self {
			modifiers,
			native: Some(native),
		}
	}

	pub(crate) fn prevent_default(&self) {
		if let Some(native) = &self.native {
			native.prevent();
		}
	}
}

/// Clipboard contents shared between the platform event and the handlers.
pub type SharedClipboard = Rc<RefCell<ClipboardData>>;

/// A copy, cut or paste.
#[derive(Debug, Clone, Default)]
pub struct ClipboardIntent {
	/// The event's data transfer; copy and cut write into it, paste reads it.
	pub transfer: SharedClipboard,
	/// Prevent-default flag of the platform event.
	pub native: NativeDefault,
}

impl ClipboardIntent {
	/// Wraps existing clipboard data.
	pub fn new(data: ClipboardData) -> Self {
		Self {
			transfer: Rc::new(RefCell::new(data)),
			native: NativeDefault::new(),
		}
	}
}

/// A drag start or drop.
#[derive(Debug, Clone, Default)]
pub struct DragIntent {
	/// Prevent-default flag of the platform event.
	pub native: NativeDefault,
}
