//! Plain-text editing behaviour.
//!
//! [`register_plain_text`] installs one handler per built-in command at
//! [`CommandPriority::Editor`], so hosts can pre-empt any of them. Every handler
//! declines (returns `Ok(false)`, touches nothing) when the selection is not a
//! range selection.

use plume_document::EditorState;
use tracing::{trace, warn};

use crate::clipboard::{deserialize_for_paste, paste_size, serialize_for_copy};
use crate::command::CommandPriority;
use crate::commands::{
	CONTROLLED_TEXT_INSERTION, COPY, CUT, ClipboardIntent, DELETE_CHARACTER, DELETE_LINE, DELETE_WORD, DRAGSTART, DROP,
	DragIntent, INSERT_LINE_BREAK, INSERT_PARAGRAPH, InsertTextIntent, KEY_ARROW_LEFT, KEY_ARROW_RIGHT, KEY_BACKSPACE,
	KEY_DELETE, KEY_ENTER, KeyIntent, PASTE, REMOVE_TEXT, SELECT_ALL,
};
use crate::dispose::Registrations;
use crate::initial_state::{InitialState, initialize};
use crate::update::{PASTE_TAG, UpdateCtx, UpdateOptions};
use crate::{Editor, EditorError};

#[cfg(test)]
mod tests;

const PRIORITY: CommandPriority = CommandPriority::Editor;

/// Initializes the document, then registers the plain-text handlers.
///
/// Returns a single aggregate that removes every handler. If initialization
/// fails nothing is registered.
pub fn register_plain_text(editor: &Editor, initial: InitialState) -> Result<Registrations, EditorError> {
	initialize(editor, initial)?;

	let mut regs = Registrations::new();

	regs.push(editor.register_command(&DELETE_CHARACTER, PRIORITY, |&backward, editor| {
		edit(editor, |ctx| ctx.delete_character(backward))
	}));
	regs.push(editor.register_command(&DELETE_WORD, PRIORITY, |&backward, editor| {
		edit(editor, |ctx| ctx.delete_word(backward))
	}));
	regs.push(editor.register_command(&DELETE_LINE, PRIORITY, |&backward, editor| {
		edit(editor, |ctx| ctx.delete_line(backward))
	}));
	regs.push(editor.register_command(&CONTROLLED_TEXT_INSERTION, PRIORITY, |intent, editor| {
		edit(editor, |ctx| match intent {
			InsertTextIntent::Text(text) => ctx.insert_text(text),
			InsertTextIntent::Transfer(data) => insert_lines(ctx, &deserialize_for_paste(data)),
		})
	}));
	regs.push(editor.register_command(&REMOVE_TEXT, PRIORITY, |_, editor| edit(editor, UpdateCtx::remove_text)));
	regs.push(editor.register_command(&INSERT_LINE_BREAK, PRIORITY, |&select_start, editor| {
		edit(editor, |ctx| ctx.insert_line_break(select_start))
	}));
	regs.push(editor.register_command(&INSERT_PARAGRAPH, PRIORITY, |_, editor| {
		edit(editor, |ctx| ctx.insert_line_break(false))
	}));
	regs.push(editor.register_command(&SELECT_ALL, PRIORITY, |_, editor| {
		editor.update(UpdateOptions::default(), UpdateCtx::select_all)
	}));

	regs.push(editor.register_command(&KEY_ARROW_LEFT, PRIORITY, |intent, editor| arrow(editor, intent, true)));
	regs.push(editor.register_command(&KEY_ARROW_RIGHT, PRIORITY, |intent, editor| arrow(editor, intent, false)));
	regs.push(editor.register_command(&KEY_BACKSPACE, PRIORITY, |intent, editor| {
		redispatch_key(editor, intent, |editor| editor.dispatch(&DELETE_CHARACTER, true))
	}));
	regs.push(editor.register_command(&KEY_DELETE, PRIORITY, |intent, editor| {
		redispatch_key(editor, intent, |editor| editor.dispatch(&DELETE_CHARACTER, false))
	}));
	regs.push(editor.register_command(&KEY_ENTER, PRIORITY, |intent, editor| {
		redispatch_key(editor, intent, |editor| editor.dispatch(&INSERT_LINE_BREAK, false))
	}));

	regs.push(editor.register_command(&COPY, PRIORITY, |intent, editor| copy(editor, intent)));
	regs.push(editor.register_command(&CUT, PRIORITY, |intent, editor| {
		if !copy(editor, intent)? {
			return Ok(false);
		}
		editor.update(UpdateOptions::default(), UpdateCtx::remove_text)?;
		Ok(true)
	}));
	regs.push(editor.register_command(&PASTE, PRIORITY, paste));

	regs.push(editor.register_command(&DRAGSTART, PRIORITY, suppress_drag));
	regs.push(editor.register_command(&DROP, PRIORITY, suppress_drag));

	trace!(handlers = regs.len(), "plain-text handlers registered");
	Ok(regs)
}

fn has_range_selection(editor: &Editor) -> bool {
	editor.read(EditorState::is_range_selection)
}

/// Runs `f` in a transaction when there is a range selection.
fn edit(editor: &Editor, f: impl FnOnce(&UpdateCtx) -> Result<bool, EditorError>) -> Result<bool, EditorError> {
	edit_tagged(editor, UpdateOptions::default(), f)
}

fn edit_tagged(
	editor: &Editor,
	options: UpdateOptions,
	f: impl FnOnce(&UpdateCtx) -> Result<bool, EditorError>,
) -> Result<bool, EditorError> {
	editor.update(options, |ctx| {
		if !ctx.has_range_selection()? {
			return Ok(false);
		}
		f(ctx)
	})
}

/// Inserts `lines` separated by line breaks.
fn insert_lines(ctx: &UpdateCtx, lines: &[String]) -> Result<bool, EditorError> {
	for (i, line) in lines.iter().enumerate() {
		if i > 0 {
			ctx.insert_line_break(false)?;
		}
		if !line.is_empty() {
			ctx.insert_text(line)?;
		}
	}
	Ok(true)
}

/// Steps over an atomic node that native caret movement cannot cross.
fn arrow(editor: &Editor, intent: &KeyIntent, backward: bool) -> Result<bool, EditorError> {
	edit(editor, |ctx| {
		if !ctx.should_override_default_character_selection(backward)? {
			return Ok(false);
		}
		intent.prevent_default();
		ctx.move_character(intent.modifiers.shift, backward)
	})
}

fn redispatch_key(
	editor: &Editor,
	intent: &KeyIntent,
	then: impl FnOnce(&Editor) -> Result<bool, EditorError>,
) -> Result<bool, EditorError> {
	if !has_range_selection(editor) {
		return Ok(false);
	}
	intent.prevent_default();
	then(editor)
}

fn copy(editor: &Editor, intent: &ClipboardIntent) -> Result<bool, EditorError> {
	let Some(payload) = editor.read(|state| serialize_for_copy(state, editor.config())) else {
		return Ok(false);
	};
	payload.write_to(&mut intent.transfer.borrow_mut(), &editor.config().namespace);
	intent.native.prevent();
	trace!(bytes = payload.plain.len(), "copied selection");
	Ok(true)
}

fn paste(intent: &ClipboardIntent, editor: &Editor) -> Result<bool, EditorError> {
	if !has_range_selection(editor) {
		return Ok(false);
	}
	intent.native.prevent();

	let data = intent.transfer.borrow().clone();
	let size = paste_size(&data);
	let limit = editor.config().clipboard.max_paste_bytes;
	if size > limit {
		warn!(size, limit, namespace = %editor.config().namespace, "paste rejected: payload too large");
		return Ok(true);
	}

	let lines = deserialize_for_paste(&data);
	if lines.is_empty() {
		return Ok(true);
	}
	edit_tagged(editor, UpdateOptions::tagged(PASTE_TAG), |ctx| insert_lines(ctx, &lines))
}

fn suppress_drag(intent: &DragIntent, editor: &Editor) -> Result<bool, EditorError> {
	if !has_range_selection(editor) {
		return Ok(false);
	}
	intent.native.prevent();
	Ok(true)
}
