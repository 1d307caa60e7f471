//! Undo/redo driven by transaction tags.
//!
//! The history listener records one step per committed transaction, except:
//!
//! - [`HISTORIC_TAG`] transactions (undo/redo themselves) are not recorded
//! - [`HISTORY_MERGE_TAG`] transactions and selection-only changes update the
//!   current entry in place instead of adding a step
//!
//! Steps beyond [`HistoryConfig::depth`] are dropped oldest first.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use plume_document::EditorState;
use tracing::{debug, trace};

use crate::command::CommandPriority;
use crate::commands::{REDO, UNDO};
use crate::config::HistoryConfig;
use crate::dispose::Registrations;
use crate::update::{HISTORIC_TAG, HISTORY_MERGE_TAG, UpdateEvent, UpdateOptions};
use crate::{Editor, EditorError};


struct History {
	undo: VecDeque<EditorState>,
	redo: Vec<EditorState>,
	current: EditorState,
	depth: usize,
}

impl History {
	fn record(&mut self, event: &UpdateEvent) {
		if event.tags.contains(HISTORIC_TAG) {
			return;
		}
		if event.tags.contains(HISTORY_MERGE_TAG) || event.is_selection_only() {
			self.current = event.state.clone();
			return;
		}
		let previous = std::mem::replace(&mut self.current, event.state.clone());
		self.undo.push_back(previous);
		while self.undo.len() > self.depth {
			self.undo.pop_front();
		}
		self.redo.clear();
		trace!(undo = self.undo.len(), "history step recorded");
	}

	fn undo(&mut self) -> Option<EditorState> {
		let target = self.undo.pop_back()?;
		let current = std::mem::replace(&mut self.current, target.clone());
		self.redo.push(current);
		Some(target)
	}

	fn redo(&mut self) -> Option<EditorState> {
		let target = self.redo.pop()?;
		let current = std::mem::replace(&mut self.current, target.clone());
		self.undo.push_back(current);
		Some(target)
	}
}

/// Installs undo history: an update listener plus [`UNDO`] and [`REDO`] handlers.
pub fn register_history(editor: &Editor, config: &HistoryConfig) -> Registrations {
	let history = Rc::new(RefCell::new(History {
		undo: VecDeque::new(),
		redo: Vec::new(),
		current: editor.state(),
		depth: config.depth,
	}));
	debug!(depth = config.depth, "history registered");

	let recorder = history.clone();
	let undo = history.clone();
	let redo = history;

	Registrations::new()
		.with(editor.register_update_listener(move |event| recorder.borrow_mut().record(event)))
		.with(editor.register_command(&UNDO, CommandPriority::Editor, move |_, editor| {
			let target = undo.borrow_mut().undo();
			restore(editor, target)
		}))
		.with(editor.register_command(&REDO, CommandPriority::Editor, move |_, editor| {
			let target = redo.borrow_mut().redo();
			restore(editor, target)
		}))
}

fn restore(editor: &Editor, target: Option<EditorState>) -> Result<bool, EditorError> {
	let Some(state) = target else {
		return Ok(false);
	};
	editor.set_state(state, UpdateOptions::tagged(HISTORIC_TAG))?;
	Ok(true)
}
