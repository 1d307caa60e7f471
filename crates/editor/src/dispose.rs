//! Teardown handles.
//!
//! Every registration on an [`crate::Editor`] returns a handle implementing
//! [`Disposable`]. Handles do nothing on drop; teardown is always explicit, and
//! usually goes through a single [`Registrations`] aggregate per plugin.

use std::cell::Cell;
use std::fmt;
use std::rc::Weak;

use tracing::debug;

use crate::command::CommandKey;
use crate::command_bus::SlotId;
use crate::editor::{EditorInner, ListenerId};

/// Something that can be torn down. Disposing twice is a no-op.
pub trait Disposable {
	/// Releases the resource. Subsequent calls do nothing.
	fn dispose(&self);

	/// Returns true once [`Disposable::dispose`] has run.
	fn is_disposed(&self) -> bool;
}

/// Handle for one command handler registration.
#[must_use = "dropping the handle leaves the handler registered with no way to remove it"]
pub struct CommandRegistration {
	editor: Weak<EditorInner>,
	key: CommandKey,
	id: SlotId,
	disposed: Cell<bool>,
}

impl CommandRegistration {
	pub(crate) fn new(editor: Weak<EditorInner>, key: CommandKey, id: SlotId) -> Self {
		Self {
			editor,
			key,
			id,
			disposed: Cell::new(false),
		}
	}
}

impl Disposable for CommandRegistration {
	fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}
		let Some(editor) = self.editor.upgrade() else {
			return;
		};
		if editor.commands.borrow_mut().unregister(&self.key, self.id) {
			debug!(command = self.key.name, id = self.id, "command handler unregistered");
		}
	}

	fn is_disposed(&self) -> bool {
		self.disposed.get()
	}
}

impl fmt::Debug for CommandRegistration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandRegistration")
			.field("command", &self.key.name)
			.field("id", &self.id)
			.field("disposed", &self.disposed.get())
			.finish()
	}
}

/// Handle for one update listener.
#[must_use = "dropping the handle leaves the listener registered with no way to remove it"]
pub struct ListenerRegistration {
	editor: Weak<EditorInner>,
	id: ListenerId,
	disposed: Cell<bool>,
}

impl ListenerRegistration {
	pub(crate) fn new(editor: Weak<EditorInner>, id: ListenerId) -> Self {
		Self {
			editor,
			id,
			disposed: Cell::new(false),
		}
	}
}

impl Disposable for ListenerRegistration {
	fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}
		if let Some(editor) = self.editor.upgrade() {
			editor.remove_listener(self.id);
			debug!(id = self.id, "update listener removed");
		}
	}

	fn is_disposed(&self) -> bool {
		self.disposed.get()
	}
}

impl fmt::Debug for ListenerRegistration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListenerRegistration")
			.field("id", &self.id)
			.field("disposed", &self.disposed.get())
			.finish()
	}
}

/// A group of disposables released together.
///
/// [`Registrations::dispose_all`] disposes every member once; later calls are
/// no-ops. Members pushed after disposal are disposed immediately.
#[derive(Default)]
#[must_use = "dropping the aggregate leaves every member registered"]
pub struct Registrations {
	items: Vec<Box<dyn Disposable>>,
	disposed: Cell<bool>,
}

impl Registrations {
	/// Creates an empty aggregate.
	pub fn new() -> Self {
		Self::default()
	}

	/// Combines several aggregates (or any disposables) into one.
	pub fn merge<D: Disposable + 'static>(parts: impl IntoIterator<Item = D>) -> Self {
		let mut all = Self::new();
		all.extend(parts);
		all
	}

	/// Adds a member.
	pub fn push(&mut self, item: impl Disposable + 'static) {
		if self.disposed.get() {
			item.dispose();
			return;
		}
		self.items.push(Box::new(item));
	}

	/// Adds a member, builder style.
	pub fn with(mut self, item: impl Disposable + 'static) -> Self {
		self.push(item);
		self
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns true if there are no members.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Disposes every member exactly once.
	pub fn dispose_all(&self) {
		if self.disposed.replace(true) {
			return;
		}
		debug!(count = self.items.len(), "disposing registrations");
		for item in &self.items {
			item.dispose();
		}
	}
}

impl<D: Disposable + 'static> Extend<D> for Registrations {
	fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
		for item in iter {
			self.push(item);
		}
	}
}

impl Disposable for Registrations {
	fn dispose(&self) {
		self.dispose_all();
	}

	fn is_disposed(&self) -> bool {
		self.disposed.get()
	}
}

impl fmt::Debug for Registrations {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registrations")
			.field("len", &self.items.len())
			.field("disposed", &self.disposed.get())
			.finish()
	}
}
