//! Per-command handler lists.
//!
//! Each [`Command`] maps to a list of handlers kept sorted by priority (highest
//! first), ties in registration order. Lists are stored type-erased behind
//! [`SlotList`] and keyed by [`CommandKey`], which includes the payload
//! `TypeId`, so a downcast back to `Slots<P>` always matches; a list that
//! fails it is replaced rather than trusted.

use std::any::Any;
use std::rc::Rc;

use rustc_hash::FxHashMap as HashMap;
use smallvec::SmallVec;

use crate::command::{Command, CommandKey, CommandPriority};
use crate::{Editor, EditorError};


/// A command handler. Returns `Ok(true)` to stop propagation.
pub(crate) type Handler<P> = Rc<dyn Fn(&P, &Editor) -> Result<bool, EditorError>>;

/// Handlers cloned out of the bus for one dispatch.
pub(crate) type HandlerSnapshot<P> = SmallVec<[Handler<P>; 4]>;

/// Identifier of a single registration.
pub(crate) type SlotId = u64;

struct Slot<P> {
	id: SlotId,
	priority: CommandPriority,
	handler: Handler<P>,
}

struct Slots<P>(Vec<Slot<P>>);

impl<P> Slots<P> {
	/// Inserts after every slot of equal or higher priority.
	fn insert(&mut self, slot: Slot<P>) {
		let pos = self.0.partition_point(|other| other.priority >= slot.priority);
		self.0.insert(pos, slot);
	}
}

trait SlotList {
	fn remove(&mut self, id: SlotId) -> bool;
	fn len(&self) -> usize;
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<P: 'static> SlotList for Slots<P> {
	fn remove(&mut self, id: SlotId) -> bool {
		let before = self.0.len();
		self.0.retain(|slot| slot.id != id);
		self.0.len() != before
	}

	fn len(&self) -> usize {
		self.0.len()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

#[derive(Default)]
pub(crate) struct CommandBus {
	lists: HashMap<CommandKey, Box<dyn SlotList>>,
	next_id: SlotId,
}

impl CommandBus {
	/// Inserts a handler after every slot of equal or higher priority.
	pub(crate) fn register<P: 'static>(
		&mut self,
		command: &Command<P>,
		priority: CommandPriority,
		handler: Handler<P>,
	) -> SlotId {
		let id = self.next_id;
		self.next_id += 1;

		let slot = Slot { id, priority, handler };
		let key = command.key();
		if let Some(slots) = self.lists.get_mut(&key).and_then(|list| list.as_any_mut().downcast_mut::<Slots<P>>()) {
			slots.insert(slot);
		} else {
			self.lists.insert(key, Box::new(Slots(vec![slot])));
		}
		id
	}

	/// Removes one registration. Returns false if it was already gone.
	pub(crate) fn unregister(&mut self, key: &CommandKey, id: SlotId) -> bool {
		let Some(list) = self.lists.get_mut(key) else {
			return false;
		};
		let removed = list.remove(id);
		if list.is_empty() {
			self.lists.remove(key);
		}
		removed
	}

	/// Clones the current handler list, highest priority first.
	pub(crate) fn snapshot<P: 'static>(&self, command: &Command<P>) -> HandlerSnapshot<P> {
		self.slots(command)
			.map(|slots| slots.0.iter().map(|slot| slot.handler.clone()).collect())
			.unwrap_or_default()
	}

	pub(crate) fn handler_count<P: 'static>(&self, command: &Command<P>) -> usize {
		self.slots(command).map_or(0, |slots| slots.0.len())
	}

	/// Total registrations across all commands.
	pub(crate) fn len(&self) -> usize {
		self.lists.values().map(|list| list.len()).sum()
	}

	fn slots<P: 'static>(&self, command: &Command<P>) -> Option<&Slots<P>> {
		self.lists.get(&command.key())?.as_any().downcast_ref()
	}
}
