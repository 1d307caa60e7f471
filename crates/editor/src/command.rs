use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

/// A dispatchable intent carrying a payload of type `P`.
///
/// Commands are usually declared as constants:
///
/// ```
/// use plume_editor::Command;
///
/// pub const TOGGLE_WRAP: Command<bool> = Command::new("toggle-wrap");
/// ```
///
/// Identity is the pair of name and payload type, so two constants with the same
/// name but different payloads address different handler lists.
pub struct Command<P> {
	name: &'static str,
	_payload: PhantomData<fn(&P)>,
}

impl<P: 'static> Command<P> {
	/// Declares a command.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_payload: PhantomData,
		}
	}

	/// The command name.
	pub const fn name(&self) -> &'static str {
		self.name
	}

	pub(crate) fn key(&self) -> CommandKey {
		CommandKey {
			name: self.name,
			payload: TypeId::of::<P>(),
		}
	}
}

impl<P> Clone for Command<P> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<P> Copy for Command<P> {}

impl<P> fmt::Debug for Command<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Command").field(&self.name).finish()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CommandKey {
	pub(crate) name: &'static str,
	payload: TypeId,
}

/// Handler priority. Higher priorities run first.
///
/// [`CommandPriority::Editor`] is the lowest and is where the built-in handlers
/// live, so any host registration can pre-empt them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CommandPriority {
	/// Built-in editor behaviour.
	Editor,
	/// Host defaults.
	Low,
	/// Regular host handlers.
	#[default]
	Normal,
	/// Handlers that must see the command before regular ones.
	High,
	/// Handlers that must see the command first.
	Critical,
}
