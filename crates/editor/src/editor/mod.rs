//! The editor handle.
//!
//! [`Editor`] is a cheap `Rc` handle. It owns:
//!
//! - the command bus (see [`Editor::register_command`] and [`Editor::dispatch`])
//! - the committed [`EditorState`] and at most one pending transaction
//! - update listeners, notified once per commit
//!
//! Handlers receive the editor by reference instead of capturing it, so
//! registrations never form reference cycles with the editor they live on.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use plume_document::{DeserializationError, EditorState, parse_state};
use tracing::{debug, trace};

use crate::command::{Command, CommandPriority};
use crate::command_bus::{CommandBus, Handler};
use crate::config::EditorConfig;
use crate::dispose::{CommandRegistration, ListenerRegistration};
use crate::update::{TagSet, UpdateCtx, UpdateEvent, UpdateOptions};
use crate::EditorError;


pub(crate) type ListenerId = u64;

type Listener = Rc<dyn Fn(&UpdateEvent)>;

struct PendingUpdate {
	txn: u64,
	state: EditorState,
	tags: TagSet,
}

pub(crate) struct EditorInner {
	config: EditorConfig,
	pub(crate) commands: RefCell<CommandBus>,
	listeners: RefCell<Vec<(ListenerId, Listener)>>,
	next_listener: Cell<ListenerId>,
	committed: RefCell<EditorState>,
	pending: RefCell<Option<PendingUpdate>>,
	next_txn: Cell<u64>,
	focused: Cell<bool>,
}

impl EditorInner {
	pub(crate) fn remove_listener(&self, id: ListenerId) {
		self.listeners.borrow_mut().retain(|(listener, _)| *listener != id);
	}
}

/// Clears the pending transaction if the update closure unwinds.
struct TxnGuard<'a>(&'a EditorInner);

impl Drop for TxnGuard<'_> {
	fn drop(&mut self) {
		self.0.pending.borrow_mut().take();
	}
}

/// Shared handle to one editing surface.
#[derive(Clone)]
pub struct Editor {
	inner: Rc<EditorInner>,
}

impl Default for Editor {
	fn default() -> Self {
		Self::new()
	}
}

impl Editor {
	/// Creates an editor with default configuration and an empty document.
	pub fn new() -> Self {
		Self::with_config(EditorConfig::default())
	}

	/// Creates an editor with `config` and an empty document.
	pub fn with_config(config: EditorConfig) -> Self {
		debug!(namespace = %config.namespace, "editor created");
		Self {
			inner: Rc::new(EditorInner {
				config,
				commands: RefCell::new(CommandBus::default()),
				listeners: RefCell::new(Vec::new()),
				next_listener: Cell::new(0),
				committed: RefCell::new(EditorState::new()),
				pending: RefCell::new(None),
				next_txn: Cell::new(1),
				focused: Cell::new(false),
			}),
		}
	}

	/// The configuration this editor was created with.
	pub fn config(&self) -> &EditorConfig {
		&self.inner.config
	}

	/// Registers `handler` for `command` at `priority`.
	///
	/// Handlers run highest priority first; among equal priorities, earlier
	/// registrations run first. Returning `Ok(true)` stops propagation.
	pub fn register_command<P, F>(&self, command: &Command<P>, priority: CommandPriority, handler: F) -> CommandRegistration
	where
		P: 'static,
		F: Fn(&P, &Editor) -> Result<bool, EditorError> + 'static,
	{
		let handler: Handler<P> = Rc::new(handler);
		let id = self.inner.commands.borrow_mut().register(command, priority, handler);
		debug!(command = command.name(), ?priority, id, "command handler registered");
		CommandRegistration::new(Rc::downgrade(&self.inner), command.key(), id)
	}

	/// Dispatches `payload` to the handlers of `command`.
	///
	/// Returns `Ok(true)` if a handler claimed the command and `Ok(false)` if none
	/// did, in which case the caller should apply its default behaviour. Handlers
	/// registered or removed while this dispatch runs do not affect it. A handler
	/// error stops the dispatch and is returned unchanged.
	pub fn dispatch<P: 'static>(&self, command: &Command<P>, payload: P) -> Result<bool, EditorError> {
		let handlers = self.inner.commands.borrow().snapshot(command);
		trace!(command = command.name(), handlers = handlers.len(), "dispatch");
		for handler in handlers {
			if handler(&payload, self)? {
				trace!(command = command.name(), "handled");
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// Returns true if `command` has at least one handler.
	pub fn has_commands<P: 'static>(&self, command: &Command<P>) -> bool {
		self.handler_count(command) > 0
	}

	/// Number of handlers registered for `command`.
	pub fn handler_count<P: 'static>(&self, command: &Command<P>) -> usize {
		self.inner.commands.borrow().handler_count(command)
	}

	/// Number of handlers registered across all commands.
	pub fn total_handler_count(&self) -> usize {
		self.inner.commands.borrow().len()
	}

	/// Runs `f` as one transaction.
	///
	/// `f` works on a private copy of the committed state through the [`UpdateCtx`]
	/// it receives. If `f` returns `Ok` and the copy differs from the committed
	/// state, the copy is committed and listeners are notified; otherwise nothing
	/// is observed. An update started while another is running joins it, adding
	/// its tags. Starting one from inside an [`UpdateCtx::read`] or
	/// [`UpdateCtx::mutate`] closure fails with
	/// [`EditorError::IllegalMutationContext`].
	pub fn update<T>(&self, options: UpdateOptions, f: impl FnOnce(&UpdateCtx) -> Result<T, EditorError>) -> Result<T, EditorError> {
		let Ok(mut slot) = self.inner.pending.try_borrow_mut() else {
			return Err(EditorError::IllegalMutationContext);
		};
		if let Some(pending) = slot.as_mut() {
			let txn = pending.txn;
			pending.tags.merge(options.tags);
			drop(slot);
			trace!(txn, "nested update joins active transaction");
			return f(&UpdateCtx::new(self.clone(), txn));
		}

		let txn = self.inner.next_txn.get();
		self.inner.next_txn.set(txn + 1);
		*slot = Some(PendingUpdate {
			txn,
			state: self.inner.committed.borrow().clone(),
			tags: options.tags,
		});
		drop(slot);

		let guard = TxnGuard(&self.inner);
		let result = f(&UpdateCtx::new(self.clone(), txn));
		let pending = self.inner.pending.borrow_mut().take();
		drop(guard);

		match (result, pending) {
			(Ok(value), Some(pending)) => {
				self.commit(pending);
				Ok(value)
			}
			(Ok(value), None) => Ok(value),
			(Err(err), _) => {
				debug!(txn, error = %err, "update discarded");
				Err(err)
			}
		}
	}

	/// Reads the current snapshot: the working copy while a transaction runs,
	/// otherwise the committed state.
	///
	/// While the working copy is being mutated only the committed state is
	/// readable.
	pub fn read<R>(&self, f: impl FnOnce(&EditorState) -> R) -> R {
		if let Ok(pending) = self.inner.pending.try_borrow() {
			if let Some(pending) = pending.as_ref() {
				return f(&pending.state);
			}
		}
		f(&self.inner.committed.borrow())
	}

	/// A clone of the committed snapshot.
	pub fn state(&self) -> EditorState {
		self.inner.committed.borrow().clone()
	}

	/// Installs `state` wholesale as one transaction.
	pub fn set_state(&self, state: EditorState, options: UpdateOptions) -> Result<(), EditorError> {
		self.update(options, |ctx| ctx.set_state(state))
	}

	/// Parses a JSON snapshot.
	pub fn parse_state(&self, json: &str) -> Result<EditorState, DeserializationError> {
		parse_state(json)
	}

	/// Registers a listener fired once per committed transaction.
	pub fn register_update_listener(&self, listener: impl Fn(&UpdateEvent) + 'static) -> ListenerRegistration {
		let id = self.inner.next_listener.get();
		self.inner.next_listener.set(id + 1);
		self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
		debug!(id, "update listener registered");
		ListenerRegistration::new(Rc::downgrade(&self.inner), id)
	}

	/// Calls `subscriber` with the committed state now, then after every commit.
	pub fn subscribe(&self, subscriber: impl Fn(&EditorState) + 'static) -> ListenerRegistration {
		let current = self.state();
		subscriber(&current);
		self.register_update_listener(move |event| subscriber(&event.state))
	}

	/// Records whether the editing surface holds focus.
	pub fn set_focused(&self, focused: bool) {
		self.inner.focused.set(focused);
	}

	/// Returns true if the editing surface holds focus.
	pub fn is_focused(&self) -> bool {
		self.inner.focused.get()
	}

	/// Runs `f` on the working copy of transaction `txn`.
	///
	/// Fails if `txn` has ended or if the working copy is already borrowed by
	/// an enclosing mutation.
	pub(crate) fn with_pending<R>(&self, txn: u64, f: impl FnOnce(&mut EditorState) -> R) -> Result<R, EditorError> {
		let mut pending = self.inner.pending.try_borrow_mut().map_err(|_| EditorError::IllegalMutationContext)?;
		match pending.as_mut() {
			Some(pending) if pending.txn == txn => Ok(f(&mut pending.state)),
			_ => Err(EditorError::IllegalMutationContext),
		}
	}

	/// Shared-borrow counterpart of [`Self::with_pending`]; reads may nest.
	pub(crate) fn with_pending_ref<R>(&self, txn: u64, f: impl FnOnce(&EditorState) -> R) -> Result<R, EditorError> {
		let pending = self.inner.pending.try_borrow().map_err(|_| EditorError::IllegalMutationContext)?;
		match pending.as_ref() {
			Some(pending) if pending.txn == txn => Ok(f(&pending.state)),
			_ => Err(EditorError::IllegalMutationContext),
		}
	}

	fn commit(&self, pending: PendingUpdate) {
		if *self.inner.committed.borrow() == pending.state {
			trace!(txn = pending.txn, "update left state unchanged");
			return;
		}
		let previous = self.inner.committed.replace(pending.state.clone());
		trace!(txn = pending.txn, tags = %pending.tags, "commit");

		let event = UpdateEvent {
			state: pending.state,
			previous,
			tags: pending.tags,
		};
		let listeners: Vec<Listener> = self.inner.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
		for listener in listeners {
			listener(&event);
		}
	}
}

impl fmt::Debug for Editor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Editor")
			.field("namespace", &self.inner.config.namespace)
			.field("handlers", &self.total_handler_count())
			.field("focused", &self.inner.focused.get())
			.finish_non_exhaustive()
	}
}
