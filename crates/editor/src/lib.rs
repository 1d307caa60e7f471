#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Plain-text editing core.
//!
//! This crate turns user intents into deterministic edits of a
//! [`plume_document::EditorState`]:
//!
//! ```text
//! NativeEvent ──native──▶ Command<P> + payload ──Editor::dispatch──▶ handlers (by priority)
//!                                                                    │
//!                                          Editor::update(UpdateCtx) ◀┘
//!                                                    │
//!                                  commit ──▶ update listeners / subscribers
//! ```
//!
//! # Main Types
//!
//! - [`Editor`] - Rc handle owning the command bus, the committed snapshot and listeners
//! - [`Command`] - Typed command identifier; see [`commands`] for the built-in set
//! - [`UpdateCtx`] - Transaction-scoped access to the working copy of the document
//! - [`Registrations`] - Aggregated teardown for a group of registrations
//!
//! Everything is single-threaded: [`Editor`] is `!Send` and dispatch is
//! synchronous end-to-end.

/// Clipboard payloads and the copy/paste serializer.
pub mod clipboard;
/// Typed command identifiers and priorities.
pub mod command;
mod command_bus;
/// Built-in commands and their payload types.
pub mod commands;
/// Editor configuration loaded from TOML.
pub mod config;
/// Teardown handles.
pub mod dispose;
mod editor;
mod error;
/// Undo/redo history driven by transaction tags.
pub mod history;
/// Bootstrapping a freshly attached document.
pub mod initial_state;
/// Platform event normalization.
pub mod native;
/// Plain-text command handlers.
pub mod plain_text;
/// Update transactions and their context.
pub mod update;

pub use command::{Command, CommandPriority};
pub use config::EditorConfig;
pub use dispose::{CommandRegistration, Disposable, ListenerRegistration, Registrations};
pub use editor::Editor;
pub use error::EditorError;
pub use initial_state::{InitialState, SnapshotSource, initialize};
pub use plain_text::register_plain_text;
pub use update::{HISTORIC_TAG, HISTORY_MERGE_TAG, PASTE_TAG, TagSet, UpdateCtx, UpdateEvent, UpdateOptions};
