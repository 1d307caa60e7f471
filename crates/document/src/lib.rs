#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Plain-text document model consumed by the editor core.
//!
//! An [`EditorState`] is an immutable-by-convention value: a [`Root`] holding
//! paragraph [`Block`]s plus an optional [`Selection`]. Block content is a rope in
//! which [`LINE_BREAK`] marks a line-break node and [`OBJECT_CHAR`] marks an
//! atomic inline node, so every node occupies whole char positions and a
//! [`Point`] is simply `(block, offset)`.
//!
//! Mutations are plain `&mut self` methods; the editor crate decides when they may
//! be called.

pub mod block;
pub mod error;
pub mod selection;
pub mod serialized;
pub mod state;

pub use block::{AtomicNode, Block};
pub use error::DeserializationError;
pub use plume_primitives::{LINE_BREAK, OBJECT_CHAR};
pub use selection::{NodeSelection, Point, RangeSelection, Selection};
pub use serialized::{SNAPSHOT_VERSION, parse_state, serialize_fragment};
pub use state::{EditorState, Root};
