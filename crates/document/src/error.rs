//! Snapshot parsing errors.

use thiserror::Error;

/// Errors produced while turning a serialized snapshot back into an [`crate::EditorState`].
#[derive(Debug, Error)]
pub enum DeserializationError {
	/// The input is not valid snapshot JSON.
	#[error("malformed snapshot JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// The snapshot was written by an incompatible format version.
	#[error("unsupported snapshot version {found} (expected {expected})")]
	UnsupportedVersion {
		/// Version found in the input.
		found: u32,
		/// Version this build understands.
		expected: u32,
	},

	/// A text node contains a line break or a reserved placeholder char.
	#[error("text node in block {block} contains a reserved character")]
	InvalidText {
		/// Index of the offending block.
		block: usize,
	},

	/// A selection point does not address a position inside the document.
	#[error("selection point {block}:{offset} is outside the document")]
	SelectionOutOfBounds {
		/// Block index of the point.
		block: usize,
		/// Char offset of the point.
		offset: usize,
	},

	/// A node selection does not address an atomic node.
	#[error("node selection at {block}:{offset} does not address an atomic node")]
	NotAnAtomicNode {
		/// Block index of the selection.
		block: usize,
		/// Char offset of the selection.
		offset: usize,
	},
}
