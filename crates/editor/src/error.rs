use plume_document::DeserializationError;
use thiserror::Error;

/// Errors surfaced by dispatch, updates and initialization.
#[derive(Debug, Error)]
pub enum EditorError {
	/// A document read or mutation went through an [`crate::UpdateCtx`] whose
	/// transaction has already ended.
	#[error("document accessed outside of its update transaction")]
	IllegalMutationContext,

	/// An initial-state snapshot could not be parsed.
	#[error(transparent)]
	Deserialization(#[from] DeserializationError),

	/// A host-supplied handler, listener or initializer failed.
	#[error("handler failed: {0}")]
	Handler(#[from] anyhow::Error),
}
