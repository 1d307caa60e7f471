//! Key modifier flags as reported by the host platform.

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt (Option) is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Meta (Cmd, Super) is held.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		meta: false,
	};

	/// Only Shift pressed.
	pub const SHIFT: Self = Self { shift: true, ..Self::NONE };

	/// Only Ctrl pressed.
	pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Meta added.
	pub fn meta(self) -> Self {
		Self { meta: true, ..self }
	}

	/// Ctrl or Alt without Meta: the word-granularity chord for deletions.
	pub fn is_word_chord(self) -> bool {
		(self.ctrl || self.alt) && !self.meta
	}
}
