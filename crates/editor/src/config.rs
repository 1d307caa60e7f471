//! Editor configuration.
//!
//! ```toml
//! namespace = "notes"
//!
//! [clipboard]
//! html = true
//! max_paste_bytes = 1048576
//!
//! [history]
//! depth = 200
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an invalid field value.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The namespace is empty or contains characters not allowed in a mime subtype.
	#[error("invalid namespace: {0:?}")]
	InvalidNamespace(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
	/// Identifies this editor in clipboard fragments and logs.
	pub namespace: String,
	/// Copy and paste behaviour.
	pub clipboard: ClipboardConfig,
	/// Undo history.
	pub history: HistoryConfig,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			namespace: "plume".to_string(),
			clipboard: ClipboardConfig::default(),
			history: HistoryConfig::default(),
		}
	}
}

impl EditorConfig {
	/// Parses configuration from a TOML string.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	fn validate(&self) -> Result<()> {
		let valid = !self.namespace.is_empty()
			&& self
				.namespace
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
		if valid {
			Ok(())
		} else {
			Err(ConfigError::InvalidNamespace(self.namespace.clone()))
		}
	}
}

/// Clipboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipboardConfig {
	/// Whether copy writes a `text/html` rendition.
	pub html: bool,
	/// Pastes larger than this many bytes of plain text are rejected.
	pub max_paste_bytes: usize,
}

impl Default for ClipboardConfig {
	fn default() -> Self {
		Self {
			html: true,
			max_paste_bytes: 4 * 1024 * 1024,
		}
	}
}

/// Undo history settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
	/// Maximum number of undo steps kept.
	pub depth: usize,
}

impl Default for HistoryConfig {
	fn default() -> Self {
		Self { depth: 100 }
	}
}
