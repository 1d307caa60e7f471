//! Clipboard payloads.
//!
//! Copy writes up to three renditions of the selection:
//!
//! | mime | content |
//! |---|---|
//! | `text/plain` | visible text, blocks separated by a blank line |
//! | `text/html` | one `<p>` per block, line breaks as `<br>` (optional) |
//! | `application/x-<namespace>-fragment` | the selected blocks as JSON nodes |
//!
//! Paste only ever reads plain text; rich renditions are ignored.

use std::collections::BTreeMap;

use plume_document::{Block, EditorState, serialize_fragment};
use plume_primitives::{OBJECT_CHAR, split_lines};
use tracing::warn;

use crate::config::EditorConfig;

pub const MIME_PLAIN: &str = "text/plain";
pub const MIME_HTML: &str = "text/html";
pub const MIME_URI_LIST: &str = "text/uri-list";

/// Mime type of the structured fragment for `namespace`.
pub fn fragment_mime(namespace: &str) -> String {
	format!("application/x-{namespace}-fragment")
}

/// A data transfer: string payloads keyed by mime type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardData {
	entries: BTreeMap<String, String>,
}

impl ClipboardData {
	/// An empty transfer.
	pub fn new() -> Self {
		Self::default()
	}

	/// A transfer holding only plain text.
	pub fn plain(text: impl Into<String>) -> Self {
		Self::new().with(MIME_PLAIN, text)
	}

	/// Adds an entry, builder style.
	pub fn with(mut self, mime: impl Into<String>, data: impl Into<String>) -> Self {
		self.set(mime, data);
		self
	}

	/// Sets the payload for `mime`.
	pub fn set(&mut self, mime: impl Into<String>, data: impl Into<String>) {
		self.entries.insert(mime.into(), data.into());
	}

	/// The payload for `mime`.
	pub fn get(&self, mime: &str) -> Option<&str> {
		self.entries.get(mime).map(String::as_str)
	}

	/// Removes every entry.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Returns true if there are no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Mime types present, in lexical order.
	pub fn mimes(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}
}

/// The renditions produced for a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPayload {
	/// Always present.
	pub plain: String,
	/// Present when HTML output is enabled.
	pub html: Option<String>,
	/// Present unless fragment serialization failed.
	pub fragment: Option<String>,
}

impl CopyPayload {
	/// Writes every rendition into `data`, replacing what was there.
	pub fn write_to(&self, data: &mut ClipboardData, namespace: &str) {
		data.clear();
		data.set(MIME_PLAIN, self.plain.clone());
		if let Some(html) = &self.html {
			data.set(MIME_HTML, html.clone());
		}
		if let Some(fragment) = &self.fragment {
			data.set(fragment_mime(namespace), fragment.clone());
		}
	}
}

/// Serializes the range selection of `state` for the clipboard.
///
/// Returns `None` without a range selection. A collapsed selection yields empty
/// renditions.
pub fn serialize_for_copy(state: &EditorState, config: &EditorConfig) -> Option<CopyPayload> {
	let plain = state.selected_text()?;
	let blocks = state.selected_blocks()?;
	let html = config.clipboard.html.then(|| blocks_to_html(&blocks));
	let fragment = match serialize_fragment(&blocks) {
		Ok(json) => Some(json),
		Err(error) => {
			warn!(%error, namespace = %config.namespace, "fragment serialization failed");
			None
		}
	};
	Some(CopyPayload { plain, html, fragment })
}

/// Decomposes a data transfer into plain-text lines.
///
/// Reads `text/plain`, falling back to `text/uri-list` (without its comment
/// lines). Inserting the segments joined by line breaks reproduces the source
/// line structure. An empty vector means there is nothing to paste.
pub fn deserialize_for_paste(data: &ClipboardData) -> Vec<String> {
	let text = match data.get(MIME_PLAIN) {
		Some(text) => text.to_string(),
		None => match data.get(MIME_URI_LIST) {
			Some(list) => uri_list_text(list),
			None => return Vec::new(),
		},
	};
	split_lines(&text)
}

/// Size in bytes of the text a paste would insert.
pub(crate) fn paste_size(data: &ClipboardData) -> usize {
	data.get(MIME_PLAIN).or_else(|| data.get(MIME_URI_LIST)).map_or(0, str::len)
}

fn uri_list_text(list: &str) -> String {
	split_lines(list)
		.into_iter()
		.filter(|line| !line.starts_with('#'))
		.collect::<Vec<_>>()
		.join("\n")
}

fn blocks_to_html(blocks: &[Block]) -> String {
	let mut html = String::new();
	for block in blocks {
		html.push_str("<p>");
		for c in block.content().chars() {
			match c {
				'\n' => html.push_str("<br>"),
				OBJECT_CHAR => {}
				'<' => html.push_str("&lt;"),
				'>' => html.push_str("&gt;"),
				'&' => html.push_str("&amp;"),
				'"' => html.push_str("&quot;"),
				c => html.push(c),
			}
		}
		html.push_str("</p>");
	}
	html
}
