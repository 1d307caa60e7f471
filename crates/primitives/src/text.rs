use std::borrow::Cow;

/// Normalizes text to LF (`\n`) newlines.
///
/// Converts both CRLF (`\r\n`) and bare CR (`\r`) into LF.
/// If the input contains no carriage returns, it is borrowed unchanged.
pub fn normalize_to_lf(s: &str) -> Cow<'_, str> {
	if !s.contains('\r') {
		return Cow::Borrowed(s);
	}

	let mut out = String::with_capacity(s.len());
	let mut chars = s.chars().peekable();
	while let Some(ch) = chars.next() {
		if ch == '\r' {
			if chars.peek() == Some(&'\n') {
				chars.next();
			}
			out.push('\n');
		} else {
			out.push(ch);
		}
	}

	Cow::Owned(out)
}

/// Splits text into line segments after newline normalization.
///
/// `"a\nb"` yields `["a", "b"]`; a trailing newline yields a trailing empty
/// segment, so joining the segments with `\n` restores the normalized input.
pub fn split_lines(s: &str) -> Vec<String> {
	normalize_to_lf(s).split('\n').map(str::to_owned).collect()
}
