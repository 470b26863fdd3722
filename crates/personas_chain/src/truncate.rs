//! Head-and-tail truncation of oversized step input.

use std::borrow::Cow;

/// Inserted between the kept head and tail of truncated text.
pub const TRUNCATION_MARKER: &str = "\n...\n";

/// Fit `text` into `budget` characters by eliding its middle.
///
/// Text within budget is returned untouched. Otherwise the first and last
/// `budget / 2` characters are kept around [`TRUNCATION_MARKER`]. Lengths are
/// counted in `char`s so a code point is never split.
///
/// # Examples
///
/// ```
/// use personas_chain::truncate_middle;
///
/// assert_eq!(truncate_middle("short", 10), "short");
/// assert_eq!(truncate_middle("abcdefghij", 4), "ab\n...\nij");
/// ```
pub fn truncate_middle(text: &str, budget: usize) -> Cow<'_, str> {
    let len = text.chars().count();
    if len <= budget {
        return Cow::Borrowed(text);
    }

    let half = budget / 2;
    let byte_offset = |nth: usize| {
        text.char_indices()
            .nth(nth)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    let head_end = byte_offset(half);
    let tail_start = byte_offset(len - half);

    let mut truncated =
        String::with_capacity(head_end + TRUNCATION_MARKER.len() + text.len() - tail_start);
    truncated.push_str(&text[..head_end]);
    truncated.push_str(TRUNCATION_MARKER);
    truncated.push_str(&text[tail_start..]);
    Cow::Owned(truncated)
}
