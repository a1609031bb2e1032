//! Char-boundary helpers for byte offsets into UTF-8 text.
//!
//! Boundaries inside text nodes are byte offsets. Every helper here keeps
//! them on a char boundary so slicing never panics.

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// Indices past the end clamp to `s.len()`; indices inside a multi-byte
/// character move back to the start of that character.
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Byte offset of the char boundary before `i`, or `None` at the start.
pub fn prev_char_boundary(s: &str, i: usize) -> Option<usize> {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().next_back().map(|(idx, _)| idx)
}

/// Byte offset of the char boundary after `i`, or `None` at the end.
pub fn next_char_boundary(s: &str, i: usize) -> Option<usize> {
    let i = clamp_to_char_boundary(s, i);
    s[i..].chars().next().map(|c| i + c.len_utf8())
}

/// The character starting at byte offset `i`.
#[inline]
pub fn char_after(s: &str, i: usize) -> Option<char> {
    s.get(i..)?.chars().next()
}

/// The character ending at byte offset `i`.
#[inline]
pub fn char_before(s: &str, i: usize) -> Option<char> {
    s.get(..i)?.chars().next_back()
}
