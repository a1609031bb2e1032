//! Whitespace classes as the renderer sees them.
//!
//! Breaking whitespace collapses under `white-space: normal`. Non-breaking
//! spaces are always rendered. Zero-width marks occupy no space but are not
//! whitespace either; they are ignored when deciding whether a run is blank.

use memchr::memchr2;

/// Zero-width characters that carry no visual width.
#[inline]
pub fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

#[inline]
pub fn is_non_breaking_space(c: char) -> bool {
    matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Whitespace that the renderer may collapse or break a line at.
#[inline]
pub fn is_breaking_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_non_breaking_space(c)
}

#[inline]
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// True if `s` holds nothing but breaking whitespace and zero-width marks.
///
/// The empty string qualifies.
pub fn is_only_breaking_whitespace(s: &str) -> bool {
    s.chars().all(|c| is_breaking_whitespace(c) || is_zero_width(c))
}

/// True if `s` contains a literal `\n` or `\r`.
#[inline]
pub fn has_line_terminator(s: &str) -> bool {
    memchr2(b'\n', b'\r', s.as_bytes()).is_some()
}
