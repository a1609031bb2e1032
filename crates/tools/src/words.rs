//! Character classes used for word-wise stepping and double-click expansion.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Word,
    Space,
    Punctuation,
}

pub fn classify(c: char) -> CharClass {
    if is_word_char(c) {
        CharClass::Word
    } else if c.is_whitespace() || crate::is_zero_width(c) {
        CharClass::Space
    } else {
        CharClass::Punctuation
    }
}

/// Letters, digits, marks and connector punctuation (`_`).
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
