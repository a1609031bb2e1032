//! Small text primitives shared by the tree, style and navigation crates.

pub mod utf8;
pub mod whitespace;
pub mod words;

pub use utf8::{char_after, char_before, clamp_to_char_boundary, next_char_boundary, prev_char_boundary};
pub use whitespace::{
    has_line_terminator, is_breaking_whitespace, is_line_terminator, is_non_breaking_space,
    is_only_breaking_whitespace, is_zero_width,
};
pub use words::{CharClass, classify, is_word_char};
