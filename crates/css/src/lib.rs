pub mod cascade;
pub mod computed;
pub mod syntax;
pub mod values;

pub use cascade::{attach_inline_styles, get_inline_style};
pub use computed::{BoxMetrics, ComputedStyle, NORMAL_LINE_HEIGHT, StyleMap, compute_style, default_display_for};
pub use syntax::{Declaration, parse_declarations};
pub use values::{Display, Length, WhiteSpace, parse_color, parse_display, parse_length, parse_white_space};
