/// CSS length. Only `px` is supported; unitless line heights are resolved
/// to pixels against the font size when computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
}

impl Length {
    #[inline]
    pub fn px(self) -> f32 {
        match self {
            Length::Px(px) => px,
        }
    }
}

/// CSS `display` value, restricted to what flow layout and navigation need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    ListItem,
    Table,
    TableRow,
    TableCell,
    None,
}

impl Display {
    /// Inline-level boxes continue the current line.
    pub fn is_inline_level(self) -> bool {
        matches!(self, Display::Inline | Display::InlineBlock)
    }
}

/// CSS `white-space` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhiteSpace {
    Normal,
    Nowrap,
    Pre,
    PreWrap,
    PreLine,
    BreakSpaces,
}

impl WhiteSpace {
    /// Every whitespace character is rendered as written.
    pub fn preserves_spaces(self) -> bool {
        matches!(self, WhiteSpace::Pre | WhiteSpace::PreWrap | WhiteSpace::BreakSpaces)
    }

    /// Literal line terminators force a line break.
    pub fn preserves_newlines(self) -> bool {
        self.preserves_spaces() || self == WhiteSpace::PreLine
    }

    /// Lines may wrap at the available width.
    pub fn wraps(self) -> bool {
        !matches!(self, WhiteSpace::Nowrap | WhiteSpace::Pre)
    }
}

pub fn parse_color(value: &str) -> Option<(u8, u8, u8, u8)> {
    let s = value.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        return match hex.len() {
            3 => Some((
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
                255,
            )),
            6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 255)),
            _ => None,
        };
    }

    let named = match s.as_str() {
        "black" => (0, 0, 0, 255),
        "blue" => (0, 0, 255, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        "green" => (0, 128, 0, 255),
        "navy" => (0, 0, 128, 255),
        "orange" => (255, 165, 0, 255),
        "purple" => (128, 0, 128, 255),
        "red" => (255, 0, 0, 255),
        "teal" => (0, 128, 128, 255),
        "white" => (255, 255, 255, 255),
        "transparent" => (0, 0, 0, 0),
        _ => return None,
    };
    Some(named)
}

/// Parse `<number>px`. Negative and non-finite values are rejected.
pub fn parse_length(value: &str) -> Option<Length> {
    let num = value.trim().strip_suffix("px")?.trim().parse::<f32>().ok()?;
    (num.is_finite() && num >= 0.0).then_some(Length::Px(num))
}

pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "list-item" => Some(Display::ListItem),
        "table" => Some(Display::Table),
        "table-row" => Some(Display::TableRow),
        "table-cell" => Some(Display::TableCell),
        "none" => Some(Display::None),
        _ => None,
    }
}

pub fn parse_white_space(value: &str) -> Option<WhiteSpace> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(WhiteSpace::Normal),
        "nowrap" => Some(WhiteSpace::Nowrap),
        "pre" => Some(WhiteSpace::Pre),
        "pre-wrap" => Some(WhiteSpace::PreWrap),
        "pre-line" => Some(WhiteSpace::PreLine),
        "break-spaces" => Some(WhiteSpace::BreakSpaces),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(parse_length("16px"), Some(Length::Px(16.0)));
        assert_eq!(parse_length(" 12.5px "), Some(Length::Px(12.5)));
        assert_eq!(parse_length("-3px"), None);
        assert_eq!(parse_length("2em"), None);
    }

    #[test]
    fn white_space_classes() {
        assert_eq!(parse_white_space("pre-line"), Some(WhiteSpace::PreLine));
        assert!(WhiteSpace::Pre.preserves_spaces());
        assert!(!WhiteSpace::PreLine.preserves_spaces());
        assert!(WhiteSpace::PreLine.preserves_newlines());
        assert!(!WhiteSpace::Nowrap.wraps());
        assert!(WhiteSpace::PreWrap.wraps());
    }

    #[test]
    fn colors() {
        assert_eq!(parse_color("#f00"), Some((255, 0, 0, 255)));
        assert_eq!(parse_color("#00ff00"), Some((0, 255, 0, 255)));
        assert_eq!(parse_color("Navy"), Some((0, 0, 128, 255)));
        assert_eq!(parse_color("#12"), None);
    }
}
