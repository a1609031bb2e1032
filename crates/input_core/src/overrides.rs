//! Caret styling: what the text at the caret looks like, with the user's
//! pending formatting toggles on top.

use css::ComputedStyle;

pub type Rgba = (u8, u8, u8, u8);

/// A formatting toggle the user applied at a collapsed caret, before typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Override {
    Bold,
    Italic,
    Underline,
    Color(Rgba),
}

/// Pending toggles. `None` means "as the text around the caret".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub color: Option<Rgba>,
}

impl Overrides {
    pub fn is_empty(&self) -> bool {
        *self == Overrides::default()
    }

    pub fn clear(&mut self) {
        *self = Overrides::default();
    }

    /// Flip `toggle` relative to what `harvested` currently shows.
    /// Toggling a color that is already pending removes it.
    pub fn toggle(&mut self, toggle: Override, harvested: &ComputedStyle) {
        match toggle {
            Override::Bold => self.bold = Some(!self.bold.unwrap_or(harvested.bold)),
            Override::Italic => self.italic = Some(!self.italic.unwrap_or(harvested.italic)),
            Override::Underline => {
                self.underline = Some(!self.underline.unwrap_or(harvested.underline))
            }
            Override::Color(c) => {
                self.color = if self.color == Some(c) { None } else { Some(c) };
            }
        }
    }
}

/// How the host should draw the caret.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaretStyle {
    /// Extra horizontal padding, wider for bold text.
    pub padding: f32,
    /// Skew in degrees, non-zero for italic text.
    pub skew_deg: f32,
    pub underline: bool,
    pub color: Rgba,
}

const BOLD_PADDING: f32 = 1.5;
const ITALIC_SKEW_DEG: f32 = 16.0;

impl CaretStyle {
    pub fn resolve(harvested: &ComputedStyle, overrides: &Overrides) -> Self {
        let bold = overrides.bold.unwrap_or(harvested.bold);
        let italic = overrides.italic.unwrap_or(harvested.italic);
        Self {
            padding: if bold { BOLD_PADDING } else { 0.0 },
            skew_deg: if italic { ITALIC_SKEW_DEG } else { 0.0 },
            underline: overrides.underline.unwrap_or(harvested.underline),
            color: overrides.color.unwrap_or(harvested.color),
        }
    }
}
