use css::ComputedStyle;

/// Text metrics, independent of any graphics backend.
pub trait TextMeasurer {
    /// Width of `text` in CSS px when rendered with `style`.
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32;

    /// Line height in CSS px for `style`.
    fn line_height(&self, style: &ComputedStyle) -> f32;
}

/// Fixed-advance measurer: every visible char is `font_size * advance`
/// wide, zero-width marks take no space. `normal` line height is
/// `font_size * line_ratio`.
///
/// With the defaults a 16px font gives 10px advances and 20px lines.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasurer {
    pub advance: f32,
    pub line_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.625,
            line_ratio: css::NORMAL_LINE_HEIGHT,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32 {
        let visible = text.chars().filter(|&c| !tools::is_zero_width(c)).count();
        visible as f32 * style.font_px() * self.advance
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        match style.line_height {
            Some(len) => len.px(),
            None => style.font_px() * self.line_ratio,
        }
    }
}
