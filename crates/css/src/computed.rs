use html::{Document, Id, NodeKind, Tag};

use crate::values::{Display, Length, WhiteSpace, parse_color, parse_display, parse_length, parse_white_space};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMetrics {
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,

    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,
}

impl BoxMetrics {
    pub const fn zero() -> Self {
        BoxMetrics {
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            padding_top: 0.0,
            padding_right: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
        }
    }
}

/// `line-height: normal` as a multiple of the font size.
pub const NORMAL_LINE_HEIGHT: f32 = 1.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Inherited. Initial: black.
    pub color: (u8, u8, u8, u8),

    /// Inherited. Initial: 16px.
    pub font_size: Length,

    /// Inherited. `None` means `normal`, left to the text measurer.
    pub line_height: Option<Length>,

    /// Inherited.
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,

    /// Inherited. Initial: normal.
    pub white_space: WhiteSpace,

    /// Not inherited. Per-tag defaults are applied when nothing is specified.
    pub display: Display,

    pub box_metrics: BoxMetrics,

    /// Not inherited, `px` only.
    pub width: Option<Length>,
    pub height: Option<Length>,
}

impl ComputedStyle {
    pub const INITIAL: ComputedStyle = ComputedStyle {
        color: (0, 0, 0, 255),
        font_size: Length::Px(16.0),
        line_height: None,
        bold: false,
        italic: false,
        underline: false,
        white_space: WhiteSpace::Normal,
        display: Display::Block,
        box_metrics: BoxMetrics::zero(),
        width: None,
        height: None,
    };

    pub fn initial() -> Self {
        Self::INITIAL
    }

    #[inline]
    pub fn font_px(&self) -> f32 {
        self.font_size.px()
    }

    /// Used line height in px, resolving `normal`.
    pub fn line_height_px(&self) -> f32 {
        self.line_height
            .map_or(self.font_px() * NORMAL_LINE_HEIGHT, Length::px)
    }

    /// Style for text and comment children: everything inherited, inline.
    pub fn inherit_for_text(parent: &ComputedStyle) -> Self {
        let mut style = inherited_from(parent);
        style.display = Display::Inline;
        style
    }
}

fn inherited_from(parent: &ComputedStyle) -> ComputedStyle {
    ComputedStyle {
        color: parent.color,
        font_size: parent.font_size,
        line_height: parent.line_height,
        bold: parent.bold,
        italic: parent.italic,
        underline: parent.underline,
        white_space: parent.white_space,
        ..ComputedStyle::INITIAL
    }
}

/// Compute the style for an element from its specified declarations and
/// its parent's computed style. Property names are expected lowercase.
pub fn compute_style(specified: &[(String, String)], parent: Option<&ComputedStyle>) -> ComputedStyle {
    let mut result = parent.map(inherited_from).unwrap_or(ComputedStyle::INITIAL);

    for (name, value) in specified {
        let value = value.as_str();
        let px = || parse_length(value).map(Length::px);
        let metrics = &mut result.box_metrics;

        match name.as_str() {
            "color" => {
                if let Some(rgba) = parse_color(value) {
                    result.color = rgba;
                }
            }
            "font-size" => {
                if let Some(len) = parse_length(value) {
                    result.font_size = len;
                }
            }
            "line-height" => {
                if value.trim().eq_ignore_ascii_case("normal") {
                    result.line_height = None;
                } else if let Some(len) = parse_length(value) {
                    result.line_height = Some(len);
                } else if let Ok(factor) = value.trim().parse::<f32>() {
                    if factor.is_finite() && factor > 0.0 {
                        result.line_height = Some(Length::Px(factor * result.font_size.px()));
                    }
                }
            }
            "font-weight" => {
                let v = value.trim().to_ascii_lowercase();
                result.bold = match v.as_str() {
                    "bold" | "bolder" => true,
                    "normal" | "lighter" => false,
                    numeric => numeric.parse::<u16>().map(|w| w >= 600).unwrap_or(result.bold),
                };
            }
            "font-style" => {
                let v = value.trim().to_ascii_lowercase();
                result.italic = v == "italic" || v == "oblique";
            }
            "text-decoration" | "text-decoration-line" => {
                result.underline = value.to_ascii_lowercase().contains("underline");
            }
            "white-space" => {
                if let Some(ws) = parse_white_space(value) {
                    result.white_space = ws;
                }
            }
            "display" => {
                if let Some(d) = parse_display(value) {
                    result.display = d;
                }
            }

            "margin" => {
                if let Some(px) = px() {
                    metrics.margin_top = px;
                    metrics.margin_right = px;
                    metrics.margin_bottom = px;
                    metrics.margin_left = px;
                }
            }
            "margin-top" => metrics.margin_top = px().unwrap_or(metrics.margin_top),
            "margin-right" => metrics.margin_right = px().unwrap_or(metrics.margin_right),
            "margin-bottom" => metrics.margin_bottom = px().unwrap_or(metrics.margin_bottom),
            "margin-left" => metrics.margin_left = px().unwrap_or(metrics.margin_left),

            "padding" => {
                if let Some(px) = px() {
                    metrics.padding_top = px;
                    metrics.padding_right = px;
                    metrics.padding_bottom = px;
                    metrics.padding_left = px;
                }
            }
            "padding-top" => metrics.padding_top = px().unwrap_or(metrics.padding_top),
            "padding-right" => metrics.padding_right = px().unwrap_or(metrics.padding_right),
            "padding-bottom" => metrics.padding_bottom = px().unwrap_or(metrics.padding_bottom),
            "padding-left" => metrics.padding_left = px().unwrap_or(metrics.padding_left),

            "width" => result.width = parse_length(value),
            "height" => result.height = parse_length(value),
            _ => {
                // unsupported property: ignored
            }
        }
    }

    result
}

/// Default `display` of an element when no declaration says otherwise.
pub fn default_display_for(tag: Tag) -> Display {
    if tag.is_non_rendering() {
        return Display::None;
    }
    match tag {
        Tag::Li => Display::ListItem,
        Tag::Table => Display::Table,
        Tag::Tr => Display::TableRow,
        Tag::Td | Tag::Th => Display::TableCell,
        Tag::Img | Tag::Br | Tag::Wbr => Display::Inline,
        Tag::Input | Tag::Button | Tag::Select | Tag::Textarea | Tag::Keygen => Display::InlineBlock,
        Tag::Html
        | Tag::Body
        | Tag::Dt
        | Tag::Nav
        | Tag::Main
        | Tag::Menu
        | Tag::Caption
        | Tag::Tbody
        | Tag::Thead
        | Tag::Colgroup => Display::Block,
        tag if tag.is_block_level() => Display::Block,
        _ => Display::Inline,
    }
}

/// Presentational defaults a tag implies before its own declarations apply.
fn apply_tag_defaults(tag: Tag, style: &mut ComputedStyle) {
    match tag {
        Tag::Pre => style.white_space = WhiteSpace::Pre,
        Tag::B | Tag::Strong | Tag::Th => style.bold = true,
        Tag::I | Tag::Em | Tag::Cite | Tag::Var | Tag::Dfn => style.italic = true,
        Tag::U | Tag::Ins => style.underline = true,
        tag if tag.is_heading() => style.bold = true,
        _ => {}
    }
}

/// Computed styles for every node of a document, indexed by [`Id`].
#[derive(Clone, Debug)]
pub struct StyleMap {
    styles: Vec<ComputedStyle>,
}

impl StyleMap {
    /// One pass in arena order. Parents are always created before their
    /// children, so each parent style is ready when a child needs it.
    pub fn compute(doc: &Document) -> Self {
        let mut styles: Vec<ComputedStyle> = Vec::with_capacity(doc.node_count());
        for id in doc.ids() {
            let parent = doc.parent(id).and_then(|p| styles.get(p.index())).copied();
            let style = match doc.kind(id) {
                NodeKind::Document => ComputedStyle::INITIAL,
                NodeKind::Element(element) => {
                    let has_display = element.style.iter().any(|(name, _)| name == "display");
                    let mut base = parent.map(|p| inherited_from(&p)).unwrap_or(ComputedStyle::INITIAL);
                    apply_tag_defaults(element.tag, &mut base);
                    let mut computed = compute_style(&element.style, Some(&base));
                    if !has_display {
                        computed.display = default_display_for(element.tag);
                    }
                    computed
                }
                NodeKind::Text(_) | NodeKind::Comment(_) => {
                    ComputedStyle::inherit_for_text(&parent.unwrap_or(ComputedStyle::INITIAL))
                }
            };
            styles.push(style);
        }
        log::trace!(target: "css.computed", "computed {} styles", styles.len());
        Self { styles }
    }

    /// Style of `id`; nodes created after the map was computed read as initial.
    pub fn get(&self, id: Id) -> &ComputedStyle {
        self.styles.get(id.index()).unwrap_or(&ComputedStyle::INITIAL)
    }

    /// Install an externally computed style for `id`.
    pub fn set(&mut self, id: Id, style: ComputedStyle) {
        let index = id.index();
        if index >= self.styles.len() {
            self.styles.resize(index + 1, ComputedStyle::INITIAL);
        }
        self.styles[index] = style;
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
