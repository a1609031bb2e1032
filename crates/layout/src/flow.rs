use css::{ComputedStyle, Display, StyleMap};
use html::boundaries::{after_node, compare_boundaries, from_node};
use html::traverse::next_in_preorder;
use html::{Boundary, Document, Id, NodeKind, Range, Tag};
use std::cmp::Ordering;

use crate::{LayoutQuery, Rectangle, TextMeasurer, union_all};

#[derive(Clone, Copy, Debug)]
pub struct FlowOptions {
    /// Width of the initial containing block.
    pub width: f32,
    /// Size of replaced elements without `width`/`height`.
    pub default_replaced_size: (f32, f32),
    /// Height of block-level voids such as `hr`.
    pub rule_height: f32,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            default_replaced_size: (16.0, 16.0),
            rule_height: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Glyph {
    start: usize,
    end: usize,
    /// `None` for collapsed whitespace and line terminators.
    rect: Option<Rectangle>,
}

/// Block and inline flow over a document snapshot.
///
/// Blocks stack vertically with their margins and padding; inline content
/// fills lines left to right. Whitespace collapses according to
/// `white-space`, a `br` ends its line without opening an empty one when
/// nothing follows it, and words wrap at the available width.
///
/// Rectangles are kept per character for text and per node for elements,
/// so the layout answers [`LayoutQuery`] directly.
#[derive(Clone, Debug, Default)]
pub struct FlowLayout {
    boxes: Vec<Option<Rectangle>>,
    glyphs: Vec<Vec<Glyph>>,
    scroll: (f32, f32),
    height: f32,
}

impl FlowLayout {
    pub fn compute(
        doc: &Document,
        styles: &StyleMap,
        measurer: &dyn TextMeasurer,
        options: FlowOptions,
    ) -> Self {
        let n = doc.node_count();
        let mut builder = Builder {
            doc,
            styles,
            measurer,
            options,
            boxes: vec![None; n],
            glyphs: vec![Vec::new(); n],
            struts: vec![None; n],
        };
        let height = builder.layout_block(doc.root(), 0.0, 0.0, options.width);
        builder.resolve_inline_boxes();
        log::trace!(target: "layout.flow", "laid out {n} nodes, content height {height}");
        FlowLayout {
            boxes: builder.boxes,
            glyphs: builder.glyphs,
            scroll: (0.0, 0.0),
            height,
        }
    }

    pub fn with_scroll(mut self, x: f32, y: f32) -> Self {
        self.scroll = (x, y);
        self
    }

    pub fn content_height(&self) -> f32 {
        self.height
    }

    /// Rectangle of the character that starts at `offset` in text node `id`.
    pub fn glyph_rect(&self, id: Id, offset: usize) -> Option<Rectangle> {
        self.glyphs
            .get(id.index())?
            .iter()
            .find(|g| g.start == offset)
            .and_then(|g| g.rect)
    }
}

impl LayoutQuery for FlowLayout {
    fn client_rects(&self, doc: &Document, range: &Range) -> Vec<Rectangle> {
        let (start, end) = (range.start(), range.end());
        let mut out = Vec::new();
        // preorder from the start container; nodes past `end` cannot overlap
        let mut next = Some(start.container());
        while let Some(id) = next {
            next = next_in_preorder(doc, id, doc.root());
            if compare_boundaries(doc, from_node(doc, id), end) == Ordering::Greater {
                break;
            }
            match doc.kind(id) {
                NodeKind::Text(text) => {
                    let glyphs = &self.glyphs[id.index()];
                    if glyphs.iter().all(|g| g.rect.is_none()) {
                        continue;
                    }
                    let first = Boundary::new(id, 0);
                    let last = Boundary::new(id, text.len());
                    if compare_boundaries(doc, last, start) == Ordering::Less
                        || compare_boundaries(doc, first, end) == Ordering::Greater
                    {
                        continue;
                    }
                    let lo = if start.container() == id { start.offset() } else { 0 };
                    let hi = if end.container() == id { end.offset() } else { text.len() };
                    out.extend(
                        glyphs
                            .iter()
                            .filter(|g| g.start >= lo && g.end <= hi)
                            .filter_map(|g| g.rect),
                    );
                }
                NodeKind::Element(data) if data.tag.is_void() && data.tag != Tag::Br => {
                    let Some(rect) = self.boxes[id.index()] else {
                        continue;
                    };
                    if compare_boundaries(doc, from_node(doc, id), start) != Ordering::Less
                        && compare_boundaries(doc, after_node(doc, id), end) != Ordering::Greater
                    {
                        out.push(rect);
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn element_rect(&self, id: Id) -> Option<Rectangle> {
        self.boxes.get(id.index()).copied().flatten()
    }

    fn scroll_offset(&self) -> (f32, f32) {
        self.scroll
    }
}

fn is_block_display(display: Display) -> bool {
    matches!(
        display,
        Display::Block | Display::ListItem | Display::Table | Display::TableRow | Display::TableCell
    )
}

enum Placed {
    Glyph(Id, usize),
    Box(Id, f32),
    Break(Id),
}

/// The open inline formatting context of one block.
struct Line {
    x0: f32,
    width: f32,
    top: f32,
    strut: f32,
    cursor_x: f32,
    height: f32,
    items: Vec<Placed>,
    /// At least one line has been started.
    opened: bool,
    has_content: bool,
    /// A forced break was seen; the next placed item starts a new line.
    pending_break: bool,
    last_was_space: bool,
    /// The last placed item, if it is a collapsible space.
    trailing_space: Option<(Id, usize)>,
}

impl Line {
    fn new(x0: f32, top: f32, width: f32, strut: f32) -> Self {
        Self {
            x0,
            width,
            top,
            strut,
            cursor_x: x0,
            height: strut,
            items: Vec::new(),
            opened: false,
            has_content: false,
            pending_break: false,
            last_was_space: true,
            trailing_space: None,
        }
    }

    fn at_line_start(&self) -> bool {
        self.pending_break || !self.has_content
    }

    fn must_wrap(&self, width: f32) -> bool {
        self.has_content && !self.pending_break && self.cursor_x + width > self.x0 + self.width + 0.01
    }
}

struct Builder<'a> {
    doc: &'a Document,
    styles: &'a StyleMap,
    measurer: &'a dyn TextMeasurer,
    options: FlowOptions,
    boxes: Vec<Option<Rectangle>>,
    glyphs: Vec<Vec<Glyph>>,
    /// Zero-width placeholder boxes for inline elements, taken on entry.
    struts: Vec<Option<Rectangle>>,
}

impl Builder<'_> {
    /// Lay out a block and its content at `(x, y)`. Returns the outer height
    /// including vertical margins.
    fn layout_block(&mut self, id: Id, x: f32, y: f32, width: f32) -> f32 {
        let doc = self.doc;
        let style = *self.styles.get(id);
        let m = style.box_metrics;
        let top = y + m.margin_top;
        let content_x = x + m.margin_left + m.padding_left;
        let content_width =
            (width - m.margin_left - m.margin_right - m.padding_left - m.padding_right).max(0.0);
        let mut cursor_y = top + m.padding_top;
        let mut line: Option<Line> = None;

        for &child in doc.children(id) {
            match doc.kind(child) {
                NodeKind::Comment(_) | NodeKind::Document => continue,
                NodeKind::Element(_) => {
                    let display = self.styles.get(child).display;
                    if display == Display::None {
                        continue;
                    }
                    if is_block_display(display) {
                        if let Some(mut open) = line.take() {
                            cursor_y = self.finish_line(&mut open);
                        }
                        cursor_y += self.layout_block(child, content_x, cursor_y, content_width);
                        continue;
                    }
                }
                NodeKind::Text(_) => {}
            }
            let open = line.get_or_insert_with(|| {
                Line::new(content_x, cursor_y, content_width, self.measurer.line_height(&style))
            });
            self.layout_inline(child, open);
        }
        if let Some(mut open) = line.take() {
            cursor_y = self.finish_line(&mut open);
        }

        let is_void = doc.tag(id).is_some_and(|t| t.is_void());
        let flowed = cursor_y - (top + m.padding_top);
        let content_height = match style.height {
            Some(h) => h.px(),
            None if is_void => self.options.rule_height,
            // list items and cells render even when empty
            None if flowed == 0.0 && doc.tag(id).is_some_and(|t| t.is_grouped()) => {
                self.measurer.line_height(&style)
            }
            None => flowed,
        };
        let height = m.padding_top + content_height + m.padding_bottom;
        self.boxes[id.index()] = Some(Rectangle::new(
            x + m.margin_left,
            top,
            (width - m.margin_left - m.margin_right).max(0.0),
            height,
        ));
        m.margin_top + height + m.margin_bottom
    }

    fn layout_inline(&mut self, id: Id, line: &mut Line) {
        let doc = self.doc;
        let tag = match doc.kind(id) {
            NodeKind::Text(_) => return self.layout_text(id, line),
            NodeKind::Element(data) => data.tag,
            NodeKind::Comment(_) | NodeKind::Document => return,
        };
        let style = *self.styles.get(id);
        if style.display == Display::None {
            return;
        }
        match tag {
            Tag::Br => self.place_break(line, id),
            Tag::Wbr => {}
            tag if tag.is_void() => {
                let (w, h) = self.replaced_size(id, &style);
                let wraps = doc
                    .parent(id)
                    .is_none_or(|p| self.styles.get(p).white_space.wraps());
                if wraps && line.must_wrap(w) {
                    self.advance_line(line);
                }
                self.place_box(line, id, w, h);
            }
            _ => {
                let (x, y) = if line.pending_break {
                    (line.x0, line.top + line.height)
                } else {
                    (line.cursor_x, line.top)
                };
                self.struts[id.index()] = Some(Rectangle::new(x, y, 0.0, line.strut));
                for &child in doc.children(id) {
                    self.layout_inline(child, line);
                }
            }
        }
    }

    fn replaced_size(&self, id: Id, style: &ComputedStyle) -> (f32, f32) {
        let (default_w, default_h) = self.options.default_replaced_size;
        let attr = |name: &str| self.doc.attr(id, name).and_then(|v| v.trim().parse::<f32>().ok());
        let width = style.width.map(|l| l.px()).or_else(|| attr("width")).unwrap_or(default_w);
        let height = style.height.map(|l| l.px()).or_else(|| attr("height")).unwrap_or(default_h);
        (width, height)
    }

    fn layout_text(&mut self, id: Id, line: &mut Line) {
        let doc = self.doc;
        let Some(text) = doc.text(id) else {
            return;
        };
        let style = *self.styles.get(id);
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        self.glyphs[id.index()] = chars
            .iter()
            .map(|&(start, c)| Glyph {
                start,
                end: start + c.len_utf8(),
                rect: None,
            })
            .collect();

        let mut i = 0;
        while i < chars.len() {
            let space = tools::is_breaking_whitespace(chars[i].1);
            let run_end = (i..chars.len())
                .find(|&k| tools::is_breaking_whitespace(chars[k].1) != space)
                .unwrap_or(chars.len());
            if space {
                self.layout_space_run(id, line, &chars, i..run_end, &style);
            } else {
                let end_byte = chars.get(run_end).map_or(text.len(), |&(b, _)| b);
                let word = &text[chars[i].0..end_byte];
                let width = self.measurer.measure(word, &style);
                if style.white_space.wraps() && line.must_wrap(width) {
                    self.advance_line(line);
                }
                for k in i..run_end {
                    let g = self.glyphs[id.index()][k];
                    let w = self.measurer.measure(&text[g.start..g.end], &style);
                    self.place_glyph(line, id, k, w, false);
                }
            }
            i = run_end;
        }
    }

    fn layout_space_run(
        &mut self,
        id: Id,
        line: &mut Line,
        chars: &[(usize, char)],
        run: std::ops::Range<usize>,
        style: &ComputedStyle,
    ) {
        let ws = style.white_space;
        for k in run {
            let c = chars[k].1;
            if tools::is_line_terminator(c) && ws.preserves_newlines() {
                if c == '\n' {
                    self.place_forced_break(line);
                }
                continue;
            }
            if ws.preserves_spaces() {
                let w = if c == '\t' {
                    self.measurer.measure("    ", style)
                } else {
                    self.measurer.measure(" ", style)
                };
                self.place_glyph(line, id, k, w, false);
                continue;
            }
            if line.at_line_start() || line.last_was_space {
                continue;
            }
            let w = self.measurer.measure(" ", style);
            self.place_glyph(line, id, k, w, true);
        }
    }

    fn open_line(&mut self, line: &mut Line) {
        if line.pending_break {
            line.pending_break = false;
            self.advance_line(line);
        }
        line.opened = true;
    }

    fn advance_line(&mut self, line: &mut Line) {
        self.trim_trailing_space(line);
        self.close_line(line);
        line.top += line.height;
        line.cursor_x = line.x0;
        line.height = line.strut;
        line.items.clear();
        line.has_content = false;
        line.last_was_space = true;
    }

    /// Final vertical placement of everything on the current line.
    fn close_line(&mut self, line: &Line) {
        for item in &line.items {
            match *item {
                Placed::Glyph(text, index) => {
                    if let Some(r) = self.glyphs[text.index()][index].rect.as_mut() {
                        r.y = line.top;
                        r.height = line.height;
                    }
                }
                Placed::Box(id, h) => {
                    if let Some(r) = self.boxes[id.index()].as_mut() {
                        r.y = line.top + line.height - h;
                        r.height = h;
                    }
                }
                Placed::Break(id) => {
                    if let Some(r) = self.boxes[id.index()].as_mut() {
                        r.y = line.top;
                        r.height = line.height;
                    }
                }
            }
        }
    }

    fn trim_trailing_space(&mut self, line: &mut Line) {
        let Some((text, index)) = line.trailing_space.take() else {
            return;
        };
        if let Some(rect) = self.glyphs[text.index()][index].rect.take() {
            line.cursor_x -= rect.width;
        }
        line.items
            .retain(|p| !matches!(p, Placed::Glyph(t, i) if *t == text && *i == index));
    }

    fn place_glyph(&mut self, line: &mut Line, text: Id, index: usize, width: f32, collapsible: bool) {
        self.open_line(line);
        self.glyphs[text.index()][index].rect =
            Some(Rectangle::new(line.cursor_x, line.top, width, line.height));
        line.cursor_x += width;
        line.items.push(Placed::Glyph(text, index));
        line.has_content = true;
        line.trailing_space = collapsible.then_some((text, index));
        line.last_was_space = collapsible;
    }

    fn place_box(&mut self, line: &mut Line, id: Id, width: f32, height: f32) {
        self.open_line(line);
        self.boxes[id.index()] = Some(Rectangle::new(line.cursor_x, line.top, width, height));
        line.height = line.height.max(height);
        line.cursor_x += width;
        line.items.push(Placed::Box(id, height));
        line.has_content = true;
        line.trailing_space = None;
        line.last_was_space = false;
    }

    fn place_break(&mut self, line: &mut Line, id: Id) {
        self.open_line(line);
        self.trim_trailing_space(line);
        self.boxes[id.index()] = Some(Rectangle::new(line.cursor_x, line.top, 0.0, line.height));
        line.items.push(Placed::Break(id));
        line.has_content = true;
        line.pending_break = true;
        line.last_was_space = true;
    }

    fn place_forced_break(&mut self, line: &mut Line) {
        self.open_line(line);
        self.trim_trailing_space(line);
        line.has_content = true;
        line.pending_break = true;
        line.last_was_space = true;
    }

    /// Close the inline context. Returns the bottom of the last line, or the
    /// context's top if nothing was placed.
    fn finish_line(&mut self, line: &mut Line) -> f32 {
        self.trim_trailing_space(line);
        if !line.opened {
            return line.top;
        }
        self.close_line(line);
        line.top + line.height
    }

    /// Inline elements cover their content; empty ones keep their strut.
    fn resolve_inline_boxes(&mut self) {
        let ids: Vec<Id> = self.doc.ids().collect();
        for &id in ids.iter().rev() {
            if self.boxes[id.index()].is_some() || !self.doc.is_element(id) {
                continue;
            }
            let mut rects: Vec<Rectangle> = Vec::new();
            for &child in self.doc.children(id) {
                if self.doc.is_text(child) {
                    rects.extend(self.glyphs[child.index()].iter().filter_map(|g| g.rect));
                } else if let Some(r) = self.boxes[child.index()] {
                    rects.push(r);
                }
            }
            self.boxes[id.index()] = union_all(rects.iter()).or(self.struts[id.index()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonospaceMeasurer;
    use css::attach_inline_styles;
    use html::DocumentBuilder;

    fn layout(doc: &mut Document, width: f32) -> FlowLayout {
        attach_inline_styles(doc);
        let styles = StyleMap::compute(doc);
        FlowLayout::compute(
            doc,
            &styles,
            &MonospaceMeasurer::default(),
            FlowOptions {
                width,
                ..FlowOptions::default()
            },
        )
    }

    fn paragraphs(texts: &[&str]) -> (Document, Vec<Id>) {
        let mut b = DocumentBuilder::new();
        let mut ids = Vec::new();
        for t in texts {
            b.open("p");
            ids.push(b.text(t));
            b.close();
        }
        (b.finish(), ids)
    }

    #[test]
    fn blocks_stack_and_glyphs_advance() {
        let (mut doc, ids) = paragraphs(&["foo", "bar"]);
        let flow = layout(&mut doc, 800.0);
        assert_eq!(flow.glyph_rect(ids[0], 1), Some(Rectangle::new(10.0, 0.0, 10.0, 20.0)));
        assert_eq!(flow.glyph_rect(ids[1], 0), Some(Rectangle::new(0.0, 20.0, 10.0, 20.0)));
        assert_eq!(flow.content_height(), 40.0);
    }

    #[test]
    fn interior_whitespace_collapses_to_one_space() {
        let (mut doc, ids) = paragraphs(&["a   b"]);
        let flow = layout(&mut doc, 800.0);
        let t = ids[0];
        assert_eq!(flow.glyph_rect(t, 1).map(|r| r.x), Some(10.0));
        assert_eq!(flow.glyph_rect(t, 2), None);
        assert_eq!(flow.glyph_rect(t, 3), None);
        assert_eq!(flow.glyph_rect(t, 4).map(|r| r.x), Some(20.0));
    }

    #[test]
    fn leading_and_trailing_whitespace_is_dropped() {
        let (mut doc, ids) = paragraphs(&["  ab  "]);
        let flow = layout(&mut doc, 800.0);
        let t = ids[0];
        assert_eq!(flow.glyph_rect(t, 0), None);
        assert_eq!(flow.glyph_rect(t, 2).map(|r| r.x), Some(0.0));
        assert_eq!(flow.glyph_rect(t, 4), None);
    }

    #[test]
    fn trailing_br_does_not_open_a_line() {
        let mut b = DocumentBuilder::new();
        let p1 = b.open("p");
        b.text("foo");
        let br = b.open("br");
        b.close();
        b.open("p");
        let bar = b.text("bar");
        b.close();
        let mut doc = b.finish();
        let flow = layout(&mut doc, 800.0);

        assert_eq!(flow.element_rect(p1).map(|r| r.height), Some(20.0));
        assert_eq!(flow.glyph_rect(bar, 0).map(|r| r.y), Some(20.0));
        assert_eq!(flow.element_rect(br), Some(Rectangle::new(30.0, 0.0, 0.0, 20.0)));
    }

    #[test]
    fn consecutive_brs_make_lines() {
        let mut b = DocumentBuilder::new();
        let p = b.open("p");
        b.open("br");
        b.open("br");
        b.close();
        let empty = b.open("p");
        b.close();
        let mut doc = b.finish();
        let flow = layout(&mut doc, 800.0);
        assert_eq!(flow.element_rect(p).map(|r| r.height), Some(40.0));
        assert_eq!(flow.element_rect(empty).map(|r| r.height), Some(0.0));
    }

    #[test]
    fn empty_list_items_keep_a_line() {
        let mut b = DocumentBuilder::new();
        b.open("ul");
        b.open("li");
        b.text("a");
        b.close();
        let empty = b.open("li");
        b.close();
        b.close();
        b.open("p");
        let x = b.text("x");
        b.close();
        let mut doc = b.finish();
        let flow = layout(&mut doc, 800.0);
        assert_eq!(flow.element_rect(empty), Some(Rectangle::new(0.0, 20.0, 800.0, 20.0)));
        assert_eq!(flow.glyph_rect(x, 0).map(|r| r.y), Some(40.0));
    }

    #[test]
    fn words_wrap_and_the_break_space_collapses() {
        let (mut doc, ids) = paragraphs(&["foo bar"]);
        let flow = layout(&mut doc, 50.0);
        let t = ids[0];
        assert_eq!(flow.glyph_rect(t, 3), None);
        assert_eq!(flow.glyph_rect(t, 4), Some(Rectangle::new(0.0, 20.0, 10.0, 20.0)));
    }

    #[test]
    fn pre_keeps_spaces_and_breaks_on_newlines() {
        let mut b = DocumentBuilder::new();
        b.open("pre");
        let t = b.text("a  b\nc");
        b.close();
        let mut doc = b.finish();
        let flow = layout(&mut doc, 800.0);
        assert_eq!(flow.glyph_rect(t, 2).map(|r| r.x), Some(20.0));
        assert_eq!(flow.glyph_rect(t, 4), None);
        assert_eq!(flow.glyph_rect(t, 5), Some(Rectangle::new(0.0, 20.0, 10.0, 20.0)));
    }

    #[test]
    fn inline_elements_cover_their_content() {
        let mut b = DocumentBuilder::new();
        b.open("p");
        b.text("ab");
        let bold = b.open("b");
        b.text("cd");
        b.close();
        let empty = b.open("i");
        b.close();
        b.close();
        let mut doc = b.finish();
        let flow = layout(&mut doc, 800.0);
        assert_eq!(flow.element_rect(bold), Some(Rectangle::new(20.0, 0.0, 20.0, 20.0)));
        assert_eq!(flow.element_rect(empty), Some(Rectangle::new(40.0, 0.0, 0.0, 20.0)));
    }

    #[test]
    fn client_rects_cover_range_content() {
        let mut b = DocumentBuilder::new();
        b.open("p");
        let foo = b.text("foo");
        let img = b.open_with("img", vec![("width".into(), Some("30".into()))]);
        let bar = b.text("bar");
        b.close();
        let mut doc = b.finish();
        let flow = layout(&mut doc, 800.0);

        let one = Range::new(&doc, Boundary::new(foo, 1), Boundary::new(foo, 2)).unwrap();
        assert_eq!(flow.client_rects(&doc, &one), vec![Rectangle::new(10.0, 0.0, 10.0, 20.0)]);

        let across = Range::new(&doc, Boundary::new(foo, 2), Boundary::new(bar, 1)).unwrap();
        let rects = flow.client_rects(&doc, &across);
        assert_eq!(rects.len(), 3);
        assert_eq!(union_all(rects.iter()), Some(Rectangle::new(20.0, 0.0, 50.0, 20.0)));
        assert_eq!(flow.element_rect(img).map(|r| r.width), Some(30.0));

        let collapsed = Range::collapsed(Boundary::new(foo, 1));
        assert!(flow.client_rects(&doc, &collapsed).is_empty());

        let tail = Range::new(&doc, Boundary::new(bar, 1), Boundary::new(bar, 3)).unwrap();
        let rects = flow.client_rects(&doc, &tail);
        assert_eq!(union_all(rects.iter()), Some(Rectangle::new(70.0, 0.0, 20.0, 20.0)));
    }
}
