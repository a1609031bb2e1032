//! Geometry oracle: boundaries to pixel boxes and back.
//!
//! A collapsed range has no glyphs, so its box is derived from a one-step
//! expansion to the right, then to the left, then from the raw (possibly
//! empty) measurement, and finally from the layout box of a neighbouring
//! or containing element. All coordinates are document coordinates.

use core_types::Stride;
use html::boundaries::{self as raw, Boundary};
use html::{NodeKind, Range, Tag};
use layout::{LayoutQuery, Rectangle, union_all};

use crate::View;
use crate::boundaries::is_at_end;
use crate::classifier::{has_linebreaking_style, is_rendered, is_void_type, rendered_char_spans};
use crate::traversing::{next, prev};

/// Decides whether a measured expansion can stand in for a caret position.
pub trait MeasurementPolicy {
    fn is_reliable(&self, rect: &Rectangle, font_size: f32) -> bool;
}

/// Rejects one-step expansions wider than the font size. Some layout
/// engines report the whole line, or a wrapped word, for a single step.
#[derive(Clone, Copy, Debug, Default)]
pub struct FontSizeWidthPolicy;

impl MeasurementPolicy for FontSizeWidthPolicy {
    fn is_reliable(&self, rect: &Rectangle, font_size: f32) -> bool {
        rect.width <= font_size
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TrustMeasurements;

impl MeasurementPolicy for TrustMeasurements {
    fn is_reliable(&self, _rect: &Rectangle, _font_size: f32) -> bool {
        true
    }
}

static DEFAULT_POLICY: FontSizeWidthPolicy = FontSizeWidthPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CaretBox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl CaretBox {
    fn from_rect(r: Rectangle) -> Self {
        Self {
            top: r.y,
            left: r.x,
            width: r.width,
            height: r.height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Half-open: a point on the bottom edge belongs to the next line.
    fn spans_y(&self, y: f32) -> bool {
        self.top <= y && y < self.bottom()
    }

    fn distance_y(&self, y: f32) -> f32 {
        (self.top - y).max(y - self.bottom()).max(0.0)
    }
}

pub struct Geometry<'a> {
    view: View<'a>,
    layout: &'a dyn LayoutQuery,
    policy: &'a dyn MeasurementPolicy,
}

impl<'a> Geometry<'a> {
    pub fn new(view: View<'a>, layout: &'a dyn LayoutQuery) -> Self {
        Self {
            view,
            layout,
            policy: &DEFAULT_POLICY,
        }
    }

    pub fn with_policy(self, policy: &'a dyn MeasurementPolicy) -> Self {
        Self { policy, ..self }
    }

    #[inline]
    pub fn view(&self) -> View<'a> {
        self.view
    }

    #[inline]
    pub fn layout(&self) -> &'a dyn LayoutQuery {
        self.layout
    }

    fn measure(&self, start: Boundary, end: Boundary) -> Option<CaretBox> {
        let range = Range::new(self.view.doc, start, end).ok()?;
        let rects = self.layout.client_rects(self.view.doc, &range);
        union_all(rects.iter()).map(CaretBox::from_rect)
    }

    /// One rendered unit to the right of `b` without leaving its line.
    fn step_right(&self, b: Boundary) -> Boundary {
        let view = self.view;
        let doc = view.doc;
        let mut cur = b;
        loop {
            if let Ok(n) = next(view, cur, Stride::Char) {
                return n;
            }
            if has_linebreaking_style(view, raw::next_node(doc, cur)) {
                return cur;
            }
            if !doc.is_text(cur.container()) {
                if let Some(node) = raw::node_after(doc, cur) {
                    if is_void_type(view, node) && is_rendered(view, node) {
                        return cur.with_offset(cur.offset() + 1);
                    }
                }
            }
            match next(view, cur, Stride::Boundary) {
                Ok(n) => cur = n,
                Err(_) => return cur,
            }
        }
    }

    /// Mirror of [`Self::step_right`].
    fn step_left(&self, b: Boundary) -> Boundary {
        let view = self.view;
        let doc = view.doc;
        let mut cur = b;
        loop {
            if let Ok(p) = prev(view, cur, Stride::Char) {
                return p;
            }
            if has_linebreaking_style(view, raw::prev_node(doc, cur)) {
                return cur;
            }
            if !doc.is_text(cur.container()) {
                if let Some(node) = raw::node_before(doc, cur) {
                    if is_void_type(view, node) && is_rendered(view, node) {
                        return cur.with_offset(cur.offset() - 1);
                    }
                }
            }
            match prev(view, cur, Stride::Boundary) {
                Ok(p) => cur = p,
                Err(_) => return cur,
            }
        }
    }

    fn expand_right(&self, start: Boundary, end: Boundary) -> Option<(Boundary, Boundary)> {
        let view = self.view;
        if raw::is_at_raw_end(view.doc, end)
            || has_linebreaking_style(view, raw::next_node(view.doc, end))
            || is_at_end(view, start)
        {
            return None;
        }
        Some((start, self.step_right(end)))
    }

    fn expand_left(&self, start: Boundary, end: Boundary) -> Option<(Boundary, Boundary)> {
        let view = self.view;
        let doc = view.doc;
        let mut start = start;
        // unrendered nodes right before the caret are not on its line
        while !doc.is_text(start.container()) {
            match raw::node_before(doc, start) {
                Some(node) if !is_rendered(view, node) => start = start.with_offset(start.offset() - 1),
                _ => break,
            }
        }
        if raw::is_at_raw_start(start) || has_linebreaking_style(view, raw::prev_node(doc, start)) {
            return None;
        }
        Some((self.step_left(start), end))
    }

    /// Box of the range `[start, end]`, `None` if nothing measurable is
    /// found. Collapsed ranges report a one unit wide caret.
    pub fn bounds(&self, start: Boundary, end: Boundary) -> Option<CaretBox> {
        if start != end {
            return self.measure(start, end);
        }
        let font_size = self.view.font_size(start.container());
        if let Some(rect) = self.expand_right(start, end).and_then(|(s, e)| self.measure(s, e)) {
            let as_rect = Rectangle::new(rect.left, rect.top, rect.width, rect.height);
            if rect.width > 0.0 && self.policy.is_reliable(&as_rect, font_size) {
                return Some(CaretBox { width: 1.0, ..rect });
            }
            log::trace!(
                target: "visual.geometry",
                "rejected right expansion of {start:?}: width {} at font size {font_size}",
                rect.width
            );
        }
        if let Some(rect) = self.expand_left(start, end).and_then(|(s, e)| self.measure(s, e)) {
            if rect.width > 0.0 {
                return Some(CaretBox {
                    left: rect.right(),
                    width: 1.0,
                    ..rect
                });
            }
        }
        log::trace!(target: "visual.geometry", "measuring {start:?} unexpanded");
        self.measure(start, end)
    }

    /// Caret box of `b`, falling back to layout boxes of neighbouring and
    /// containing elements when nothing can be measured.
    pub fn caret_box(&self, b: Boundary) -> Option<CaretBox> {
        if let Some(found) = self.bounds(b, b) {
            return Some(found);
        }
        let view = self.view;
        let doc = view.doc;
        log::trace!(target: "visual.geometry", "falling back to layout boxes for {b:?}");

        let line_box = |id, r: Rectangle| {
            if has_linebreaking_style(view, id) && !doc.is_tag(id, Tag::Br) {
                view.element_style(id).line_height_px()
            } else {
                r.height
            }
        };
        let after = raw::node_after(doc, b)
            .filter(|&n| doc.is_element(n))
            .and_then(|n| self.layout.element_rect(n).map(|r| (n, r)));
        if let Some((n, r)) = after {
            return Some(CaretBox {
                top: r.y,
                left: r.x,
                width: 1.0,
                height: line_box(n, r),
            });
        }
        let before = raw::node_before(doc, b)
            .filter(|&n| doc.is_element(n))
            .and_then(|n| self.layout.element_rect(n).map(|r| (n, r)));
        if let Some((n, r)) = before {
            return Some(CaretBox {
                top: r.y,
                left: r.right(),
                width: 1.0,
                height: line_box(n, r),
            });
        }

        let container = if doc.is_element(b.container()) {
            b.container()
        } else {
            doc.parent(b.container())?
        };
        let r = self.layout.element_rect(container)?;
        let style = view.element_style(container);
        Some(CaretBox {
            top: r.y + style.box_metrics.padding_top,
            left: r.x + style.box_metrics.padding_left,
            width: 1.0,
            height: style.line_height_px(),
        })
    }

    /// The caret position closest to the document point `(x, y)`.
    ///
    /// Only rendered, editable positions are considered: never inside a
    /// non-editable island or outside an editing host. The row containing
    /// `y` wins, or the nearest row when `y` falls on blank space inside a
    /// host; then the candidate nearest to `x`, ties going to the earlier
    /// position. `None` when `y` lies outside every editing host's box.
    pub fn from_position(&self, x: f32, y: f32) -> Option<Boundary> {
        let hosts: Vec<html::Id> = html::editing_hosts(self.view.doc)
            .into_iter()
            .filter(|&host| {
                self.layout
                    .element_rect(host)
                    .is_some_and(|r| r.y <= y && y < r.bottom())
            })
            .collect();
        if hosts.is_empty() {
            return None;
        }

        let mut candidates = Vec::new();
        let mut reach = 0.0;
        loop {
            let mut pruned = f32::INFINITY;
            for &host in &hosts {
                pruned = pruned.min(self.collect_candidates(host, y, reach, &mut candidates));
            }
            if !candidates.is_empty() || !pruned.is_finite() {
                break;
            }
            log::trace!(
                target: "visual.geometry",
                "no candidates within {reach}px of y {y}, widening to {pruned}"
            );
            reach = pruned;
        }

        let in_row: Vec<&(Boundary, CaretBox)> =
            candidates.iter().filter(|(_, c)| c.spans_y(y)).collect();
        let row = if in_row.is_empty() {
            let nearest = candidates
                .iter()
                .map(|(_, c)| c.distance_y(y))
                .fold(f32::INFINITY, f32::min);
            candidates.iter().filter(|(_, c)| c.distance_y(y) == nearest).collect()
        } else {
            in_row
        };
        let mut best: Option<(Boundary, f32)> = None;
        for (b, caret) in row {
            let dx = (caret.left - x).abs();
            if best.is_none_or(|(_, d)| dx < d) {
                best = Some((*b, dx));
            }
        }
        best.map(|(b, _)| b)
    }

    /// Caret candidates under `host`, skipping blocks whose layout box is
    /// further than `reach` from `y`. Returns the smallest distance among
    /// the skipped blocks.
    fn collect_candidates(
        &self,
        host: html::Id,
        y: f32,
        reach: f32,
        out: &mut Vec<(Boundary, CaretBox)>,
    ) -> f32 {
        let view = self.view;
        let doc = view.doc;
        let mut pruned = f32::INFINITY;
        let mut stack = vec![host];
        while let Some(node) = stack.pop() {
            match doc.kind(node) {
                NodeKind::Text(_) => {
                    if is_rendered(view, node) {
                        self.text_candidates(node, out);
                    }
                }
                NodeKind::Element(data) => {
                    if !is_rendered(view, node) {
                        continue;
                    }
                    if node != host && has_linebreaking_style(view, node) {
                        if let Some(rect) = self.layout.element_rect(node) {
                            let distance = CaretBox::from_rect(rect).distance_y(y);
                            if distance > reach {
                                pruned = pruned.min(distance);
                                continue;
                            }
                        }
                    }
                    let mut push = |b: Boundary| {
                        if let Some(caret) = self.caret_box(b) {
                            out.push((b, caret));
                        }
                    };
                    if node != host && is_void_type(view, node) {
                        push(raw::from_node(doc, node));
                        if data.tag != Tag::Br {
                            push(raw::after_node(doc, node));
                        }
                        continue;
                    }
                    let children = doc.children(node);
                    if has_linebreaking_style(view, node) && !children.iter().any(|&c| is_rendered(view, c)) {
                        push(raw::from_start_of_node(node));
                    }
                    stack.extend(children.iter().rev().copied());
                }
                NodeKind::Comment(_) | NodeKind::Document => {}
            }
        }
        pruned
    }

    /// Candidates at the start of a rendered text node and after each of its
    /// rendered characters. The spans are computed once; a position between
    /// two characters of the node is measured over the character after it.
    fn text_candidates(&self, node: html::Id, out: &mut Vec<(Boundary, CaretBox)>) {
        let view = self.view;
        let spans = rendered_char_spans(view, node);
        let font_size = view.font_size(node);
        let first = Boundary::new(node, 0);
        if let Some(caret) = self.caret_box(first) {
            out.push((first, caret));
        }
        for (i, &(_, end)) in spans.iter().enumerate() {
            let b = Boundary::new(node, end);
            let within = spans
                .get(i + 1)
                .filter(|_| !is_at_end(view, b))
                .and_then(|&(_, next_end)| self.measure(b, Boundary::new(node, next_end)))
                .filter(|rect| {
                    let as_rect = Rectangle::new(rect.left, rect.top, rect.width, rect.height);
                    rect.width > 0.0 && self.policy.is_reliable(&as_rect, font_size)
                });
            let caret = match within {
                Some(rect) => Some(CaretBox { width: 1.0, ..rect }),
                None => self.caret_box(b),
            };
            if let Some(caret) = caret {
                out.push((b, caret));
            }
        }
    }

    /// One box per rendered line covered by `[start, end]`, top to bottom.
    pub fn selection_boxes(&self, start: Boundary, end: Boundary) -> Vec<CaretBox> {
        let Ok(range) = Range::new(self.view.doc, start, end) else {
            return Vec::new();
        };
        let mut rows: Vec<Rectangle> = Vec::new();
        for rect in self.layout.client_rects(self.view.doc, &range) {
            match rows.iter_mut().find(|r| (r.y - rect.y).abs() < 0.5) {
                Some(row) => *row = row.union(&rect),
                None => rows.push(rect),
            }
        }
        rows.sort_by(|a, b| a.y.total_cmp(&b.y));
        rows.into_iter().map(CaretBox::from_rect).collect()
    }
}
