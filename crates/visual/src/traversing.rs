//! Stepping a boundary to its neighbour under a chosen [`Stride`].

use std::fmt;

use core_types::Stride;
use html::boundaries::{self as raw, Boundary};
use html::traverse::{ancestors, contains};
use html::{Id, NodeKind, Tag};
use tools::{classify, is_word_char};

use crate::View;
use crate::boundaries::{expand_backward, expand_forward, is_at_end};
use crate::classifier::{
    has_linebreaking_style, is_rendered, is_rendered_br, is_void_type, rendered_char_spans,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The step would leave the editing host.
    LeftEditingHost,
    /// Nothing to step to at this stride.
    NoTarget,
    /// The boundary is not inside an editing host.
    NotInEditingHost,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::LeftEditingHost => write!(f, "step would leave the editing host"),
            StepError::NoTarget => write!(f, "no position to step to"),
            StepError::NotInEditingHost => write!(f, "boundary is not inside an editing host"),
        }
    }
}

impl std::error::Error for StepError {}

/// Units for [`expand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Word,
    Block,
}

pub fn host_of(view: View<'_>, b: Boundary) -> Result<Id, StepError> {
    view.boundary_host(b).ok_or(StepError::NotInEditingHost)
}

pub fn next(view: View<'_>, b: Boundary, stride: Stride) -> Result<Boundary, StepError> {
    let bound = view.bound(b.container());
    let result = match stride {
        Stride::Char => next_char(view, b).ok_or(StepError::NoTarget),
        Stride::Boundary => {
            let n = raw::next(view.doc, b).ok_or(StepError::NoTarget)?;
            inside(view, n, bound)
        }
        Stride::Visual => next_visual(view, b, bound),
        Stride::Word => next_word(view, b, bound),
    };
    log::trace!(target: "visual.traverse", "next {stride:?} from {b:?}: {result:?}");
    result
}

pub fn prev(view: View<'_>, b: Boundary, stride: Stride) -> Result<Boundary, StepError> {
    let bound = view.bound(b.container());
    let result = match stride {
        Stride::Char => prev_char(view, b).ok_or(StepError::NoTarget),
        Stride::Boundary => {
            let p = raw::prev(view.doc, b).ok_or(StepError::NoTarget)?;
            inside(view, p, bound)
        }
        Stride::Visual => prev_visual(view, b, bound),
        Stride::Word => prev_word(view, b, bound),
    };
    log::trace!(target: "visual.traverse", "prev {stride:?} from {b:?}: {result:?}");
    result
}

fn inside(view: View<'_>, b: Boundary, bound: Id) -> Result<Boundary, StepError> {
    if contains(view.doc, bound, b.container()) {
        Ok(b)
    } else {
        Err(StepError::LeftEditingHost)
    }
}

/// End of the next rendered character in the same text node.
fn next_char(view: View<'_>, b: Boundary) -> Option<Boundary> {
    if !view.doc.is_text(b.container()) {
        return None;
    }
    rendered_char_spans(view, b.container())
        .into_iter()
        .find(|&(start, _)| start >= b.offset())
        .map(|(_, end)| b.with_offset(end))
}

/// Start of the previous rendered character in the same text node.
fn prev_char(view: View<'_>, b: Boundary) -> Option<Boundary> {
    if !view.doc.is_text(b.container()) {
        return None;
    }
    rendered_char_spans(view, b.container())
        .into_iter()
        .rev()
        .find(|&(_, end)| end <= b.offset())
        .map(|(start, _)| b.with_offset(start))
}

fn has_rendered_child(view: View<'_>, id: Id) -> bool {
    view.doc.children(id).iter().any(|&c| is_rendered(view, c))
}

/// One visually distinct caret position to the right.
///
/// `crossed` records that a line break lies between `b` and the walk. Once
/// set, the walk stops at the first position of the new line instead of
/// after its first character.
fn next_visual(view: View<'_>, b: Boundary, bound: Id) -> Result<Boundary, StepError> {
    if let Some(n) = next_char(view, b) {
        return Ok(n);
    }
    let doc = view.doc;
    let mut crossed = false;
    let mut cur = b;
    loop {
        let container = cur.container();
        if doc.is_text(container) || raw::is_at_raw_end(doc, cur) {
            if container == bound || doc.parent(container).is_none() {
                return Err(StepError::LeftEditingHost);
            }
            if has_linebreaking_style(view, container) {
                crossed = true;
            }
            cur = raw::after_node(doc, container);
            continue;
        }
        let Some(node) = raw::node_after(doc, cur) else {
            return Err(StepError::NoTarget);
        };
        let over = cur.with_offset(cur.offset() + 1);
        match doc.kind(node) {
            NodeKind::Text(_) => match rendered_char_spans(view, node).first() {
                Some(&(start, end)) => {
                    return Ok(Boundary::new(node, if crossed { start } else { end }));
                }
                None => cur = over,
            },
            NodeKind::Element(data) if data.tag == Tag::Br => {
                if is_rendered_br(view, node) {
                    if crossed {
                        return Ok(cur);
                    }
                    crossed = true;
                }
                cur = over;
            }
            NodeKind::Element(_) => {
                if !is_rendered(view, node) {
                    cur = over;
                    continue;
                }
                if is_void_type(view, node) {
                    return Ok(if crossed { cur } else { over });
                }
                if has_linebreaking_style(view, node) {
                    crossed = true;
                    if !has_rendered_child(view, node) {
                        return Ok(raw::from_start_of_node(node));
                    }
                }
                cur = raw::from_start_of_node(node);
            }
            NodeKind::Comment(_) | NodeKind::Document => cur = over,
        }
    }
}

/// Mirror of [`next_visual`].
///
/// A rendered `br` that ends its block is a placeholder for an empty last
/// line; it is passed over without counting as a line break.
fn prev_visual(view: View<'_>, b: Boundary, bound: Id) -> Result<Boundary, StepError> {
    if let Some(p) = prev_char(view, b) {
        return Ok(p);
    }
    let doc = view.doc;
    let mut crossed = false;
    let mut cur = b;
    loop {
        let container = cur.container();
        if doc.is_text(container) || raw::is_at_raw_start(cur) {
            if container == bound || doc.parent(container).is_none() {
                return Err(StepError::LeftEditingHost);
            }
            if has_linebreaking_style(view, container) {
                crossed = true;
            }
            cur = raw::from_node(doc, container);
            continue;
        }
        let Some(node) = raw::node_before(doc, cur) else {
            return Err(StepError::NoTarget);
        };
        let over = cur.with_offset(cur.offset() - 1);
        match doc.kind(node) {
            NodeKind::Text(_) => match rendered_char_spans(view, node).last() {
                Some(&(start, end)) => {
                    return Ok(Boundary::new(node, if crossed { end } else { start }));
                }
                None => cur = over,
            },
            NodeKind::Element(data) if data.tag == Tag::Br => {
                if is_rendered_br(view, node) && !(is_at_end(view, cur) && !crossed) {
                    if crossed {
                        return Ok(cur);
                    }
                    crossed = true;
                }
                cur = over;
            }
            NodeKind::Element(_) => {
                if !is_rendered(view, node) {
                    cur = over;
                    continue;
                }
                if is_void_type(view, node) {
                    return Ok(if crossed { cur } else { over });
                }
                if has_linebreaking_style(view, node) {
                    crossed = true;
                    if !has_rendered_child(view, node) {
                        return Ok(raw::from_start_of_node(node));
                    }
                }
                cur = raw::from_end_of_node(doc, node);
            }
            NodeKind::Comment(_) | NodeKind::Document => cur = over,
        }
    }
}

/// Step to the end of the next word.
fn next_word(view: View<'_>, b: Boundary, bound: Id) -> Result<Boundary, StepError> {
    let doc = view.doc;
    let mut cur = b;
    loop {
        if let Some(text) = doc.text(cur.container()) {
            if text[cur.offset()..].chars().any(is_word_char) {
                break;
            }
        }
        let n = next_visual(view, cur, bound)?;
        if !doc.is_text(n.container()) {
            return Ok(n);
        }
        cur = n;
    }
    let text = doc.text(cur.container()).unwrap_or_default();
    let rest = &text[cur.offset()..];
    let skipped: usize = rest
        .chars()
        .take_while(|&c| !is_word_char(c))
        .map(char::len_utf8)
        .sum();
    let word: usize = rest[skipped..]
        .chars()
        .take_while(|&c| is_word_char(c))
        .map(char::len_utf8)
        .sum();
    Ok(cur.with_offset(cur.offset() + skipped + word))
}

/// Step to the start of the previous word.
fn prev_word(view: View<'_>, b: Boundary, bound: Id) -> Result<Boundary, StepError> {
    let doc = view.doc;
    let mut cur = b;
    loop {
        if let Some(text) = doc.text(cur.container()) {
            if text[..cur.offset()].chars().any(is_word_char) {
                break;
            }
        }
        let p = prev_visual(view, cur, bound)?;
        if !doc.is_text(p.container()) {
            return Ok(p);
        }
        cur = p;
    }
    let text = doc.text(cur.container()).unwrap_or_default();
    let head = &text[..cur.offset()];
    let skipped: usize = head
        .chars()
        .rev()
        .take_while(|&c| !is_word_char(c))
        .map(char::len_utf8)
        .sum();
    let word: usize = head[..head.len() - skipped]
        .chars()
        .rev()
        .take_while(|&c| is_word_char(c))
        .map(char::len_utf8)
        .sum();
    Ok(cur.with_offset(cur.offset() - skipped - word))
}

/// Move `b` forward over zero-width characters.
pub fn envelope_invisible_characters(view: View<'_>, b: Boundary) -> Boundary {
    let Some(text) = view.doc.text(b.container()) else {
        return b;
    };
    let skipped: usize = text[b.offset()..]
        .chars()
        .take_while(|&c| tools::is_zero_width(c))
        .map(char::len_utf8)
        .sum();
    b.with_offset(b.offset() + skipped)
}

/// Grow `[start, end]` to cover the enclosing `unit`.
///
/// Words stay inside one text node and cover the run of characters sharing
/// the class of the character under `start`. Blocks cover the rendered
/// content of the nearest line-breaking ancestor.
pub fn expand(view: View<'_>, start: Boundary, end: Boundary, unit: Unit) -> (Boundary, Boundary) {
    let doc = view.doc;
    match unit {
        Unit::Word => {
            let Some(text) = doc.text(start.container()) else {
                return (start, end);
            };
            let Some(class) = tools::char_after(text, start.offset())
                .or_else(|| tools::char_before(text, start.offset()))
                .map(classify)
            else {
                return (start, end);
            };
            let same = |c: char| classify(c) == class;
            let back: usize = text[..start.offset()]
                .chars()
                .rev()
                .take_while(|&c| same(c))
                .map(char::len_utf8)
                .sum();
            let end = if end.container() == start.container() { end } else { start };
            let ahead: usize = text[end.offset()..]
                .chars()
                .take_while(|&c| same(c))
                .map(char::len_utf8)
                .sum();
            (
                start.with_offset(start.offset() - back),
                end.with_offset(end.offset() + ahead),
            )
        }
        Unit::Block => {
            let host = view.bound(start.container());
            let block = std::iter::once(start.container())
                .chain(ancestors(doc, start.container()))
                .take_while(|&n| contains(doc, host, n))
                .find(|&n| has_linebreaking_style(view, n) && !doc.is_tag(n, Tag::Br))
                .unwrap_or(host);
            (
                expand_forward(view, raw::from_start_of_node(block)),
                expand_backward(view, raw::from_end_of_node(doc, block)),
            )
        }
    }
}
