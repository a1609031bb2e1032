//! Rendering-aware boundary predicates.
//!
//! The structural versions in [`html::boundaries`] answer "is the offset
//! maximal"; these answer "does anything visible follow".

use css::WhiteSpace;
use html::boundaries::{self as raw, Boundary};
use html::NodeKind;

use crate::View;
use crate::classifier::{collapsed_whitespace_runs, is_rendered, is_unrendered, is_void_type};

/// Nothing rendered follows `b` inside its container.
pub fn is_at_end(view: View<'_>, b: Boundary) -> bool {
    let doc = view.doc;
    if raw::is_at_raw_end(doc, b) {
        return true;
    }
    let container = b.container();
    if let Some(text) = doc.text(container) {
        let rest = &text[b.offset().min(text.len())..];
        if !text_tail_is_blank(view, container, rest) {
            return false;
        }
        let following = doc.parent(container).map_or(&[][..], |p| {
            &doc.children(p)[doc.index_in_parent(container) + 1..]
        });
        return following.iter().all(|&n| is_unrendered(view, n));
    }
    doc.children(container)[b.offset()..]
        .iter()
        .all(|&n| is_unrendered(view, n))
}

/// Nothing rendered precedes `b` inside its container.
pub fn is_at_start(view: View<'_>, b: Boundary) -> bool {
    let doc = view.doc;
    if raw::is_at_raw_start(b) {
        return true;
    }
    let container = b.container();
    if let Some(text) = doc.text(container) {
        let head = &text[..b.offset().min(text.len())];
        if !text_tail_is_blank(view, container, head) {
            return false;
        }
        let preceding = doc.parent(container).map_or(&[][..], |p| {
            &doc.children(p)[..doc.index_in_parent(container)]
        });
        return preceding.iter().all(|&n| is_unrendered(view, n));
    }
    doc.children(container)[..b.offset()]
        .iter()
        .all(|&n| is_unrendered(view, n))
}

fn text_tail_is_blank(view: View<'_>, id: html::Id, part: &str) -> bool {
    if !tools::is_only_breaking_whitespace(part) {
        return false;
    }
    match view.style(id).white_space {
        ws if ws.preserves_spaces() => part.is_empty(),
        WhiteSpace::PreLine => !tools::has_line_terminator(part),
        _ => true,
    }
}

/// The node a rightward walk runs into: the container when nothing visible
/// follows, the raw next node otherwise.
pub fn next_node(view: View<'_>, b: Boundary) -> html::Id {
    if is_at_end(view, b) {
        b.container()
    } else {
        raw::next_node(view.doc, b)
    }
}

/// Mirror of [`next_node`].
pub fn prev_node(view: View<'_>, b: Boundary) -> html::Id {
    if is_at_start(view, b) {
        b.container()
    } else {
        raw::prev_node(view.doc, b)
    }
}

/// Move `b` forward over collapsed whitespace, comments and unrendered
/// nodes, descending into rendered containers. Stops before the first
/// rendered character or atom.
pub fn expand_forward(view: View<'_>, b: Boundary) -> Boundary {
    let doc = view.doc;
    let mut cur = b;
    loop {
        let container = cur.container();
        if doc.is_text(container) {
            let collapsed = collapsed_whitespace_runs(view, container);
            let mut offset = cur.offset();
            while let Some(run) = collapsed.iter().find(|r| r.contains(&offset)) {
                offset = run.end;
            }
            return cur.with_offset(offset);
        }
        let Some(node) = raw::node_after(doc, cur) else {
            return cur;
        };
        cur = match doc.kind(node) {
            NodeKind::Text(_) if is_rendered(view, node) => raw::from_start_of_node(node),
            NodeKind::Element(_) if is_rendered(view, node) => {
                if is_void_type(view, node) {
                    return cur;
                }
                raw::from_start_of_node(node)
            }
            _ => cur.with_offset(cur.offset() + 1),
        };
    }
}

/// Mirror of [`expand_forward`].
pub fn expand_backward(view: View<'_>, b: Boundary) -> Boundary {
    let doc = view.doc;
    let mut cur = b;
    loop {
        let container = cur.container();
        if doc.is_text(container) {
            let collapsed = collapsed_whitespace_runs(view, container);
            let mut offset = cur.offset();
            while let Some(run) = collapsed.iter().find(|r| r.start < offset && offset <= r.end) {
                offset = run.start;
            }
            return cur.with_offset(offset);
        }
        let Some(node) = raw::node_before(doc, cur) else {
            return cur;
        };
        cur = match doc.kind(node) {
            NodeKind::Text(_) if is_rendered(view, node) => raw::from_end_of_node(doc, node),
            NodeKind::Element(_) if is_rendered(view, node) => {
                if is_void_type(view, node) {
                    return cur;
                }
                raw::from_end_of_node(doc, node)
            }
            _ => cur.with_offset(cur.offset() - 1),
        };
    }
}
