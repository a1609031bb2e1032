//! Moving the caret one line up or down.
//!
//! Two strategies, in order:
//!
//! 1. When the caret sits on the first (last) line of its paragraph, find
//!    the visible paragraph above (below), and hit-test at the caret's x on
//!    that paragraph's nearest line.
//! 2. Otherwise, or when that lands nowhere, probe in quarter-line steps
//!    past the caret's line until hit testing yields a different boundary.
//!
//! A target on the same line as the start counts as no movement.

use core_types::{Direction, Modifiers};
use html::boundaries::{from_end_of_node, from_start_of_node, node_after};
use html::traverse::{
    backward_preorder_backtrace_until, contains, forward_preorder_backtrace_until,
    next_non_ancestor,
};
use html::{Boundary, Id};
use visual::boundaries::{next_node, prev_node};
use visual::{
    CaretBox, Geometry, View, expand_backward, expand_forward, has_linebreaking_style,
    is_rendered, is_void_type,
};

use crate::config::NavigationConfig;
use crate::error::NavError;
use crate::selection::{Selection, merge_ranges};

pub fn climb(
    geometry: &Geometry<'_>,
    config: &NavigationConfig,
    direction: Direction,
    modifiers: Modifiers,
    current: Selection,
) -> Result<Selection, NavError> {
    let boundary = current.focused();
    let target = match direction {
        Direction::Up => move_up(geometry, config, boundary)?,
        Direction::Down => move_down(geometry, config, boundary)?,
        Direction::Left | Direction::Right => {
            return Err(NavError::Unsupported(format!("climb {direction:?}")));
        }
    };
    Ok(if modifiers.shift {
        merge_ranges(
            geometry.view().doc,
            [target, target],
            current.boundaries,
            current.focus,
        )
    } else {
        Selection::collapsed(target, current.focus)
    })
}

fn move_up(
    geometry: &Geometry<'_>,
    config: &NavigationConfig,
    boundary: Boundary,
) -> Result<Boundary, NavError> {
    let view = geometry.view();
    let doc = view.doc;
    let caret = geometry.caret_box(boundary).ok_or(NavError::Unresolvable)?;

    let mut target = None;
    if let Some(above) = paragraph_above(geometry, boundary, &caret) {
        let landing = expand_backward(view, from_end_of_node(doc, above));
        let node = prev_node(view, landing);
        if let Some(landing_box) = geometry.caret_box(landing) {
            let half = landing_box.height / 2.0;
            let y = if doc.is_text(node) {
                Some(landing_box.top + half)
            } else {
                geometry
                    .layout()
                    .element_rect(node)
                    .map(|r| r.y + r.height.max(landing_box.height) - half)
            };
            target = y.and_then(|y| geometry.from_position(caret.left, y));
        }
    }
    let target = match target {
        Some(t) => Some(t),
        None => probe(geometry, config, boundary, &caret, Direction::Up),
    };
    settle(geometry, boundary, &caret, target)
}

fn move_down(
    geometry: &Geometry<'_>,
    config: &NavigationConfig,
    boundary: Boundary,
) -> Result<Boundary, NavError> {
    let view = geometry.view();
    let doc = view.doc;
    let caret = geometry.caret_box(boundary).ok_or(NavError::Unresolvable)?;

    let mut target = None;
    if let Some(below) = paragraph_below(geometry, boundary, &caret) {
        let landing = expand_forward(view, from_start_of_node(below));
        let node = node_after(doc, landing).unwrap_or(landing.container());
        if let Some(landing_box) = geometry.caret_box(landing) {
            let top = if doc.is_text(node) {
                Some(landing_box.top)
            } else {
                geometry.layout().element_rect(node).map(|r| r.y)
            };
            let half = landing_box.height / 2.0;
            target = top.and_then(|top| geometry.from_position(caret.left, top + half));
        }
    }
    let target = match target {
        Some(t) => Some(t),
        None => probe(geometry, config, boundary, &caret, Direction::Down),
    };
    settle(geometry, boundary, &caret, target)
}

/// Reject targets that did not leave the caret's line.
fn settle(
    geometry: &Geometry<'_>,
    boundary: Boundary,
    caret: &CaretBox,
    target: Option<Boundary>,
) -> Result<Boundary, NavError> {
    let target = target.ok_or(NavError::Unresolvable)?;
    match geometry.caret_box(target) {
        Some(b) if b.top != caret.top => Ok(target),
        _ => Ok(boundary),
    }
}

/// Hit-test in quarter-line increments beyond the caret's line.
fn probe(
    geometry: &Geometry<'_>,
    config: &NavigationConfig,
    boundary: Boundary,
    caret: &CaretBox,
    direction: Direction,
) -> Option<Boundary> {
    let quarter = caret.height / 4.0;
    if quarter <= 0.0 {
        return None;
    }
    let mut stride = 0.0;
    for _ in 0..config.climb_probe_limit {
        stride += quarter;
        let y = if direction.is_backward() {
            caret.top - stride
        } else {
            caret.bottom() + stride
        };
        match geometry.from_position(caret.left, y) {
            Some(found) if found == boundary => continue,
            found => return found,
        }
    }
    None
}

fn is_visible_container(view: View<'_>, id: Id) -> bool {
    view.doc.is_element(id)
        && !is_void_type(view, id)
        && is_rendered(view, id)
        && has_linebreaking_style(view, id)
}

/// The block that separates `node` from the line beyond it, and whether
/// `node` sits inside that block.
struct Breakpoint {
    breaker: Id,
    inside: bool,
}

fn find_breakpoint(view: View<'_>, host: Id, node: Id, backwards: bool) -> Option<Breakpoint> {
    let doc = view.doc;
    let breaker = if is_visible_container(view, node) {
        node
    } else if backwards {
        backward_preorder_backtrace_until(doc, node, host, |n| is_visible_container(view, n))?
    } else {
        forward_preorder_backtrace_until(doc, node, host, |n| is_visible_container(view, n))?
    };
    Some(Breakpoint {
        breaker,
        inside: contains(doc, breaker, node),
    })
}

/// The visible paragraph above the caret, or `None` when the caret's line
/// is not the first of its paragraph (a soft line break lies above).
fn paragraph_above(geometry: &Geometry<'_>, boundary: Boundary, caret: &CaretBox) -> Option<Id> {
    let view = geometry.view();
    let host = view.bound(boundary.container());
    let bp = find_breakpoint(view, host, prev_node(view, boundary), true)?;
    let rect = geometry.layout().element_rect(bp.breaker)?;
    let offset = caret.top - caret.height;
    let break_offset = if bp.inside { rect.y } else { rect.bottom() };
    if offset >= break_offset {
        return None;
    }
    let above = if bp.inside {
        next_non_ancestor(
            view.doc,
            bp.breaker,
            true,
            |n| is_visible_container(view, n),
            |n| n == host,
        )?
    } else {
        bp.breaker
    };
    Some(enter_group(view, above, true))
}

fn paragraph_below(geometry: &Geometry<'_>, boundary: Boundary, caret: &CaretBox) -> Option<Id> {
    let view = geometry.view();
    let host = view.bound(boundary.container());
    let bp = find_breakpoint(view, host, next_node(view, boundary), false)?;
    let rect = geometry.layout().element_rect(bp.breaker)?;
    let offset = caret.top + caret.height * 2.0;
    let break_offset = if bp.inside { rect.bottom() } else { rect.y };
    if offset <= break_offset {
        return None;
    }
    let below = if bp.inside {
        next_non_ancestor(
            view.doc,
            bp.breaker,
            false,
            |n| is_visible_container(view, n),
            |n| n == host,
        )?
    } else {
        bp.breaker
    };
    Some(enter_group(view, below, false))
}

/// Lists and tables hold their lines in grouped children; descend to the
/// nearest one on the caret's side.
fn enter_group(view: View<'_>, node: Id, backwards: bool) -> Id {
    let doc = view.doc;
    let mut current = node;
    while doc.tag(current).is_some_and(|t| t.is_group_container()) {
        let grouped =
            |c: &Id| doc.tag(*c).is_some_and(|t| t.is_grouped()) && is_rendered(view, *c);
        let children = doc.children(current);
        let next = if backwards {
            children.iter().rev().copied().find(grouped)
        } else {
            children.iter().copied().find(grouped)
        };
        match next {
            Some(child) => current = child,
            None => break,
        }
    }
    current
}
