//! Pure selection transitions.
//!
//! Every function here maps a selection (plus, for mouse events, the
//! selection before the event) to the next selection. Nothing is stored;
//! [`crate::SelectionContext`] owns the state and decides which change an
//! event means.

use core_types::{Direction, Focus, Modifiers, Stride};
use html::Boundary;
use html::boundaries::{from_end_of_node, is_reversed};
use visual::traversing::{next, prev};
use visual::{
    Geometry, StepError, Unit, View, envelope_invisible_characters, expand, expand_backward,
    expand_forward, host_of, is_at_end, is_at_start,
};

use crate::climb::climb;
use crate::config::NavigationConfig;
use crate::error::NavError;
use crate::keys::{Key, Movement, movement};
use crate::selection::{Selection, merge_ranges};

/// What an event asks of the selection, once the context has resolved it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Key { key: Key, modifiers: Modifiers },
    /// Press; `extend` when shift was held.
    MouseDown { extend: bool },
    MouseUp,
    /// Pointer moved while dragging.
    DragMove,
    /// Release that ends a drag.
    DragEnd,
    DoubleClick,
    TripleClick,
    DragOver,
    Drop,
    Paste,
    Resize,
    Click,
}

impl Change {
    /// Changes after which the caret should be scrolled into view.
    pub fn moves_caret(&self) -> bool {
        match self {
            Change::Key { key, modifiers } => movement(*key, *modifiers).is_some(),
            Change::Paste => true,
            _ => false,
        }
    }
}

/// Apply `change` to `current`.
///
/// For pointer changes `current` holds the boundaries under the pointer and
/// `previous` the selection before the event (the drag origin while
/// dragging). Keyboard changes only read `current`.
pub fn transition(
    geometry: &Geometry<'_>,
    config: &NavigationConfig,
    change: Change,
    current: Selection,
    previous: Selection,
) -> Result<Selection, NavError> {
    let doc = geometry.view().doc;
    match change {
        Change::Key { key, modifiers } => match movement(key, modifiers) {
            Some(Movement::Step(direction)) => step(geometry.view(), direction, modifiers, current),
            Some(Movement::Climb(direction)) => {
                climb(geometry, config, direction, modifiers, current)
            }
            Some(Movement::Jump(direction)) => jump(geometry.view(), direction, modifiers, current),
            Some(Movement::Home) => home(geometry, modifiers, current),
            Some(Movement::End) => end(geometry, modifiers, current),
            None => Ok(current),
        },
        Change::MouseDown { extend } => Ok(mouse_down(geometry.view(), extend, current, previous)),
        Change::MouseUp | Change::DragMove | Change::DragEnd => Ok(merge_ranges(
            doc,
            current.boundaries,
            previous.boundaries,
            current.focus,
        )),
        Change::DoubleClick => Ok(expand_to(geometry.view(), current, Unit::Word)),
        Change::TripleClick => Ok(expand_to(geometry.view(), current, Unit::Block)),
        Change::DragOver | Change::Drop | Change::Paste => {
            Ok(Selection::new(current.boundaries, Focus::End))
        }
        Change::Resize => Ok(current),
        Change::Click => Ok(previous),
    }
}

/// Move or extend one step left or right.
///
/// A collapsed selection (or an unshifted one being collapsed) takes its
/// focus from the direction. Unshifted keys on a range collapse it onto the
/// focused side without stepping.
pub fn step(
    view: View<'_>,
    direction: Direction,
    modifiers: Modifiers,
    current: Selection,
) -> Result<Selection, NavError> {
    let [start, end] = current.boundaries;
    let collapsed = current.is_collapsed();
    let backward = direction.is_backward();
    let focus = if collapsed || !modifiers.shift {
        if backward { Focus::Start } else { Focus::End }
    } else {
        current.focus
    };
    let mut boundary = match focus {
        Focus::Start => start,
        Focus::End => envelope_invisible_characters(view, end),
    };

    if collapsed || modifiers.shift {
        let host = host_of(view, boundary)?;
        let stride = if modifiers.word_wise() {
            Stride::Word
        } else {
            Stride::Visual
        };
        let stepped = if backward {
            prev(view, boundary, stride)
        } else {
            next(view, boundary, stride)
        };
        let target = match stepped {
            Ok(b) if b.container() == host => into_content(view, boundary).or(Some(b)),
            Ok(b) => Some(b),
            Err(StepError::LeftEditingHost) => into_content(view, boundary),
            Err(err) => {
                log::debug!(target: "input_core.nav", "{direction:?} step stays put: {err}");
                None
            }
        };
        if let Some(target) = target {
            boundary = target;
        }
    }

    let doc = view.doc;
    Ok(if modifiers.shift {
        let pair = match focus {
            Focus::Start => [boundary, end],
            Focus::End => [start, boundary],
        };
        Selection::new(pair, focus).normalized(doc)
    } else {
        Selection::collapsed(boundary, focus)
    })
}

/// Keep a caret at the edge of its host on content rather than directly
/// in the host.
fn into_content(view: View<'_>, b: Boundary) -> Option<Boundary> {
    if is_at_start(view, b) {
        Some(expand_forward(view, b))
    } else if is_at_end(view, b) {
        Some(expand_backward(view, b))
    } else {
        None
    }
}

/// To the first (up) or last (down) visual position of the editing host.
pub fn jump(
    view: View<'_>,
    direction: Direction,
    modifiers: Modifiers,
    current: Selection,
) -> Result<Selection, NavError> {
    let doc = view.doc;
    let host = host_of(view, current.start())?;
    let target = if direction.is_backward() {
        expand_forward(view, Boundary::new(host, 0))
    } else {
        expand_backward(view, from_end_of_node(doc, host))
    };
    Ok(if modifiers.shift {
        merge_ranges(doc, [target, target], current.boundaries, current.focus)
    } else {
        Selection::collapsed(target, current.focus)
    })
}

/// Top of the line through `b` (nudged to its middle) and the horizontal
/// extent of the host.
fn line_probe(geometry: &Geometry<'_>, b: Boundary) -> Result<(f32, f32, f32), NavError> {
    let view = geometry.view();
    let doc = view.doc;
    let host = host_of(view, b)?;
    let node = if doc.is_text(b.container()) {
        doc.parent(b.container()).unwrap_or(host)
    } else {
        b.container()
    };
    let top = match geometry.caret_box(b) {
        Some(caret) => caret.top,
        None => geometry.layout().element_rect(node).ok_or(NavError::Unresolvable)?.y,
    };
    let host_rect = geometry.layout().element_rect(host).ok_or(NavError::Unresolvable)?;
    let y = top + view.style(node).font_px() / 2.0;
    Ok((y, host_rect.x, host_rect.right()))
}

/// To the start of the current line.
pub fn home(
    geometry: &Geometry<'_>,
    modifiers: Modifiers,
    current: Selection,
) -> Result<Selection, NavError> {
    let (y, left, _) = line_probe(geometry, current.start())?;
    let target = geometry.from_position(left, y).ok_or(NavError::Unresolvable)?;
    Ok(if modifiers.shift {
        Selection::new([target, current.anchor()], Focus::Start).normalized(geometry.view().doc)
    } else {
        Selection::collapsed(target, Focus::Start)
    })
}

/// To the end of the current line.
pub fn end(
    geometry: &Geometry<'_>,
    modifiers: Modifiers,
    current: Selection,
) -> Result<Selection, NavError> {
    let (y, _, right) = line_probe(geometry, current.end())?;
    let target = geometry
        .from_position(right - 1.0, y)
        .ok_or(NavError::Unresolvable)?;
    Ok(if modifiers.shift {
        Selection::new([current.anchor(), target], Focus::End).normalized(geometry.view().doc)
    } else {
        Selection::collapsed(target, Focus::End)
    })
}

/// A press either places the caret or, with shift, extends from the
/// previous selection's anchor to the pointer.
fn mouse_down(view: View<'_>, extend: bool, current: Selection, previous: Selection) -> Selection {
    if !extend {
        return current;
    }
    let start = current.start();
    let end = previous.boundaries[current.focus.flip().index()];
    if is_reversed(view.doc, start, end) {
        Selection::new([end, start], Focus::End)
    } else {
        Selection::new([start, end], Focus::Start)
    }
}

fn expand_to(view: View<'_>, current: Selection, unit: Unit) -> Selection {
    let (start, end) = expand(view, current.start(), current.end(), unit);
    Selection::new([start, end], Focus::End)
}

#[cfg(test)]
mod tests {
    use super::*;
    use html_test_support::Fixture;

    fn selection(f: &Fixture) -> Selection {
        let (start, end) = f.selection().expect("fixture has markers");
        Selection::new([start, end], Focus::End)
    }

    fn rendered(f: &Fixture, sel: Selection) -> String {
        f.render(sel.start(), sel.end())
    }

    #[test]
    fn unshifted_step_on_a_range_collapses_to_the_side() {
        let f = Fixture::editable("<p>f[oo]</p>");
        let view = View::new(&f.doc, &f.styles);
        let left = step(view, Direction::Left, Modifiers::NONE, selection(&f)).unwrap();
        assert_eq!(rendered(&f, left), "<p>f|oo</p>");
        assert_eq!(left.focus, Focus::Start);
        let right = step(view, Direction::Right, Modifiers::NONE, selection(&f)).unwrap();
        assert_eq!(rendered(&f, right), "<p>foo|</p>");
    }

    #[test]
    fn shifted_steps_cross_the_anchor() {
        let f = Fixture::editable("<p>f[o]o</p>");
        let view = View::new(&f.doc, &f.styles);
        let once = step(view, Direction::Left, Modifiers::SHIFT, selection(&f)).unwrap();
        assert!(once.is_collapsed());
        let twice = step(view, Direction::Left, Modifiers::SHIFT, once).unwrap();
        assert_eq!(rendered(&f, twice), "<p>[f]oo</p>");
        assert_eq!(twice.focus, Focus::Start);
    }

    #[test]
    fn step_outside_any_host_is_an_error() {
        let f = Fixture::parse("<p>f|oo</p>");
        let view = View::new(&f.doc, &f.styles);
        let err = step(view, Direction::Right, Modifiers::NONE, selection(&f)).unwrap_err();
        assert_eq!(err, NavError::HostBoundary);
    }

    #[test]
    fn jumps_reach_host_edges() {
        let f = Fixture::editable("<p>foo</p><p>b|ar</p>");
        let view = View::new(&f.doc, &f.styles);
        let up = jump(view, Direction::Up, Modifiers::NONE, selection(&f)).unwrap();
        assert_eq!(rendered(&f, up), "<p>|foo</p><p>bar</p>");
        let down = jump(view, Direction::Down, Modifiers::SHIFT, selection(&f)).unwrap();
        assert_eq!(rendered(&f, down), "<p>foo</p><p>b[ar]</p>");
    }

    #[test]
    fn shift_press_extends_from_the_anchor() {
        let f = Fixture::editable("<p>f|oo bar</p>");
        let view = View::new(&f.doc, &f.styles);
        let text = f.text_node("foo bar");
        let previous = selection(&f);
        let pointer = Selection::collapsed(Boundary::new(text, 5), Focus::End);
        let extended = mouse_down(view, true, pointer, previous);
        assert_eq!(rendered(&f, extended), "<p>f[oo b]ar</p>");
        assert_eq!(extended.focus, Focus::End);

        let pointer = Selection::collapsed(Boundary::new(text, 0), Focus::End);
        let extended = mouse_down(view, true, pointer, previous);
        assert_eq!(rendered(&f, extended), "<p>[f]oo bar</p>");
        assert_eq!(extended.focus, Focus::Start);
    }

    #[test]
    fn double_and_triple_click_expand() {
        let f = Fixture::editable("<p>say hel|lo world</p>");
        let view = View::new(&f.doc, &f.styles);
        let word = expand_to(view, selection(&f), Unit::Word);
        assert_eq!(rendered(&f, word), "<p>say [hello] world</p>");
        let block = expand_to(view, selection(&f), Unit::Block);
        assert_eq!(rendered(&f, block), "<p>[say hello world]</p>");
    }
}
