//! The selection context: per-editor navigation state and the event
//! reducer that drives it.

use core_types::{Focus, Millis};
use html::traverse::{ancestors, contains};
use html::{Boundary, Document, Id, is_editable};
use visual::{CaretBox, Geometry};

use crate::blink::Blinker;
use crate::click::{ClickCycle, ClickKind};
use crate::config::NavigationConfig;
use crate::editing::EditingOperations;
use crate::error::NavError;
use crate::events::InputEvent;
use crate::keys::movement;
use crate::navigation::{Change, transition};
use crate::overrides::{CaretStyle, Override, Overrides};
use crate::selection::Selection;
use crate::viewport::{Viewport, ensure_visible};

/// What the host should draw after an event.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pub selection: Selection,
    /// `None` while dragging: only the highlight is drawn.
    pub caret: Option<CaretBox>,
    pub style: CaretStyle,
    /// One box per line of a non-collapsed selection.
    pub highlights: Vec<CaretBox>,
    /// New scroll position that keeps the caret visible.
    pub scroll_to: Option<(f32, f32)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Nothing changed.
    Ignored,
    /// The pointer left editable content; hide the caret.
    Hidden,
    Render(RenderRequest),
}

/// Navigation state of one editor.
///
/// Events go through [`SelectionContext::handle`]; the host repaints from
/// the returned [`Outcome`] and calls [`SelectionContext::tick`] for the
/// blinking caret. Failed transitions are logged and leave every field as
/// it was.
pub struct SelectionContext {
    config: NavigationConfig,
    selection: Option<Selection>,
    focus: Focus,
    clicks: ClickCycle,
    last_mouse: Option<Change>,
    dragging: bool,
    drag_origin: Option<Selection>,
    overrides: Overrides,
    override_container: Option<Id>,
    blinker: Blinker,
    caret_visible: bool,
    viewport_size: (f32, f32),
}

impl Default for SelectionContext {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

impl SelectionContext {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            selection: None,
            focus: Focus::default(),
            clicks: ClickCycle::new(config.multi_click_window_ms),
            last_mouse: None,
            dragging: false,
            drag_origin: None,
            overrides: Overrides::default(),
            override_container: None,
            blinker: Blinker::new(config.blink),
            caret_visible: false,
            viewport_size: (0.0, 0.0),
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_caret_visible(&self) -> bool {
        self.caret_visible
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Replace the selection without an event, e.g. when the host restores
    /// a saved one. Reversed pairs are normalized.
    pub fn select(&mut self, doc: &Document, selection: Selection) {
        let selection = selection.normalized(doc);
        self.focus = selection.focus;
        self.selection = Some(selection);
    }

    pub fn handle(&mut self, geometry: &Geometry<'_>, event: &InputEvent, now: Millis) -> Outcome {
        let Some(change) = self.classify(event, now) else {
            return Outcome::Ignored;
        };
        let doc = geometry.view().doc;

        let resolved = match event.position() {
            Some((x, y)) => {
                let (sx, sy) = geometry.layout().scroll_offset();
                geometry
                    .from_position(x + sx, y + sy)
                    .map(|b| Selection::collapsed(b, self.focus))
            }
            None => self.selection,
        };
        let Some(current) = resolved else {
            if change != Change::Click && self.selection.is_some() {
                log::debug!(target: "input_core.nav", "{change:?} outside editable content");
                return self.leave();
            }
            return Outcome::Ignored;
        };

        if matches!(change, Change::Key { .. }) && is_partially_editable(doc, &current) {
            log::debug!(target: "input_core.nav", "key on a partially editable selection");
            return Outcome::Ignored;
        }

        let previous = match change {
            Change::DragMove | Change::DragEnd => self.drag_origin.unwrap_or(current),
            _ => self.selection.unwrap_or(current),
        };
        let next = match transition(geometry, &self.config, change, current, previous) {
            Ok(next) => next,
            Err(err) => {
                log::debug!(
                    target: "input_core.nav",
                    "{change:?} left the selection unchanged: {err}"
                );
                return Outcome::Ignored;
            }
        };
        if change == Change::DragEnd {
            self.drag_origin = None;
        }
        log::trace!(target: "input_core.nav", "{change:?}: {:?} -> {next:?}", self.selection);
        self.selection = Some(next);
        self.focus = next.focus;
        self.render(geometry, change, now)
    }

    /// Map a raw event to a selection change and update the pointer
    /// bookkeeping. `None` for events navigation does not react to.
    fn classify(&mut self, event: &InputEvent, now: Millis) -> Option<Change> {
        let change = match *event {
            InputEvent::KeyDown { key, modifiers } => {
                movement(key, modifiers)?;
                Change::Key { key, modifiers }
            }
            InputEvent::MouseDown { x, y, modifiers } => match self.clicks.press((x, y), now) {
                ClickKind::Single => Change::MouseDown {
                    extend: modifiers.shift,
                },
                ClickKind::Double => Change::DoubleClick,
                ClickKind::Triple => Change::TripleClick,
            },
            InputEvent::MouseUp { .. } if self.dragging => {
                self.dragging = false;
                Change::DragEnd
            }
            // a release after a multi-click keeps the expanded selection
            InputEvent::MouseUp { .. }
                if matches!(
                    self.last_mouse,
                    Some(Change::DoubleClick | Change::TripleClick)
                ) =>
            {
                Change::Click
            }
            InputEvent::MouseUp { .. } => Change::MouseUp,
            InputEvent::MouseMove { .. } => {
                if !self.dragging {
                    let pressed = matches!(
                        self.last_mouse,
                        Some(Change::MouseDown { .. } | Change::DoubleClick | Change::TripleClick)
                    );
                    if !pressed {
                        return None;
                    }
                    log::debug!(target: "input_core.nav", "drag started");
                    self.dragging = true;
                    self.drag_origin = self.selection;
                }
                Change::DragMove
            }
            InputEvent::Click { .. } => Change::Click,
            InputEvent::DoubleClick { .. } => Change::DoubleClick,
            InputEvent::TripleClick { .. } => Change::TripleClick,
            InputEvent::DragOver { .. } => Change::DragOver,
            InputEvent::Drop { .. } => Change::Drop,
            InputEvent::Paste => Change::Paste,
            InputEvent::Resize { width, height } => {
                self.viewport_size = (width, height);
                Change::Resize
            }
        };
        if let Some(at) = event.position() {
            if event.is_clicking() {
                self.clicks.observe(at);
            }
            if change != Change::DragMove {
                self.last_mouse = Some(change);
            }
        }
        Some(change)
    }

    fn render(&mut self, geometry: &Geometry<'_>, change: Change, now: Millis) -> Outcome {
        let view = geometry.view();
        let Some(selection) = self.selection else {
            return Outcome::Ignored;
        };
        let focused = selection.focused();
        let container = focused.container();
        if !is_editable(view.doc, container) {
            return self.leave();
        }
        if self.override_container.is_some_and(|c| c != container) {
            self.overrides.clear();
            self.override_container = None;
        }

        let style = CaretStyle::resolve(view.element_style(container), &self.overrides);
        let highlights = if selection.is_collapsed() {
            Vec::new()
        } else {
            geometry.selection_boxes(selection.start(), selection.end())
        };
        let caret = if self.dragging && change != Change::DragOver {
            None
        } else {
            geometry.caret_box(focused)
        };
        let scroll_to = match caret {
            Some(c) if change.moves_caret() => ensure_visible(&c, &self.viewport(geometry)),
            _ => None,
        };
        if caret.is_some() {
            self.blinker.start(now);
            self.caret_visible = true;
        } else {
            self.blinker.stop();
            self.caret_visible = false;
        }
        Outcome::Render(RenderRequest {
            selection,
            caret,
            style,
            highlights,
            scroll_to,
        })
    }

    fn leave(&mut self) -> Outcome {
        self.blinker.stop();
        self.caret_visible = false;
        Outcome::Hidden
    }

    fn viewport(&self, geometry: &Geometry<'_>) -> Viewport {
        let (scroll_left, scroll_top) = geometry.layout().scroll_offset();
        Viewport {
            scroll_left,
            scroll_top,
            width: self.viewport_size.0,
            height: self.viewport_size.1,
        }
    }

    /// Toggle a pending format at the caret. The toggle lasts until the
    /// caret moves to another container.
    pub fn toggle_override(
        &mut self,
        geometry: &Geometry<'_>,
        toggle: Override,
    ) -> Option<CaretStyle> {
        let view = geometry.view();
        let container = self.selection?.focused().container();
        let harvested = view.element_style(container);
        self.overrides.toggle(toggle, harvested);
        self.override_container = Some(container);
        Some(CaretStyle::resolve(harvested, &self.overrides))
    }

    /// Caret opacity at `now`; 0.0 while the caret is hidden.
    pub fn tick(&mut self, now: Millis) -> f32 {
        if !self.caret_visible {
            return 0.0;
        }
        self.blinker.tick(now)
    }

    /// When the host should call [`SelectionContext::tick`] next.
    pub fn next_timer(&self, now: Millis) -> Option<Millis> {
        self.blinker.next_deadline(now)
    }

    /// Hand the selection to an editing collaborator and adopt the
    /// boundaries it returns.
    pub fn delegate<E: EditingOperations>(&mut self, ops: &mut E) -> Result<Selection, NavError> {
        let current = self.selection.ok_or(NavError::MalformedSelection)?;
        let (start, end) = ops
            .apply(current.start(), current.end())
            .map_err(|err| NavError::Unsupported(err.to_string()))?;
        let doc = ops.document();
        for b in [start, end] {
            Boundary::checked(doc, b.container(), b.offset())
                .map_err(|_| NavError::MalformedSelection)?;
        }
        let next = Selection::new([start, end], current.focus).normalized(doc);
        self.selection = Some(next);
        self.focus = next.focus;
        Ok(next)
    }

    /// Stop the blink schedule and forget pointer state. The selection is
    /// kept so a later focus can restore it.
    pub fn teardown(&mut self) {
        self.blinker.stop();
        self.caret_visible = false;
        self.dragging = false;
        self.drag_origin = None;
        self.last_mouse = None;
        self.clicks.reset();
    }
}

/// A selection whose common container is not editable while one of its
/// ends is.
fn is_partially_editable(doc: &Document, selection: &Selection) -> bool {
    let a = selection.start().container();
    let b = selection.end().container();
    let common = std::iter::once(a)
        .chain(ancestors(doc, a))
        .find(|&n| contains(doc, n, b))
        .unwrap_or(doc.root());
    !is_editable(doc, common) && (is_editable(doc, a) || is_editable(doc, b))
}
