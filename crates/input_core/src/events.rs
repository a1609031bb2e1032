use core_types::Modifiers;

use crate::keys::Key;

/// Input as the host delivers it. Pointer coordinates are relative to the
/// viewport; the context adds the layout's scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown { key: Key, modifiers: Modifiers },
    MouseDown { x: f32, y: f32, modifiers: Modifiers },
    MouseUp { x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    Click { x: f32, y: f32 },
    /// Hosts that detect multi-clicks themselves may send these directly.
    DoubleClick { x: f32, y: f32 },
    TripleClick { x: f32, y: f32 },
    DragOver { x: f32, y: f32 },
    Drop { x: f32, y: f32 },
    Paste,
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    /// Viewport position of pointer events.
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::MouseDown { x, y, .. }
            | InputEvent::MouseUp { x, y }
            | InputEvent::MouseMove { x, y }
            | InputEvent::Click { x, y }
            | InputEvent::DoubleClick { x, y }
            | InputEvent::TripleClick { x, y }
            | InputEvent::DragOver { x, y }
            | InputEvent::Drop { x, y } => Some((x, y)),
            InputEvent::KeyDown { .. } | InputEvent::Paste | InputEvent::Resize { .. } => None,
        }
    }

    /// Presses, releases and clicks. Their positions anchor multi-click
    /// detection.
    pub fn is_clicking(&self) -> bool {
        matches!(
            self,
            InputEvent::MouseDown { .. }
                | InputEvent::MouseUp { .. }
                | InputEvent::Click { .. }
                | InputEvent::DoubleClick { .. }
                | InputEvent::TripleClick { .. }
        )
    }
}
