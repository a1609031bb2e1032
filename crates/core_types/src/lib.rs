//! Small value types shared by the navigation crates.

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

/// Which endpoint of a two-boundary selection is under the user's control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Focus {
    Start,
    #[default]
    End,
}

impl Focus {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Focus::Start => Focus::End,
            Focus::End => Focus::Start,
        }
    }

    /// Index of the focused endpoint in a `[start, end]` pair.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Focus::Start => 0,
            Focus::End => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Left and up move towards the start of the document.
    #[inline]
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}

/// How far a single horizontal step travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stride {
    /// One character inside a text node.
    Char,
    /// To the next word edge.
    Word,
    /// To the next visually distinct caret position.
    Visual,
    /// One structural step in the tree, ignoring rendering.
    Boundary,
}

/// Keyboard modifier state carried by input events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    pub fn with_shift(self, shift: bool) -> Self {
        Self { shift, ..self }
    }

    /// Ctrl and alt both select word-wise stepping.
    #[inline]
    pub fn word_wise(self) -> bool {
        self.ctrl || self.alt
    }
}
