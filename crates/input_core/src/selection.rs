//! Two-boundary selections with a focused endpoint.

use core_types::Focus;
use html::boundaries::is_reversed;
use html::{Boundary, Document, Range};

/// A selection as a pair of boundaries plus the endpoint the user moves.
///
/// Transitions always hand back selections in document order; a selection
/// built by hand may be reversed until [`Selection::normalized`] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub boundaries: [Boundary; 2],
    pub focus: Focus,
}

impl Selection {
    #[inline]
    pub fn new(boundaries: [Boundary; 2], focus: Focus) -> Self {
        Self { boundaries, focus }
    }

    #[inline]
    pub fn collapsed(at: Boundary, focus: Focus) -> Self {
        Self::new([at, at], focus)
    }

    #[inline]
    pub fn start(&self) -> Boundary {
        self.boundaries[0]
    }

    #[inline]
    pub fn end(&self) -> Boundary {
        self.boundaries[1]
    }

    /// The endpoint under the user's control.
    #[inline]
    pub fn focused(&self) -> Boundary {
        self.boundaries[self.focus.index()]
    }

    /// The endpoint that stays put while extending.
    #[inline]
    pub fn anchor(&self) -> Boundary {
        self.boundaries[self.focus.flip().index()]
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.boundaries[0] == self.boundaries[1]
    }

    /// Put the boundaries in document order. Swapping also flips the focus
    /// so the same boundary stays focused.
    pub fn normalized(self, doc: &Document) -> Self {
        let [start, end] = self.boundaries;
        if is_reversed(doc, start, end) {
            Self::new([end, start], self.focus.flip())
        } else {
            self
        }
    }

    pub fn range(&self, doc: &Document) -> Range {
        Range::ordered(doc, self.start(), self.end())
    }
}

/// Combine a fresh pair with an existing one, keeping the side of `existing`
/// that the focus does not move.
///
/// With the focus at the start, the result spans `fresh[0]..existing[1]`;
/// otherwise `existing[0]..fresh[1]`. A reversed result is swapped and its
/// focus flipped.
pub fn merge_ranges(
    doc: &Document,
    fresh: [Boundary; 2],
    existing: [Boundary; 2],
    focus: Focus,
) -> Selection {
    let pair = match focus {
        Focus::Start => [fresh[0], existing[1]],
        Focus::End => [existing[0], fresh[1]],
    };
    Selection::new(pair, focus).normalized(doc)
}
