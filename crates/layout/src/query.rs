use html::{Document, Id, Range};

use crate::Rectangle;

/// Pixel geometry of a laid-out document.
///
/// This is the measurement primitive navigation is built on. Implementations
/// report document coordinates; `scroll_offset` gives the viewport origin
/// within the document.
pub trait LayoutQuery {
    /// Rectangles of the rendered glyphs and replaced boxes covered by
    /// `range`. Collapsed ranges usually cover nothing and may return an
    /// empty list.
    fn client_rects(&self, doc: &Document, range: &Range) -> Vec<Rectangle>;

    /// Border box of an element, `None` if it produced no box.
    fn element_rect(&self, id: Id) -> Option<Rectangle>;

    fn scroll_offset(&self) -> (f32, f32) {
        (0.0, 0.0)
    }
}
