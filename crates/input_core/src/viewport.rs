use visual::CaretBox;

/// The visible part of the document, in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_left: f32,
    pub scroll_top: f32,
    pub width: f32,
    pub height: f32,
}

/// Scroll position that brings `caret` into view with a one-caret margin,
/// or `None` when it is already visible.
///
/// A zero-sized viewport is treated as unknown and never scrolls.
pub fn ensure_visible(caret: &CaretBox, viewport: &Viewport) -> Option<(f32, f32)> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    let buffer = caret.height;
    let top = viewport.scroll_top;
    let left = viewport.scroll_left;

    let correct_top = if caret.top < top {
        Some((caret.top - buffer).max(0.0))
    } else if caret.bottom() > top + viewport.height {
        Some(caret.bottom() - viewport.height + buffer)
    } else {
        None
    };
    let correct_left = if caret.left < left {
        Some((caret.left - buffer).max(0.0))
    } else if caret.right() > left + viewport.width {
        Some(caret.right() - viewport.width + buffer)
    } else {
        None
    };

    if correct_top.is_none() && correct_left.is_none() {
        return None;
    }
    Some((correct_left.unwrap_or(left), correct_top.unwrap_or(top)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret(left: f32, top: f32) -> CaretBox {
        CaretBox {
            top,
            left,
            width: 1.0,
            height: 20.0,
        }
    }

    fn viewport(scroll_left: f32, scroll_top: f32) -> Viewport {
        Viewport {
            scroll_left,
            scroll_top,
            width: 200.0,
            height: 100.0,
        }
    }

    #[test]
    fn visible_caret_needs_no_scroll() {
        assert_eq!(ensure_visible(&caret(10.0, 40.0), &viewport(0.0, 0.0)), None);
    }

    #[test]
    fn caret_below_scrolls_down_with_margin() {
        let scroll = ensure_visible(&caret(10.0, 100.0), &viewport(0.0, 0.0));
        assert_eq!(scroll, Some((0.0, 40.0)));
    }

    #[test]
    fn caret_above_scrolls_up_with_margin() {
        let scroll = ensure_visible(&caret(10.0, 60.0), &viewport(0.0, 80.0));
        assert_eq!(scroll, Some((0.0, 40.0)));
    }

    #[test]
    fn caret_past_the_right_edge_scrolls_sideways() {
        let scroll = ensure_visible(&caret(250.0, 20.0), &viewport(0.0, 0.0));
        assert_eq!(scroll, Some((71.0, 0.0)));
    }

    #[test]
    fn unknown_viewport_never_scrolls() {
        let v = Viewport::default();
        assert_eq!(ensure_visible(&caret(500.0, 500.0), &v), None);
    }
}
