/// A rectangle in CSS px, document coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rectangle {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Inclusive on all edges.
    pub fn contains_point(&self, (x, y): (f32, f32)) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Union of all rectangles, `None` for an empty input.
pub fn union_all<'a>(rects: impl IntoIterator<Item = &'a Rectangle>) -> Option<Rectangle> {
    rects.into_iter().fold(None, |acc: Option<Rectangle>, r| {
        Some(match acc {
            Some(a) => a.union(r),
            None => *r,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 20.0);
        let b = Rectangle::new(30.0, 20.0, 10.0, 20.0);
        assert_eq!(a.union(&b), Rectangle::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(union_all([a, b].iter()), Some(Rectangle::new(0.0, 0.0, 40.0, 40.0)));
        assert_eq!(union_all(std::iter::empty()), None);
    }
}
