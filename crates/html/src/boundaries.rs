//! Structural positions in a [`Document`].
//!
//! A [`Boundary`] is a `(container, offset)` pair. Offsets count children for
//! element containers and UTF-8 bytes for text containers. Everything in this
//! module is purely structural: "at end" means the offset is maximal, not
//! that nothing visible follows. Visual variants live with the rendering
//! classifier.

use std::cmp::Ordering;
use std::fmt;

use crate::traverse::{ancestors, compare_document_order, contains};
use crate::{Document, Id, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Boundary {
    container: Id,
    offset: usize,
}

impl Boundary {
    /// Build a boundary without checking it against a document.
    #[inline]
    pub const fn new(container: Id, offset: usize) -> Self {
        Self { container, offset }
    }

    /// Build a boundary, verifying that the node exists and the offset fits.
    pub fn checked(doc: &Document, container: Id, offset: usize) -> Result<Self, BoundaryError> {
        if doc.get(container).is_none() {
            return Err(BoundaryError::UnknownNode(container));
        }
        let len = doc.node_len(container);
        if offset > len {
            return Err(BoundaryError::OffsetOutOfRange {
                container,
                offset,
                len,
            });
        }
        if let Some(text) = doc.text(container) {
            if !text.is_char_boundary(offset) {
                return Err(BoundaryError::OffsetOutOfRange {
                    container,
                    offset,
                    len,
                });
            }
        }
        Ok(Self { container, offset })
    }

    #[inline]
    pub const fn container(self) -> Id {
        self.container
    }

    #[inline]
    pub const fn offset(self) -> usize {
        self.offset
    }

    #[inline]
    pub fn with_offset(self, offset: usize) -> Self {
        Self {
            container: self.container,
            offset,
        }
    }
}

/// An ordered pair of boundaries, `start` never after `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    start: Boundary,
    end: Boundary,
}

impl Range {
    pub fn new(doc: &Document, start: Boundary, end: Boundary) -> Result<Self, BoundaryError> {
        if compare_boundaries(doc, start, end) == Ordering::Greater {
            return Err(BoundaryError::Reversed);
        }
        Ok(Self { start, end })
    }

    pub fn collapsed(at: Boundary) -> Self {
        Self { start: at, end: at }
    }

    /// Order two boundaries into a range.
    pub fn ordered(doc: &Document, a: Boundary, b: Boundary) -> Self {
        if compare_boundaries(doc, a, b) == Ordering::Greater {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    #[inline]
    pub fn start(&self) -> Boundary {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Boundary {
        self.end
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundaryError {
    UnknownNode(Id),
    OffsetOutOfRange { container: Id, offset: usize, len: usize },
    Reversed,
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryError::UnknownNode(id) => write!(f, "node {} is not part of the document", id.0),
            BoundaryError::OffsetOutOfRange {
                container,
                offset,
                len,
            } => write!(
                f,
                "offset {offset} is not a valid position in node {} (length {len})",
                container.0
            ),
            BoundaryError::Reversed => write!(f, "range end precedes its start"),
        }
    }
}

impl std::error::Error for BoundaryError {}

/// The boundary right before `id`, inside its parent.
pub fn from_node(doc: &Document, id: Id) -> Boundary {
    match doc.parent(id) {
        Some(parent) => Boundary::new(parent, doc.index_in_parent(id)),
        None => Boundary::new(id, 0),
    }
}

/// The boundary right after `id`, inside its parent.
pub fn after_node(doc: &Document, id: Id) -> Boundary {
    match doc.parent(id) {
        Some(parent) => Boundary::new(parent, doc.index_in_parent(id) + 1),
        None => from_end_of_node(doc, id),
    }
}

#[inline]
pub fn from_start_of_node(id: Id) -> Boundary {
    Boundary::new(id, 0)
}

pub fn from_end_of_node(doc: &Document, id: Id) -> Boundary {
    Boundary::new(id, doc.node_len(id))
}

#[inline]
pub fn is_text_boundary(doc: &Document, b: Boundary) -> bool {
    doc.is_text(b.container)
}

#[inline]
pub fn is_at_raw_start(b: Boundary) -> bool {
    b.offset == 0
}

#[inline]
pub fn is_at_raw_end(doc: &Document, b: Boundary) -> bool {
    b.offset >= doc.node_len(b.container)
}

/// The node a rightward walk from `b` runs into: the child at the offset, or
/// the container itself for text boundaries and boundaries at the end.
pub fn next_node(doc: &Document, b: Boundary) -> Id {
    if is_text_boundary(doc, b) || is_at_raw_end(doc, b) {
        return b.container;
    }
    doc.child(b.container, b.offset).unwrap_or(b.container)
}

/// Mirror of [`next_node`].
pub fn prev_node(doc: &Document, b: Boundary) -> Id {
    if is_text_boundary(doc, b) || is_at_raw_start(b) {
        return b.container;
    }
    doc.child(b.container, b.offset - 1).unwrap_or(b.container)
}

/// The node that starts exactly at `b`, if any.
///
/// A text boundary at offset 0 names its own text node; one at the end names
/// the text node's next sibling; one in the middle names nothing.
pub fn node_after(doc: &Document, b: Boundary) -> Option<Id> {
    if is_text_boundary(doc, b) {
        if is_at_raw_start(b) {
            return Some(b.container);
        }
        if is_at_raw_end(doc, b) {
            return doc.next_sibling(b.container);
        }
        return None;
    }
    doc.child(b.container, b.offset)
}

/// The node that ends exactly at `b`, if any.
pub fn node_before(doc: &Document, b: Boundary) -> Option<Id> {
    if is_text_boundary(doc, b) {
        if is_at_raw_end(doc, b) {
            return Some(b.container);
        }
        if is_at_raw_start(b) {
            return doc.prev_sibling(b.container);
        }
        return None;
    }
    if b.offset == 0 {
        return None;
    }
    doc.child(b.container, b.offset - 1)
}

fn can_enter(doc: &Document, id: Id) -> bool {
    match doc.kind(id) {
        NodeKind::Text(_) => true,
        NodeKind::Element(data) => !data.tag.is_void(),
        NodeKind::Document | NodeKind::Comment(_) => false,
    }
}

/// One structural step to the right: out of a finished container, into the
/// next child, or over a void or comment. `None` past the document end.
pub fn next(doc: &Document, b: Boundary) -> Option<Boundary> {
    if is_text_boundary(doc, b) || is_at_raw_end(doc, b) {
        doc.parent(b.container)?;
        return Some(after_node(doc, b.container));
    }
    let child = doc.child(b.container, b.offset)?;
    if can_enter(doc, child) {
        Some(from_start_of_node(child))
    } else {
        Some(b.with_offset(b.offset + 1))
    }
}

/// One structural step to the left. Mirror of [`next`].
pub fn prev(doc: &Document, b: Boundary) -> Option<Boundary> {
    if is_text_boundary(doc, b) || is_at_raw_start(b) {
        doc.parent(b.container)?;
        return Some(from_node(doc, b.container));
    }
    let child = doc.child(b.container, b.offset - 1)?;
    if can_enter(doc, child) {
        Some(from_end_of_node(doc, child))
    } else {
        Some(b.with_offset(b.offset - 1))
    }
}

/// Document-order comparison of two boundary points.
pub fn compare_boundaries(doc: &Document, a: Boundary, b: Boundary) -> Ordering {
    if a.container == b.container {
        return a.offset.cmp(&b.offset);
    }
    if compare_document_order(doc, a.container, b.container) == Ordering::Greater {
        return compare_boundaries(doc, b, a).reverse();
    }
    if contains(doc, a.container, b.container) {
        // Child of `a.container` on the path down to `b.container`.
        let child = std::iter::once(b.container)
            .chain(ancestors(doc, b.container))
            .find(|&n| doc.parent(n) == Some(a.container));
        if let Some(child) = child {
            if doc.index_in_parent(child) < a.offset {
                return Ordering::Greater;
            }
        }
    }
    Ordering::Less
}

/// True if `end` comes before `start` in document order.
#[inline]
pub fn is_reversed(doc: &Document, start: Boundary, end: Boundary) -> bool {
    compare_boundaries(doc, start, end) == Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentBuilder;

    // <p>foo<b>bar</b><br>baz</p>
    fn doc() -> (Document, Id, Id, Id, Id, Id, Id) {
        let mut b = DocumentBuilder::new();
        let p = b.open("p");
        let foo = b.text("foo");
        let bold = b.open("b");
        let bar = b.text("bar");
        b.close();
        let br = b.open("br");
        let baz = b.text("baz");
        b.close();
        (b.finish(), p, foo, bold, bar, br, baz)
    }

    #[test]
    fn checked_rejects_bad_offsets() {
        let (doc, p, foo, ..) = doc();
        assert!(Boundary::checked(&doc, p, 4).is_ok());
        assert_eq!(
            Boundary::checked(&doc, p, 5),
            Err(BoundaryError::OffsetOutOfRange {
                container: p,
                offset: 5,
                len: 4
            })
        );
        assert!(Boundary::checked(&doc, foo, 3).is_ok());
        assert_eq!(
            Boundary::checked(&doc, Id(99), 0),
            Err(BoundaryError::UnknownNode(Id(99)))
        );
    }

    #[test]
    fn nodes_around_boundaries() {
        let (doc, p, foo, bold, bar, br, _) = doc();
        assert_eq!(node_after(&doc, Boundary::new(p, 1)), Some(bold));
        assert_eq!(node_before(&doc, Boundary::new(p, 1)), Some(foo));
        assert_eq!(node_after(&doc, Boundary::new(foo, 3)), Some(bold));
        assert_eq!(node_after(&doc, Boundary::new(foo, 1)), None);
        assert_eq!(node_before(&doc, Boundary::new(bar, 0)), None);
        assert_eq!(next_node(&doc, Boundary::new(p, 2)), br);
        assert_eq!(prev_node(&doc, Boundary::new(p, 0)), p);
        assert_eq!(next_node(&doc, Boundary::new(bar, 1)), bar);
    }

    #[test]
    fn structural_steps() {
        let (doc, p, foo, bold, bar, _, baz) = doc();
        assert_eq!(next(&doc, Boundary::new(p, 0)), Some(Boundary::new(foo, 0)));
        assert_eq!(next(&doc, Boundary::new(foo, 0)), Some(Boundary::new(p, 1)));
        assert_eq!(next(&doc, Boundary::new(p, 1)), Some(Boundary::new(bold, 0)));
        assert_eq!(next(&doc, Boundary::new(bar, 2)), Some(Boundary::new(bold, 1)));
        // Voids are jumped over.
        assert_eq!(next(&doc, Boundary::new(p, 2)), Some(Boundary::new(p, 3)));
        assert_eq!(prev(&doc, Boundary::new(p, 3)), Some(Boundary::new(p, 2)));
        assert_eq!(prev(&doc, Boundary::new(p, 4)), Some(Boundary::new(baz, 3)));
        assert_eq!(prev(&doc, Boundary::new(bold, 0)), Some(Boundary::new(p, 1)));
        assert_eq!(next(&doc, Boundary::new(doc.root(), 1)), None);
    }

    #[test]
    fn boundary_order() {
        let (doc, p, foo, bold, bar, ..) = doc();
        let a = Boundary::new(foo, 1);
        let b = Boundary::new(bar, 0);
        assert_eq!(compare_boundaries(&doc, a, b), Ordering::Less);
        assert_eq!(compare_boundaries(&doc, b, a), Ordering::Greater);
        // (p, 2) sits after the whole <b>.
        assert_eq!(compare_boundaries(&doc, Boundary::new(p, 2), b), Ordering::Greater);
        assert_eq!(compare_boundaries(&doc, Boundary::new(p, 1), b), Ordering::Less);
        assert_eq!(compare_boundaries(&doc, Boundary::new(bold, 0), b), Ordering::Less);
        assert!(is_reversed(&doc, b, a));
        assert!(Range::new(&doc, b, a).is_err());
        assert_eq!(Range::ordered(&doc, b, a).start(), a);
    }
}
