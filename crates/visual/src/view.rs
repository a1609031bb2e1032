use css::{ComputedStyle, StyleMap};
use html::{Boundary, Document, Id};

/// A document snapshot together with its computed styles.
///
/// Every predicate in this crate reads through a `View`; nothing here
/// mutates the tree.
#[derive(Clone, Copy)]
pub struct View<'a> {
    pub doc: &'a Document,
    pub styles: &'a StyleMap,
}

impl<'a> View<'a> {
    pub fn new(doc: &'a Document, styles: &'a StyleMap) -> Self {
        Self { doc, styles }
    }

    #[inline]
    pub fn style(&self, id: Id) -> &'a ComputedStyle {
        self.styles.get(id)
    }

    /// Style of the element that lays out `id`: the node itself for
    /// elements, the parent for text.
    pub fn element_style(&self, id: Id) -> &'a ComputedStyle {
        match self.doc.parent(id) {
            Some(parent) if !self.doc.is_element(id) => self.styles.get(parent),
            _ => self.styles.get(id),
        }
    }

    pub fn font_size(&self, id: Id) -> f32 {
        self.element_style(id).font_px()
    }

    /// The editing host that owns `id`, if any.
    pub fn host(&self, id: Id) -> Option<Id> {
        html::editing_host(self.doc, id)
    }

    /// The node no walk from `id` may leave: its editing host, or the
    /// document root for content outside any host.
    pub fn bound(&self, id: Id) -> Id {
        self.host(id).unwrap_or(self.doc.root())
    }

    pub fn boundary_host(&self, b: Boundary) -> Option<Id> {
        self.host(b.container())
    }
}
