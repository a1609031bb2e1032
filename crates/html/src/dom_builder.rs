use crate::types::{Document, ElementData, Id, NodeKind};

/// Incremental arena construction of a [`Document`].
///
/// Elements are opened and closed explicitly. Void elements (`br`, `img`,
/// ...) are appended without being pushed on the open stack, so they never
/// receive children.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
    open_elements: Vec<Id>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node new children are appended to.
    pub fn current(&self) -> Id {
        self.open_elements.last().copied().unwrap_or(Id::ROOT)
    }

    pub fn open(&mut self, name: &str) -> Id {
        self.open_with(name, Vec::new())
    }

    pub fn open_with(&mut self, name: &str, attributes: Vec<(String, Option<String>)>) -> Id {
        let data = ElementData::new(name, attributes);
        let is_void = data.tag.is_void();
        let parent = self.current();
        let id = self.doc.push_child(parent, NodeKind::Element(data));
        if !is_void {
            self.open_elements.push(id);
        }
        id
    }

    /// Append a void element (or any element that stays empty).
    pub fn void(&mut self, name: &str) -> Id {
        let parent = self.current();
        self.doc
            .push_child(parent, NodeKind::Element(ElementData::new(name, Vec::new())))
    }

    /// Close the innermost open element.
    pub fn close(&mut self) -> Option<Id> {
        self.open_elements.pop()
    }

    /// Close open elements up to and including the innermost `name`.
    ///
    /// Returns `None` and leaves the stack alone if no such element is open.
    pub fn close_named(&mut self, name: &str) -> Option<Id> {
        let pos = self.open_elements.iter().rposition(|&id| {
            self.doc
                .element(id)
                .is_some_and(|e| e.name.eq_ignore_ascii_case(name))
        })?;
        let id = self.open_elements[pos];
        self.open_elements.truncate(pos);
        Some(id)
    }

    pub fn text(&mut self, text: &str) -> Id {
        let parent = self.current();
        self.doc.push_child(parent, NodeKind::Text(text.to_string()))
    }

    pub fn comment(&mut self, text: &str) -> Id {
        let parent = self.current();
        self.doc.push_child(parent, NodeKind::Comment(text.to_string()))
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Close everything still open and hand out the snapshot.
    pub fn finish(mut self) -> Document {
        if !self.open_elements.is_empty() {
            log::trace!(
                target: "html.builder",
                "closing {} unclosed element(s) at finish",
                self.open_elements.len()
            );
            self.open_elements.clear();
        }
        self.doc
    }
}
