use crate::tags::Tag;

pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    /// The document node of every snapshot.
    pub const ROOT: Id = Id(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct ElementData {
    /// Lowercase tag name as written.
    pub name: String,
    /// Closed category variant, assigned once when the element is created.
    pub tag: Tag,
    pub attributes: Vec<(String, Option<String>)>,
    /// Specified declarations, filled in by the style cascade.
    pub style: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(name: &str, attributes: Vec<(String, Option<String>)>) -> Self {
        let name = name.to_ascii_lowercase();
        let tag = Tag::from_name(&name);
        Self {
            name,
            tag,
            attributes,
            style: Vec::new(),
        }
    }

    /// Attribute value; valueless attributes read as `""`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) parent: Option<Id>,
    pub(crate) children: Vec<Id>,
    pub kind: NodeKind,
}

impl Node {
    #[inline]
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An arena-backed snapshot of a document tree.
///
/// The snapshot is owned by the embedder. Navigation code only reads it;
/// the single mutation entry point, [`Document::set_text`], exists for
/// editing collaborators and bumps [`Document::revision`] so callers can
/// tell that previously computed boundaries may be stale.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            revision: 0,
        }
    }

    #[inline]
    pub fn root(&self) -> Id {
        Id::ROOT
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        (0..self.nodes.len()).map(|i| Id(i as NodeId))
    }

    #[inline]
    pub fn get(&self, id: Id) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Panics if `id` does not belong to this snapshot.
    #[inline]
    pub fn node(&self, id: Id) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: Id) -> &NodeKind {
        &self.node(id).kind
    }

    #[inline]
    pub fn parent(&self, id: Id) -> Option<Id> {
        self.node(id).parent
    }

    #[inline]
    pub fn children(&self, id: Id) -> &[Id] {
        &self.node(id).children
    }

    pub fn child(&self, id: Id, index: usize) -> Option<Id> {
        self.children(id).get(index).copied()
    }

    pub fn first_child(&self, id: Id) -> Option<Id> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: Id) -> Option<Id> {
        self.children(id).last().copied()
    }

    /// Position of `id` among its parent's children (0 for the root).
    pub fn index_in_parent(&self, id: Id) -> usize {
        self.parent(id)
            .and_then(|p| self.children(p).iter().position(|&c| c == id))
            .unwrap_or(0)
    }

    pub fn next_sibling(&self, id: Id) -> Option<Id> {
        let parent = self.parent(id)?;
        self.child(parent, self.index_in_parent(id) + 1)
    }

    pub fn prev_sibling(&self, id: Id) -> Option<Id> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id);
        if index == 0 {
            return None;
        }
        self.child(parent, index - 1)
    }

    #[inline]
    pub fn is_text(&self, id: Id) -> bool {
        matches!(self.kind(id), NodeKind::Text(_))
    }

    #[inline]
    pub fn is_element(&self, id: Id) -> bool {
        matches!(self.kind(id), NodeKind::Element(_))
    }

    #[inline]
    pub fn is_comment(&self, id: Id) -> bool {
        matches!(self.kind(id), NodeKind::Comment(_))
    }

    #[inline]
    pub fn text(&self, id: Id) -> Option<&str> {
        self.node(id).as_text()
    }

    #[inline]
    pub fn element(&self, id: Id) -> Option<&ElementData> {
        self.node(id).as_element()
    }

    #[inline]
    pub fn tag(&self, id: Id) -> Option<Tag> {
        self.element(id).map(|e| e.tag)
    }

    pub fn is_tag(&self, id: Id, tag: Tag) -> bool {
        self.tag(id) == Some(tag)
    }

    pub fn attr(&self, id: Id, key: &str) -> Option<&str> {
        self.element(id)?.attr(key)
    }

    /// Text length in bytes for text nodes, child count otherwise.
    ///
    /// This is the largest valid boundary offset inside `id`.
    pub fn node_len(&self, id: Id) -> usize {
        match self.kind(id) {
            NodeKind::Text(text) => text.len(),
            NodeKind::Comment(_) => 0,
            NodeKind::Document | NodeKind::Element(_) => self.children(id).len(),
        }
    }

    /// Replace the content of a text node. Returns `false` for non-text nodes.
    pub fn set_text(&mut self, id: Id, text: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return false;
        };
        match &mut node.kind {
            NodeKind::Text(current) => {
                *current = text.into();
                self.revision += 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn element_mut(&mut self, id: Id) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id.index())?.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Set the specified declarations of an element, as computed by a cascade.
    pub fn set_specified_style(&mut self, id: Id, style: Vec<(String, String)>) {
        if let Some(data) = self.element_mut(id) {
            data.style = style;
            self.revision += 1;
        }
    }

    pub(crate) fn push_child(&mut self, parent: Id, kind: NodeKind) -> Id {
        let id = Id(self.nodes.len() as NodeId);
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.index()].children.push(id);
        self.revision += 1;
        id
    }
}
