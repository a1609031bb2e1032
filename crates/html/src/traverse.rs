//! Iterative tree walks.
//!
//! Every walk is a loop with an explicit stop predicate and an explicit
//! bound node it never climbs past, so depth of the tree never turns into
//! depth of the call stack.

use std::cmp::Ordering;

use crate::{Document, Id};

/// Strict ancestors of a node, nearest first.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<Id>,
}

impl Iterator for Ancestors<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

pub fn ancestors(doc: &Document, id: Id) -> Ancestors<'_> {
    Ancestors {
        doc,
        next: doc.parent(id),
    }
}

/// True if `ancestor` is `node` or one of its ancestors.
pub fn contains(doc: &Document, ancestor: Id, node: Id) -> bool {
    ancestor == node || ancestors(doc, node).any(|a| a == ancestor)
}

/// Preorder descendants of `root`, excluding `root` itself.
pub struct Descendants<'a> {
    doc: &'a Document,
    root: Id,
    next: Option<Id>,
}

impl Iterator for Descendants<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.next?;
        self.next = next_in_preorder(self.doc, current, self.root);
        Some(current)
    }
}

pub fn descendants(doc: &Document, root: Id) -> Descendants<'_> {
    Descendants {
        doc,
        root,
        next: doc.first_child(root),
    }
}

/// The deepest last descendant of `id`, or `id` when it has no children.
pub fn last_descendant(doc: &Document, id: Id) -> Id {
    let mut current = id;
    while let Some(last) = doc.last_child(current) {
        current = last;
    }
    current
}

/// Next node in document order, never leaving the subtree of `bound`.
pub fn next_in_preorder(doc: &Document, id: Id, bound: Id) -> Option<Id> {
    if let Some(first) = doc.first_child(id) {
        return Some(first);
    }
    let mut current = id;
    loop {
        if current == bound {
            return None;
        }
        if let Some(next) = doc.next_sibling(current) {
            return Some(next);
        }
        current = doc.parent(current)?;
    }
}

/// Previous node in document order, never leaving the subtree of `bound`.
pub fn prev_in_preorder(doc: &Document, id: Id, bound: Id) -> Option<Id> {
    if id == bound {
        return None;
    }
    match doc.prev_sibling(id) {
        Some(prev) => Some(last_descendant(doc, prev)),
        None => doc.parent(id),
    }
}

/// Walk next siblings, backtracking through ancestors when a level runs
/// out, until `until` matches. Ancestors are visited on the way up.
/// The walk never climbs above `bound`.
pub fn forward_preorder_backtrace_until(
    doc: &Document,
    node: Id,
    bound: Id,
    mut until: impl FnMut(Id) -> bool,
) -> Option<Id> {
    let mut current = node;
    loop {
        if current == bound {
            return None;
        }
        current = match doc.next_sibling(current) {
            Some(next) => next,
            None => doc.parent(current)?,
        };
        if until(current) {
            return Some(current);
        }
    }
}

/// Mirror of [`forward_preorder_backtrace_until`] over previous siblings.
pub fn backward_preorder_backtrace_until(
    doc: &Document,
    node: Id,
    bound: Id,
    mut until: impl FnMut(Id) -> bool,
) -> Option<Id> {
    let mut current = node;
    loop {
        if current == bound {
            return None;
        }
        current = match doc.prev_sibling(current) {
            Some(prev) => prev,
            None => doc.parent(current)?,
        };
        if until(current) {
            return Some(current);
        }
    }
}

/// The nearest sibling of `node` or of one of its ancestors (in the given
/// direction) that satisfies `matches`. Ancestors themselves are never
/// returned. Gives up as soon as `until` holds for the node being left.
pub fn next_non_ancestor(
    doc: &Document,
    node: Id,
    backwards: bool,
    mut matches: impl FnMut(Id) -> bool,
    mut until: impl FnMut(Id) -> bool,
) -> Option<Id> {
    let mut current = node;
    loop {
        if until(current) {
            return None;
        }
        let sibling = if backwards {
            doc.prev_sibling(current)
        } else {
            doc.next_sibling(current)
        };
        match sibling {
            Some(next) => {
                if matches(next) {
                    return Some(next);
                }
                current = next;
            }
            None => current = doc.parent(current)?,
        }
    }
}

/// Climb from `node` while `predicate` holds. Returns the first node where it
/// fails, or `None` if the root was passed.
pub fn up_while(doc: &Document, node: Id, mut predicate: impl FnMut(Id) -> bool) -> Option<Id> {
    let mut current = node;
    while predicate(current) {
        current = doc.parent(current)?;
    }
    Some(current)
}

/// Preorder comparison of two nodes. An ancestor sorts before its descendants.
pub fn compare_document_order(doc: &Document, a: Id, b: Id) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let path_a = path_from_root(doc, a);
    let path_b = path_from_root(doc, b);
    for (x, y) in path_a.iter().zip(path_b.iter()) {
        if x != y {
            return doc.index_in_parent(*x).cmp(&doc.index_in_parent(*y));
        }
    }
    path_a.len().cmp(&path_b.len())
}

fn path_from_root(doc: &Document, id: Id) -> Vec<Id> {
    let mut path: Vec<Id> = ancestors(doc, id).collect();
    path.reverse();
    path.push(id);
    path
}
