use crate::traverse::{descendants, up_while};
use crate::{Document, Id, NodeKind};

fn contenteditable_state(doc: &Document, id: Id) -> Option<bool> {
    let value = doc.attr(id, "contenteditable")?;
    if value.is_empty() || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("plaintext-only") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Editability is inherited from the nearest element that says so explicitly.
/// Text and comment nodes follow their parent.
pub fn is_editable(doc: &Document, id: Id) -> bool {
    let mut current = Some(id);
    while let Some(node) = current {
        if let Some(state) = contenteditable_state(doc, node) {
            return state;
        }
        current = doc.parent(node);
    }
    false
}

/// An editable element whose parent is not editable.
pub fn is_editing_host(doc: &Document, id: Id) -> bool {
    contenteditable_state(doc, id) == Some(true)
        && doc.parent(id).is_none_or(|p| !is_editable(doc, p))
}

/// The editing host that owns `id`, if `id` is editable.
pub fn editing_host(doc: &Document, id: Id) -> Option<Id> {
    if !is_editable(doc, id) {
        return None;
    }
    up_while(doc, id, |n| !is_editing_host(doc, n))
}

/// All editing hosts of the document, in document order.
pub fn editing_hosts(doc: &Document) -> Vec<Id> {
    descendants(doc, doc.root())
        .filter(|&id| is_editing_host(doc, id))
        .collect()
}

pub fn is_non_rendering_element(doc: &Document, id: Id) -> bool {
    doc.tag(id).is_some_and(|tag| tag.is_non_rendering())
}

/// Concatenated text of every text node under `id`.
pub fn text_content(doc: &Document, id: Id) -> String {
    if let Some(text) = doc.text(id) {
        return text.to_string();
    }
    let mut out = String::new();
    for node in descendants(doc, id) {
        if let NodeKind::Text(text) = doc.kind(node) {
            out.push_str(text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentBuilder;

    #[test]
    fn hosts_and_islands() {
        let mut b = DocumentBuilder::new();
        let host = b.open_with("div", vec![("contenteditable".into(), Some("true".into()))]);
        let p = b.open("p");
        let t = b.text("x");
        b.close();
        let island = b.open_with("span", vec![("contenteditable".into(), Some("false".into()))]);
        let inner = b.text("locked");
        b.close();
        b.close();
        let outside = b.text("outside");
        let doc = b.finish();

        assert!(is_editing_host(&doc, host));
        assert!(!is_editing_host(&doc, p));
        assert!(is_editable(&doc, t));
        assert_eq!(editing_host(&doc, t), Some(host));
        assert!(!is_editable(&doc, island));
        assert!(!is_editable(&doc, inner));
        assert_eq!(editing_host(&doc, inner), None);
        assert_eq!(editing_host(&doc, outside), None);
        assert_eq!(editing_hosts(&doc), vec![host]);
        assert_eq!(text_content(&doc, host), "xlocked");
    }
}
