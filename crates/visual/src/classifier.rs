//! Rendering classifier.
//!
//! Pure predicates deciding whether a node or a whitespace run takes part in
//! the rendered output. They read the tree and computed styles only; no
//! layout is consulted.

use std::ops::Range;

use css::{Display, WhiteSpace};
use html::boundaries::{self as raw, Boundary};
use html::{Id, NodeKind, Tag};

use crate::View;

/// True for text that is empty or holds only breaking whitespace, under a
/// `white-space` that collapses it. Siblings are not examined.
pub fn is_unrendered_whitespace_no_block_check(view: View<'_>, id: Id) -> bool {
    let Some(text) = view.doc.text(id) else {
        return false;
    };
    if text.is_empty() {
        return true;
    }
    if !tools::is_only_breaking_whitespace(text) {
        return false;
    }
    match view.style(id).white_space {
        ws if ws.preserves_spaces() => false,
        WhiteSpace::PreLine => !tools::has_line_terminator(text),
        _ => true,
    }
}

/// Nodes that force content after them onto a new line: `br` and every
/// element whose display is not inline-level.
pub fn has_linebreaking_style(view: View<'_>, id: Id) -> bool {
    match view.doc.kind(id) {
        NodeKind::Document => true,
        NodeKind::Text(_) | NodeKind::Comment(_) => false,
        NodeKind::Element(data) => {
            data.tag == Tag::Br
                || !matches!(
                    view.style(id).display,
                    Display::Inline | Display::InlineBlock | Display::None
                )
        }
    }
}

/// Void elements, and non-editable islands inside editable content. Both
/// are treated as atoms: navigation never enters them.
pub fn is_void_type(view: View<'_>, id: Id) -> bool {
    let doc = view.doc;
    let Some(tag) = doc.tag(id) else {
        return false;
    };
    tag.is_void()
        || (!html::is_editable(doc, id) && doc.parent(id).is_some_and(|p| html::is_editable(doc, p)))
}

/// A position between nodes: before `node`, or at the end of `node`'s
/// children when `at_end` is set. Text and comments are atomic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub node: Id,
    pub at_end: bool,
}

fn is_leaf(view: View<'_>, id: Id) -> bool {
    matches!(view.doc.kind(id), NodeKind::Text(_) | NodeKind::Comment(_))
}

impl Cursor {
    pub fn before(node: Id) -> Self {
        Self {
            node,
            at_end: false,
        }
    }

    /// The position right after `node`.
    pub fn after(view: View<'_>, node: Id) -> Self {
        let doc = view.doc;
        match (doc.next_sibling(node), doc.parent(node)) {
            (Some(next), _) => Self::before(next),
            (None, Some(parent)) => Self {
                node: parent,
                at_end: true,
            },
            (None, None) => Self { node, at_end: true },
        }
    }

    /// Advance one position. Returns false, leaving the cursor alone, at
    /// the end of `bound`.
    pub fn next(&mut self, view: View<'_>, bound: Id) -> bool {
        let doc = view.doc;
        if self.at_end || is_leaf(view, self.node) {
            if self.node == bound {
                return false;
            }
            match (doc.next_sibling(self.node), doc.parent(self.node)) {
                (Some(next), _) => *self = Self::before(next),
                (None, Some(parent)) => {
                    *self = Self {
                        node: parent,
                        at_end: true,
                    }
                }
                (None, None) => return false,
            }
        } else {
            match doc.first_child(self.node) {
                Some(first) => self.node = first,
                None => self.at_end = true,
            }
        }
        true
    }

    /// Step back one position. Returns false before `bound`.
    pub fn prev(&mut self, view: View<'_>, bound: Id) -> bool {
        let doc = view.doc;
        if self.at_end {
            match doc.last_child(self.node) {
                Some(last) => {
                    self.node = last;
                    self.at_end = !is_leaf(view, last);
                }
                None => self.at_end = false,
            }
            return true;
        }
        if self.node == bound {
            return false;
        }
        match (doc.prev_sibling(self.node), doc.parent(self.node)) {
            (Some(prev), _) => {
                self.node = prev;
                self.at_end = !is_leaf(view, prev);
            }
            (None, Some(parent)) => *self = Self::before(parent),
            (None, None) => return false,
        }
        true
    }
}

/// The node at the cursor contributes nothing to the current line by
/// itself: collapsible whitespace, comments, hidden elements, and the
/// edges of inline elements.
fn is_unrendered_at_point(view: View<'_>, cursor: Cursor) -> bool {
    match view.doc.kind(cursor.node) {
        NodeKind::Comment(_) => true,
        NodeKind::Text(_) => is_unrendered_whitespace_no_block_check(view, cursor.node),
        NodeKind::Element(data) => match view.style(cursor.node).display {
            Display::None => true,
            Display::Inline => !data.tag.is_line_breaking_void(),
            _ => false,
        },
        NodeKind::Document => false,
    }
}

/// Move `cursor` forward over unrendered content up to a `br` or block edge.
///
/// Returns false, leaving `cursor` untouched, if rendered content comes
/// first.
pub fn skip_unrendered_to_end_of_line(view: View<'_>, cursor: &mut Cursor) -> bool {
    let bound = view.bound(cursor.node);
    let mut c = *cursor;
    while is_unrendered_at_point(view, c) {
        if !c.next(view, bound) {
            break;
        }
    }
    if !has_linebreaking_style(view, c.node) {
        return false;
    }
    *cursor = c;
    true
}

/// Move `cursor` backward over unrendered content to just after a `br` or
/// block edge.
///
/// A `br` that only terminates its block does not start a line, so the
/// line is taken to start before it in that case.
pub fn skip_unrendered_to_start_of_line(view: View<'_>, cursor: &mut Cursor) -> bool {
    let bound = view.bound(cursor.node);
    let mut c = *cursor;
    if c.prev(view, bound) {
        while is_unrendered_at_point(view, c) && c.prev(view, bound) {}
    }
    if !has_linebreaking_style(view, c.node) {
        return false;
    }
    let br = view.doc.is_tag(c.node, Tag::Br).then_some(c.node);
    c.next(view, bound);
    if let Some(br) = br {
        let mut end_of_block = *cursor;
        if skip_unrendered_to_end_of_line(view, &mut end_of_block) && end_of_block.at_end {
            c = Cursor::before(br);
            if c.prev(view, bound) {
                while is_unrendered_at_point(view, c) && c.prev(view, bound) {}
            }
            if !has_linebreaking_style(view, c.node) {
                return false;
            }
            c.next(view, bound);
        }
    }
    *cursor = c;
    true
}

/// Whitespace-only text that renders nothing because it sits at the start
/// or end of a line.
pub fn is_unrendered_whitespace(view: View<'_>, id: Id) -> bool {
    if !is_unrendered_whitespace_no_block_check(view, id) {
        return false;
    }
    skip_unrendered_to_end_of_line(view, &mut Cursor::before(id))
        || skip_unrendered_to_start_of_line(view, &mut Cursor::before(id))
}

pub fn is_rendered(view: View<'_>, id: Id) -> bool {
    match view.doc.kind(id) {
        NodeKind::Document => true,
        NodeKind::Comment(_) => false,
        NodeKind::Text(_) => is_rendered_text(view, id),
        NodeKind::Element(data) => {
            if view.style(id).display == Display::None {
                return false;
            }
            // li, td and friends take space even when empty
            if data.tag.is_grouped() {
                return true;
            }
            if data.tag == Tag::Br {
                return is_rendered_br(view, id);
            }
            data.tag.is_void() || has_rendered_descendant(view, id)
        }
    }
}

#[inline]
pub fn is_unrendered(view: View<'_>, id: Id) -> bool {
    !is_rendered(view, id)
}

fn is_rendered_text(view: View<'_>, id: Id) -> bool {
    let doc = view.doc;
    if doc.text(id).is_none_or(str::is_empty) {
        return false;
    }
    if !is_unrendered_whitespace_no_block_check(view, id) {
        return true;
    }
    let Some(parent) = doc.parent(id) else {
        return true;
    };
    if !has_linebreaking_style(view, parent) {
        return true;
    }
    // Whitespace directly inside a block only renders between content.
    let siblings = doc.children(parent);
    let index = doc.index_in_parent(id);
    siblings[..index].iter().any(|&s| is_sibling_content(view, s))
        && siblings[index + 1..].iter().any(|&s| is_sibling_content(view, s))
}

/// Inline content next to whitespace-only text. Blocks, `br` and other
/// whitespace never count, so the test does not recurse sideways.
fn is_sibling_content(view: View<'_>, id: Id) -> bool {
    if has_linebreaking_style(view, id) || is_unrendered_whitespace_no_block_check(view, id) {
        return false;
    }
    is_rendered(view, id)
}

fn has_rendered_descendant(view: View<'_>, id: Id) -> bool {
    let doc = view.doc;
    let mut stack: Vec<Id> = doc.children(id).iter().rev().copied().collect();
    while let Some(node) = stack.pop() {
        match doc.kind(node) {
            NodeKind::Text(_) => {
                if is_rendered_text(view, node) {
                    return true;
                }
            }
            NodeKind::Element(data) => {
                if view.style(node).display == Display::None {
                    continue;
                }
                if data.tag.is_grouped() {
                    return true;
                }
                if data.tag.is_void() {
                    if data.tag != Tag::Br || is_rendered_br(view, node) {
                        return true;
                    }
                    continue;
                }
                stack.extend(doc.children(node).iter().rev().copied());
            }
            NodeKind::Comment(_) | NodeKind::Document => {}
        }
    }
    false
}

/// Cheap unrendered test used while walking around a `br`. It never looks
/// at another `br`, so the walks cannot cycle.
fn is_shallow_unrendered(view: View<'_>, id: Id) -> bool {
    match view.doc.kind(id) {
        NodeKind::Comment(_) => true,
        NodeKind::Text(_) => is_unrendered_whitespace_no_block_check(view, id),
        NodeKind::Element(data) => {
            view.style(id).display == Display::None
                || (!data.tag.is_void() && !data.tag.is_grouped() && view.doc.children(id).is_empty())
        }
        NodeKind::Document => false,
    }
}

fn is_at_start_shallow(view: View<'_>, b: Boundary) -> bool {
    if let Some(text) = view.doc.text(b.container()) {
        return tools::is_only_breaking_whitespace(&text[..b.offset().min(text.len())]);
    }
    view.doc.children(b.container())[..b.offset()]
        .iter()
        .all(|&n| is_shallow_unrendered(view, n))
}

fn is_at_end_shallow(view: View<'_>, b: Boundary) -> bool {
    if let Some(text) = view.doc.text(b.container()) {
        return tools::is_only_breaking_whitespace(&text[b.offset().min(text.len())..]);
    }
    view.doc.children(b.container())[b.offset()..]
        .iter()
        .all(|&n| is_shallow_unrendered(view, n))
}

/// A `br` is significant unless it only restates a line boundary that is
/// already there.
pub fn is_rendered_br(view: View<'_>, br: Id) -> bool {
    let doc = view.doc;
    if !doc.is_tag(br, Tag::Br) {
        return false;
    }
    let ignorable = |n: Id| match doc.kind(n) {
        NodeKind::Comment(_) => true,
        NodeKind::Text(_) => is_unrendered_whitespace_no_block_check(view, n),
        NodeKind::Element(data) => {
            data.tag != Tag::Br && !data.tag.is_void() && doc.children(n).is_empty()
        }
        NodeKind::Document => false,
    };
    let mut prev = doc.prev_sibling(br);
    while let Some(n) = prev.filter(|&n| ignorable(n)) {
        prev = doc.prev_sibling(n);
    }
    let mut next = doc.next_sibling(br);
    while let Some(n) = next.filter(|&n| ignorable(n)) {
        next = doc.next_sibling(n);
    }
    let is_br = |n: Id| doc.is_tag(n, Tag::Br);

    // Between two visible siblings inside an inline element.
    let parent_inline = doc.parent(br).is_some_and(|p| !has_linebreaking_style(view, p));
    if prev.is_some() && next.is_some() && parent_inline {
        return true;
    }
    // Between two brs or inline nodes.
    let soft = |n: Id| is_br(n) || !has_linebreaking_style(view, n);
    if prev.is_some_and(soft) && next.is_some_and(soft) {
        return true;
    }
    // Next to another br.
    if prev.is_some_and(is_br) || next.is_some_and(is_br) {
        return true;
    }

    let host = view.bound(br);

    // First space-consuming node of a line-breaking container.
    let mut b = raw::from_node(doc, br);
    while is_at_start_shallow(view, b) {
        let container = b.container();
        if container == host || has_linebreaking_style(view, container) {
            return true;
        }
        match raw::prev(doc, b) {
            Some(prev) => b = prev,
            None => return true,
        }
    }

    let mut b = raw::after_node(doc, br);
    while is_at_end_shallow(view, b) {
        let container = b.container();
        if has_linebreaking_style(view, container) {
            return false;
        }
        if container == host {
            return true;
        }
        match raw::next(doc, b) {
            Some(next) => b = next,
            None => return true,
        }
    }
    let following = doc.children(b.container())[b.offset()..]
        .iter()
        .copied()
        .find(|&n| !is_shallow_unrendered(view, n))
        .unwrap_or(b.container());
    !has_linebreaking_style(view, following)
}

/// Byte ranges of a text node that collapse away.
///
/// Interior runs of breaking whitespace keep their first character. A run
/// at the start of the node also loses that character when the line starts
/// there or the preceding text already ended in a space; a run at the end
/// collapses entirely when the line ends there.
pub fn collapsed_whitespace_runs(view: View<'_>, id: Id) -> Vec<Range<usize>> {
    let Some(text) = view.doc.text(id) else {
        return Vec::new();
    };
    if text.is_empty() {
        return Vec::new();
    }
    if !is_rendered(view, id) {
        return vec![0..text.len()];
    }
    let ws = view.style(id).white_space;
    if ws.preserves_spaces() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for run in whitespace_runs(text) {
        if ws == WhiteSpace::PreLine && tools::has_line_terminator(&text[run.clone()]) {
            // Spaces around preserved newlines vanish; the newlines stay.
            let mut start = None;
            for (i, c) in text[run.clone()].char_indices() {
                let at = run.start + i;
                match (tools::is_line_terminator(c), start) {
                    (true, Some(s)) => {
                        out.push(s..at);
                        start = None;
                    }
                    (false, None) => start = Some(at),
                    _ => {}
                }
            }
            if let Some(s) = start {
                out.push(s..run.end);
            }
            continue;
        }
        let leading = run.start == 0;
        let trailing = run.end == text.len();
        let keep_first = !leading || !(starts_line(view, id) || follows_collapsible_space(view, id));
        if trailing && ends_line(view, id) {
            out.push(run);
        } else if keep_first {
            let first = text[run.clone()].chars().next().map_or(0, char::len_utf8);
            if run.start + first < run.end {
                out.push(run.start + first..run.end);
            }
        } else {
            out.push(run);
        }
    }
    out
}

/// Character spans of a text node that survive whitespace collapsing.
pub fn rendered_char_spans(view: View<'_>, id: Id) -> Vec<(usize, usize)> {
    let Some(text) = view.doc.text(id) else {
        return Vec::new();
    };
    let collapsed = collapsed_whitespace_runs(view, id);
    text.char_indices()
        .map(|(i, c)| (i, i + c.len_utf8()))
        .filter(|&(start, _)| !collapsed.iter().any(|r| r.contains(&start)))
        .collect()
}

fn whitespace_runs(text: &str) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (tools::is_breaking_whitespace(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..text.len());
    }
    runs
}

fn starts_line(view: View<'_>, id: Id) -> bool {
    skip_unrendered_to_start_of_line(view, &mut Cursor::before(id))
}

fn ends_line(view: View<'_>, id: Id) -> bool {
    skip_unrendered_to_end_of_line(view, &mut Cursor::after(view, id))
}

/// The closest text before `id` on the same line ends in a collapsible
/// space.
fn follows_collapsible_space(view: View<'_>, id: Id) -> bool {
    let bound = view.bound(id);
    let mut c = Cursor::before(id);
    while c.prev(view, bound) {
        match view.doc.kind(c.node) {
            NodeKind::Text(text) => {
                if let Some(last) = text.chars().next_back() {
                    return tools::is_breaking_whitespace(last)
                        && !view.style(c.node).white_space.preserves_spaces();
                }
            }
            NodeKind::Comment(_) => {}
            NodeKind::Element(data) => {
                if view.style(c.node).display != Display::Inline || data.tag.is_void() {
                    return false;
                }
            }
            NodeKind::Document => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use html_test_support::Fixture;

    fn text_runs(markup: &str, text: &str) -> Vec<Range<usize>> {
        let f = Fixture::editable(markup);
        let view = View::new(&f.doc, &f.styles);
        collapsed_whitespace_runs(view, f.text_node(text))
    }

    #[test]
    fn interior_run_keeps_one_space() {
        assert_eq!(text_runs("<p>a   b</p>", "a   b"), vec![2..4]);
        assert_eq!(text_runs("<p>a b</p>", "a b"), Vec::<Range<usize>>::new());
    }

    #[test]
    fn line_edges_collapse_fully() {
        assert_eq!(text_runs("<p>  ab  </p>", "  ab  "), vec![0..2, 4..6]);
        assert_eq!(text_runs("<p>foo<br>  bar</p>", "  bar"), vec![0..2]);
    }

    #[test]
    fn space_after_space_collapses_across_nodes() {
        assert_eq!(text_runs("<p>foo <b> bar</b></p>", " bar"), vec![0..1]);
        assert_eq!(text_runs("<p>foo<b> bar</b></p>", " bar"), Vec::<Range<usize>>::new());
    }

    #[test]
    fn preserved_whitespace_never_collapses() {
        assert!(text_runs("<pre>a   b  </pre>", "a   b  ").is_empty());
        let runs = text_runs("<p style=\"white-space: pre-line\">a  \n  b</p>", "a  \n  b");
        assert_eq!(runs, vec![1..3, 4..6]);
    }

    #[test]
    fn whitespace_text_between_blocks_is_unrendered() {
        let f = Fixture::editable("<p>foo</p>\n  <p>bar</p>");
        let view = View::new(&f.doc, &f.styles);
        let ws = f.text_node("\n  ");
        assert!(is_unrendered_whitespace_no_block_check(view, ws));
        assert!(is_unrendered_whitespace(view, ws));
        assert!(!is_rendered(view, ws));
        assert_eq!(collapsed_whitespace_runs(view, ws), vec![0..3]);
    }

    #[test]
    fn whitespace_between_inline_content_is_rendered() {
        let f = Fixture::editable("<p><b>foo</b> <i>bar</i></p>");
        let view = View::new(&f.doc, &f.styles);
        let ws = f.text_node(" ");
        assert!(!is_unrendered_whitespace(view, ws));
        assert!(is_rendered(view, ws));
    }

    #[test]
    fn nbsp_and_preserved_text_are_content() {
        let f = Fixture::editable("<p>\u{a0}</p><pre>  </pre>");
        let view = View::new(&f.doc, &f.styles);
        assert!(!is_unrendered_whitespace_no_block_check(view, f.text_node("\u{a0}")));
        assert!(!is_unrendered_whitespace_no_block_check(view, f.text_node("  ")));
    }

    #[test]
    fn elements_render_through_descendants() {
        let f = Fixture::editable("<p><b></b></p><ul><li></li></ul><p><!--x--></p><p><img></p>");
        let view = View::new(&f.doc, &f.styles);
        assert!(!is_rendered(view, f.element("p", 0)));
        assert!(!is_rendered(view, f.element("b", 0)));
        assert!(is_rendered(view, f.element("li", 0)));
        assert!(is_rendered(view, f.element("ul", 0)));
        assert!(!is_rendered(view, f.element("p", 1)));
        assert!(is_rendered(view, f.element("p", 2)));
    }

    #[test]
    fn hidden_elements_are_unrendered() {
        let f = Fixture::editable("<p>a<span style=\"display: none\">b</span></p>");
        let view = View::new(&f.doc, &f.styles);
        assert!(!is_rendered(view, f.element("span", 0)));
        assert!(!has_linebreaking_style(view, f.element("span", 0)));
    }

    #[test]
    fn linebreaking_and_void_types() {
        let f = Fixture::editable("<p>a<b>b</b><br><img><span contenteditable=\"false\">c</span></p>");
        let view = View::new(&f.doc, &f.styles);
        assert!(has_linebreaking_style(view, f.element("p", 0)));
        assert!(has_linebreaking_style(view, f.element("br", 0)));
        assert!(!has_linebreaking_style(view, f.element("b", 0)));
        assert!(!has_linebreaking_style(view, f.text_node("a")));
        assert!(is_void_type(view, f.element("img", 0)));
        assert!(is_void_type(view, f.element("span", 0)));
        assert!(!is_void_type(view, f.element("b", 0)));
    }

    fn br_rendered(markup: &str, nth: usize) -> bool {
        let f = Fixture::editable(markup);
        let view = View::new(&f.doc, &f.styles);
        is_rendered_br(view, f.element("br", nth))
    }

    #[test]
    fn trailing_br_is_unrendered() {
        assert!(!br_rendered("<p>foo<br></p>", 0));
        assert!(!br_rendered("<p>foo<br>  </p>", 0));
        assert!(!br_rendered("<p><b>foo<br></b></p>", 0));
        assert!(!br_rendered("foo<br><p>bar</p>", 0));
    }

    #[test]
    fn significant_brs() {
        assert!(br_rendered("<p><br></p>", 0));
        assert!(br_rendered("<p>foo<br>bar</p>", 0));
        assert!(br_rendered("<p>foo<br><br></p>", 0));
        assert!(br_rendered("<p>foo<br><br></p>", 1));
        assert!(br_rendered("<p><b>foo<br></b>bar</p>", 0));
        assert!(br_rendered("<p>foo<br><!--c--><i></i>bar</p>", 0));
    }

    #[test]
    fn br_in_nested_lists() {
        let markup = "<ul><li>a<ul><li>b<br></li><li><br></li></ul></li><li><b>c<br></b></li></ul>";
        assert!(!br_rendered(markup, 0));
        assert!(br_rendered(markup, 1));
        assert!(!br_rendered(markup, 2));
        assert!(!br_rendered("<ul><li>a<br><ul><li>b</li></ul></li></ul>", 0));
    }

    #[test]
    fn br_in_tables() {
        let markup = "<table><tbody><tr><td>a<br></td><td><br></td><td>b<br>c</td></tr></tbody></table>";
        assert!(!br_rendered(markup, 0));
        assert!(br_rendered(markup, 1));
        assert!(br_rendered(markup, 2));
    }

    #[test]
    fn br_directly_in_host_is_bounded_by_it() {
        assert!(br_rendered("<br>", 0));
        assert!(!br_rendered("foo<br>", 0));
        assert!(br_rendered("<b><br></b>", 0));
    }

    #[test]
    fn cursor_walks_stay_inside_the_host() {
        let f = Fixture::editable("<p>a</p>");
        let view = View::new(&f.doc, &f.styles);
        let host = f.host;
        let mut c = Cursor {
            node: host,
            at_end: true,
        };
        assert!(!c.next(view, host));
        let mut c = Cursor::before(f.element("p", 0));
        assert!(c.prev(view, host));
        assert_eq!(c, Cursor::before(host));
        assert!(!c.prev(view, host));
    }

    #[test]
    fn skipping_to_line_edges() {
        let f = Fixture::editable("<p>foo <b> </b><br>bar</p>");
        let view = View::new(&f.doc, &f.styles);
        let mut c = Cursor::before(f.element("b", 0));
        assert!(skip_unrendered_to_end_of_line(view, &mut c));
        assert_eq!(c, Cursor::before(f.element("br", 0)));

        let mut c = Cursor::before(f.text_node("bar"));
        assert!(skip_unrendered_to_start_of_line(view, &mut c));
        assert_eq!(c, Cursor::before(f.text_node("bar")));

        let mut c = Cursor::before(f.text_node("foo "));
        assert!(!skip_unrendered_to_end_of_line(view, &mut c));
        assert_eq!(c, Cursor::before(f.text_node("foo ")));
    }
}
