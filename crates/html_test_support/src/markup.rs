//! Marked markup: a small tag notation with selection markers.
//!
//! `|` marks a collapsed text boundary, `[` and `]` the ends of a selection
//! in text, `{` and `}` the ends of a selection between nodes. A text
//! marker with no adjacent text falls back to the element boundary at its
//! position. Entities: `&nbsp;`, `&amp;`, `&lt;`, `&gt;`, `&quot;` and
//! numeric references.

use css::StyleMap;
use html::{Boundary, Document, DocumentBuilder, Id, NodeKind};
use layout::{FlowLayout, FlowOptions, MonospaceMeasurer};

/// A parsed, styled and laid-out document with its markers.
pub struct Fixture {
    pub doc: Document,
    pub styles: StyleMap,
    pub layout: FlowLayout,
    /// The editing host wrapping the markup, or the document root.
    pub host: Id,
    /// Marker positions in order of appearance.
    pub markers: Vec<Boundary>,
}

impl Fixture {
    /// Plain, non-editable content.
    pub fn parse(markup: &str) -> Self {
        Self::build(markup, false, FlowOptions::default())
    }

    /// Content wrapped in `<div contenteditable="true">`.
    pub fn editable(markup: &str) -> Self {
        Self::build(markup, true, FlowOptions::default())
    }

    pub fn editable_with_width(markup: &str, width: f32) -> Self {
        Self::build(
            markup,
            true,
            FlowOptions {
                width,
                ..FlowOptions::default()
            },
        )
    }

    fn build(markup: &str, editable: bool, options: FlowOptions) -> Self {
        let mut parser = Parser::default();
        let host = if editable {
            parser
                .builder
                .open_with("div", vec![("contenteditable".to_string(), Some("true".to_string()))])
        } else {
            Id::ROOT
        };
        parser.run(markup);
        let markers = parser.markers.into_iter().flatten().collect();
        let mut doc = parser.builder.finish();
        css::attach_inline_styles(&mut doc);
        let styles = StyleMap::compute(&doc);
        let layout = FlowLayout::compute(&doc, &styles, &MonospaceMeasurer::default(), options);
        Self {
            doc,
            styles,
            layout,
            host,
            markers,
        }
    }

    /// The selection spelled by the markers: first and last marker, or
    /// `None` without markers.
    pub fn selection(&self) -> Option<(Boundary, Boundary)> {
        Some((*self.markers.first()?, *self.markers.last()?))
    }

    /// First text node whose content is exactly `content`.
    pub fn text_node(&self, content: &str) -> Id {
        self.doc
            .ids()
            .find(|&id| self.doc.text(id) == Some(content))
            .unwrap_or_else(|| panic!("no text node {content:?} in fixture"))
    }

    /// The `nth` element named `name`, in document order.
    pub fn element(&self, name: &str, nth: usize) -> Id {
        self.doc
            .ids()
            .filter(|&id| self.doc.element(id).is_some_and(|e| e.name == name))
            .nth(nth)
            .unwrap_or_else(|| panic!("no element <{name}> #{nth} in fixture"))
    }

    /// The host's content as marked markup with `[start, end]` drawn in.
    pub fn render(&self, start: Boundary, end: Boundary) -> String {
        render(&self.doc, self.host, start, end)
    }
}

enum Item {
    Node(Id),
    Mark(Boundary),
    Close(Id),
}

/// Serialize the children of `root` with selection markers.
pub fn render(doc: &Document, root: Id, start: Boundary, end: Boundary) -> String {
    let marks = |b: Boundary| {
        let text = doc.is_text(b.container());
        let mut out = String::new();
        if start == end {
            if b == start {
                out.push_str(if text { "|" } else { "{}" });
            }
            return out;
        }
        if b == start {
            out.push(if text { '[' } else { '{' });
        }
        if b == end {
            out.push(if text { ']' } else { '}' });
        }
        out
    };

    let mut out = String::new();
    let mut stack = vec![Item::Mark(Boundary::new(root, doc.node_len(root)))];
    for (i, &child) in doc.children(root).iter().enumerate().rev() {
        stack.push(Item::Node(child));
        stack.push(Item::Mark(Boundary::new(root, i)));
    }
    while let Some(item) = stack.pop() {
        match item {
            Item::Mark(b) => out.push_str(&marks(b)),
            Item::Close(id) => {
                if let Some(e) = doc.element(id) {
                    out.push_str(&format!("</{}>", e.name));
                }
            }
            Item::Node(id) => match doc.kind(id) {
                NodeKind::Text(text) => {
                    for (i, c) in text.char_indices() {
                        out.push_str(&marks(Boundary::new(id, i)));
                        push_escaped(&mut out, c);
                    }
                    out.push_str(&marks(Boundary::new(id, text.len())));
                }
                NodeKind::Comment(text) => out.push_str(&format!("<!--{text}-->")),
                NodeKind::Element(e) => {
                    out.push('<');
                    out.push_str(&e.name);
                    for (name, value) in &e.attributes {
                        match value {
                            Some(v) => out.push_str(&format!(" {name}=\"{v}\"")),
                            None => out.push_str(&format!(" {name}")),
                        }
                    }
                    out.push('>');
                    if e.tag.is_void() {
                        continue;
                    }
                    stack.push(Item::Close(id));
                    stack.push(Item::Mark(Boundary::new(id, doc.node_len(id))));
                    for (i, &child) in doc.children(id).iter().enumerate().rev() {
                        stack.push(Item::Node(child));
                        stack.push(Item::Mark(Boundary::new(id, i)));
                    }
                }
                NodeKind::Document => {}
            },
        }
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '\u{a0}' => out.push_str("&nbsp;"),
        c => out.push(c),
    }
}

#[derive(Default)]
struct Parser {
    builder: DocumentBuilder,
    text: String,
    /// Text markers waiting for the current text run: marker index and
    /// byte offset into the run.
    pending: Vec<(usize, usize)>,
    markers: Vec<Option<Boundary>>,
}

impl Parser {
    fn run(&mut self, markup: &str) {
        let mut rest = markup;
        while let Some(c) = rest.chars().next() {
            match c {
                '<' => {
                    self.flush_text();
                    rest = self.tag(rest);
                    continue;
                }
                '&' => {
                    let (decoded, used) = decode_entity(rest);
                    self.text.push(decoded);
                    rest = &rest[used..];
                    continue;
                }
                '|' | '[' | ']' => {
                    self.pending.push((self.markers.len(), self.text.len()));
                    self.markers.push(None);
                }
                '{' | '}' => {
                    self.flush_text();
                    let current = self.builder.current();
                    let len = self.builder.document().children(current).len();
                    self.markers.push(Some(Boundary::new(current, len)));
                }
                c => self.text.push(c),
            }
            rest = &rest[c.len_utf8()..];
        }
        self.flush_text();
    }

    fn flush_text(&mut self) {
        let target = if self.text.is_empty() {
            let current = self.builder.current();
            let len = self.builder.document().children(current).len();
            Boundary::new(current, len)
        } else {
            let id = self.builder.text(&self.text);
            Boundary::new(id, 0)
        };
        for (index, offset) in self.pending.drain(..) {
            self.markers[index] = Some(target.with_offset(target.offset() + offset));
        }
        self.text.clear();
    }

    /// Consume one tag or comment at the start of `rest`.
    fn tag<'a>(&mut self, rest: &'a str) -> &'a str {
        if let Some(body) = rest.strip_prefix("<!--") {
            let end = body.find("-->").unwrap_or(body.len());
            self.builder.comment(&body[..end]);
            return body.get(end + 3..).unwrap_or("");
        }
        let close = rest.find('>').unwrap_or(rest.len());
        let inner = &rest[1..close];
        let after = rest.get(close + 1..).unwrap_or("");
        if let Some(name) = inner.strip_prefix('/') {
            self.builder.close_named(name.trim());
            return after;
        }
        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(inner) => (inner, true),
            None => (inner, false),
        };
        let inner = inner.trim();
        let name_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
        let (name, attrs) = inner.split_at(name_end);
        let id = self.builder.open_with(name, parse_attributes(attrs));
        let is_void = self.builder.document().tag(id).is_some_and(|t| t.is_void());
        if self_closing && !is_void {
            self.builder.close();
        }
        after
    }
}

fn parse_attributes(mut s: &str) -> Vec<(String, Option<String>)> {
    let mut out = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            return out;
        }
        let name_end = s
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(s.len());
        let name = s[..name_end].to_ascii_lowercase();
        s = &s[name_end..];
        let Some(value) = s.trim_start().strip_prefix('=') else {
            out.push((name, None));
            continue;
        };
        let value = value.trim_start();
        let (parsed, used) = match value.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let end = value[1..].find(q).map_or(value.len(), |i| i + 1);
                (value[1..end].to_string(), (end + 1).min(value.len()))
            }
            _ => {
                let end = value.find(char::is_whitespace).unwrap_or(value.len());
                (value[..end].to_string(), end)
            }
        };
        out.push((name, Some(parsed)));
        s = &value[used..];
    }
}

/// Decode the entity at the start of `s`. Unknown entities decode to a
/// literal `&`.
fn decode_entity(s: &str) -> (char, usize) {
    let Some(end) = s.find(';').filter(|&e| e <= 10) else {
        return ('&', 1);
    };
    let name = &s[1..end];
    let decoded = match name {
        "nbsp" => Some('\u{a0}'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };
    match decoded {
        Some(c) => (c, end + 1),
        None => ('&', 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_markers_attach_to_adjacent_text() {
        let f = Fixture::editable("<p>fo|o</p><p>[bar]</p>");
        let foo = f.text_node("foo");
        let bar = f.text_node("bar");
        assert_eq!(f.markers, vec![Boundary::new(foo, 2), Boundary::new(bar, 0), Boundary::new(bar, 3)]);
    }

    #[test]
    fn markers_between_nodes_become_element_boundaries() {
        let f = Fixture::editable("<p>foo{<br>}</p><p>|</p>");
        let p = f.element("p", 0);
        let empty = f.element("p", 1);
        assert_eq!(f.markers, vec![Boundary::new(p, 1), Boundary::new(p, 2), Boundary::new(empty, 0)]);
    }

    #[test]
    fn attributes_entities_and_comments() {
        let f = Fixture::parse("<p class=a id='b' hidden>x&nbsp;&amp;&#65;<!-- c --></p><img src=\"i.png\"/>y");
        let p = f.element("p", 0);
        assert_eq!(f.doc.attr(p, "class"), Some("a"));
        assert_eq!(f.doc.attr(p, "id"), Some("b"));
        assert_eq!(f.doc.attr(p, "hidden"), Some(""));
        assert_eq!(f.text_node("x\u{a0}&A"), f.doc.children(p)[0]);
        assert!(f.doc.is_comment(f.doc.children(p)[1]));
        let img = f.element("img", 0);
        assert_eq!(f.doc.next_sibling(img), Some(f.text_node("y")));
    }

    #[test]
    fn render_round_trips_markers() {
        for markup in [
            "<p>fo|o</p>",
            "<p>[foo</p><p>b]ar</p>",
            "<p>foo{}<br></p>",
            "<ul><li>{a</li><li>}</li></ul>",
            "<p>a&nbsp;b<img src=\"x\">c</p>",
        ] {
            let f = Fixture::editable(markup);
            let (start, end) = f.selection().unwrap_or((Boundary::new(f.host, 0), Boundary::new(f.host, 0)));
            let expected = if f.markers.is_empty() {
                format!("{{}}{markup}")
            } else {
                markup.to_string()
            };
            assert_eq!(f.render(start, end), expected);
        }
    }

    #[test]
    fn layout_uses_the_monospace_measurer() {
        let f = Fixture::editable_with_width("<p>foo bar</p>", 50.0);
        let text = f.text_node("foo bar");
        assert_eq!(f.layout.glyph_rect(text, 4).map(|r| (r.x, r.y)), Some((0.0, 20.0)));
    }
}
