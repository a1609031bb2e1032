use html::Boundary;
use html_test_support::Fixture;
use visual::{Geometry, View};

pub fn view(f: &Fixture) -> View<'_> {
    View::new(&f.doc, &f.styles)
}

pub fn geometry(f: &Fixture) -> Geometry<'_> {
    Geometry::new(view(f), &f.layout)
}

/// Every caret position inside the text node `id`.
pub fn text_boundaries(f: &Fixture, id: html::Id) -> Vec<Boundary> {
    let text = f.doc.text(id).unwrap_or_default();
    (0..=text.len())
        .filter(|&i| text.is_char_boundary(i))
        .map(|i| Boundary::new(id, i))
        .collect()
}
