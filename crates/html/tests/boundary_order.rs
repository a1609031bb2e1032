use std::cmp::Ordering;

use html::boundaries::{self, Boundary, compare_boundaries, is_reversed};
use html::{Id, Range, editing_host, traverse};
use html_test_support::Fixture;

const MARKUP: &str = "<p>foo<br>b<b>a</b>r<!--c--></p><ul><li>x</li><li></li></ul><img>tail";

type Step = fn(&html::Document, Boundary) -> Option<Boundary>;

fn walk(doc: &html::Document, from: Boundary, step: Step) -> Vec<Boundary> {
    let mut out = vec![from];
    let mut cur = from;
    while let Some(next) = step(doc, cur) {
        out.push(next);
        cur = next;
    }
    out
}

#[test]
fn forward_steps_are_strictly_increasing() {
    let f = Fixture::parse(MARKUP);
    let steps = walk(&f.doc, Boundary::new(Id::ROOT, 0), boundaries::next);
    for pair in steps.windows(2) {
        assert_eq!(
            compare_boundaries(&f.doc, pair[0], pair[1]),
            Ordering::Less,
            "{:?} should precede {:?}",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(steps.last(), Some(&boundaries::from_end_of_node(&f.doc, Id::ROOT)));
}

#[test]
fn backward_steps_are_strictly_decreasing() {
    let f = Fixture::parse(MARKUP);
    let end = boundaries::from_end_of_node(&f.doc, Id::ROOT);
    let steps = walk(&f.doc, end, boundaries::prev);
    for pair in steps.windows(2) {
        assert!(is_reversed(&f.doc, pair[0], pair[1]));
    }
    assert_eq!(steps.last(), Some(&Boundary::new(Id::ROOT, 0)));
}

#[test]
fn comparison_follows_boundary_point_order() {
    let f = Fixture::parse(MARKUP);
    let doc = &f.doc;
    let p = f.element("p", 0);
    let foo = f.text_node("foo");
    let a = f.text_node("a");

    // Before the child, inside it, after it.
    assert_eq!(compare_boundaries(doc, Boundary::new(p, 0), Boundary::new(foo, 0)), Ordering::Less);
    assert_eq!(compare_boundaries(doc, Boundary::new(foo, 3), Boundary::new(p, 1)), Ordering::Less);
    assert_eq!(compare_boundaries(doc, Boundary::new(p, 5), Boundary::new(a, 1)), Ordering::Greater);
    assert_eq!(compare_boundaries(doc, Boundary::new(a, 1), Boundary::new(a, 1)), Ordering::Equal);
}

#[test]
fn ranges_reject_reversed_ends() {
    let f = Fixture::parse(MARKUP);
    let foo = f.text_node("foo");
    let start = Boundary::new(foo, 2);
    let end = Boundary::new(foo, 1);
    assert!(Range::new(&f.doc, start, end).is_err());
    let ordered = Range::ordered(&f.doc, start, end);
    assert_eq!((ordered.start(), ordered.end()), (end, start));
    assert!(Boundary::checked(&f.doc, foo, 4).is_err());
}

#[test]
fn editable_fixtures_have_a_host() {
    let f = Fixture::editable("<p>foo</p>");
    let foo = f.text_node("foo");
    assert_eq!(editing_host(&f.doc, foo), Some(f.host));
    assert!(traverse::contains(&f.doc, f.host, foo));
    assert_eq!(editing_host(&Fixture::parse("<p>foo</p>").doc, Id(2)), None);
}
