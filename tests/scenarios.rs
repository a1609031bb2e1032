//! End-to-end navigation scenarios through the public facade.

use caretaker::input_core::merge_ranges;
use caretaker::{
    Boundary, Focus, Geometry, InputEvent, Key, Modifiers, Outcome, Selection,
    SelectionContext, View,
};
use html_test_support::Fixture;

fn geometry(f: &Fixture) -> Geometry<'_> {
    Geometry::new(View::new(&f.doc, &f.styles), &f.layout)
}

fn context_at(f: &Fixture) -> SelectionContext {
    let (start, end) = f.selection().expect("fixture has markers");
    let mut ctx = SelectionContext::default();
    ctx.select(&f.doc, Selection::new([start, end], Focus::End));
    ctx
}

fn press(key: Key) -> InputEvent {
    InputEvent::KeyDown {
        key,
        modifiers: Modifiers::NONE,
    }
}

fn click_at(x: f32, y: f32) -> InputEvent {
    InputEvent::MouseDown {
        x,
        y,
        modifiers: Modifiers::NONE,
    }
}

fn selected(ctx: &SelectionContext, f: &Fixture) -> String {
    let sel = ctx.selection().expect("a selection");
    f.render(sel.start(), sel.end())
}

#[test]
fn climbing_up_lands_in_text_not_on_the_trailing_break() {
    let f = Fixture::editable("<p>foo<br></p><p>ba|r</p>");
    let g = geometry(&f);
    let mut ctx = context_at(&f);
    ctx.handle(&g, &press(Key::Up), 0);

    let sel = ctx.selection().expect("a selection");
    assert_eq!(sel.focused(), Boundary::new(f.text_node("foo"), 2));
    assert_eq!(selected(&ctx, &f), "<p>fo|o<br></p><p>bar</p>");
}

#[test]
fn climbing_leaves_and_reenters_nested_lists() {
    let f = Fixture::editable("<ul><li>one<ul><li>tw|o</li></ul></li></ul><p>end</p>");
    let g = geometry(&f);
    let mut ctx = context_at(&f);

    ctx.handle(&g, &press(Key::Down), 0);
    assert_eq!(
        selected(&ctx, &f),
        "<ul><li>one<ul><li>two</li></ul></li></ul><p>en|d</p>"
    );
    ctx.handle(&g, &press(Key::Up), 100);
    assert_eq!(
        selected(&ctx, &f),
        "<ul><li>one<ul><li>tw|o</li></ul></li></ul><p>end</p>"
    );
}

#[test]
fn double_click_anywhere_in_a_word_selects_it() {
    let f = Fixture::editable("<p>say hello world</p>");
    let g = geometry(&f);
    let text = f.text_node("say hello world");

    for offset in 4..=8 {
        let x = offset as f32 * 10.0;
        let mut ctx = SelectionContext::default();
        ctx.handle(&g, &click_at(x, 5.0), 0);
        ctx.handle(&g, &InputEvent::MouseUp { x, y: 5.0 }, 30);
        ctx.handle(&g, &click_at(x, 5.0), 200);

        let sel = ctx.selection().expect("a selection");
        assert_eq!(
            sel.boundaries,
            [Boundary::new(text, 4), Boundary::new(text, 9)],
            "double click at offset {offset}"
        );
    }
}

#[test]
fn third_click_selects_the_block_and_a_fourth_stays_there() {
    let f = Fixture::editable("<p>say hello world</p><p>next</p>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();

    for (i, now) in [0, 150, 300].into_iter().enumerate() {
        ctx.handle(&g, &click_at(62.0, 5.0), now);
        if i == 1 {
            assert_eq!(selected(&ctx, &f), "<p>say [hello] world</p><p>next</p>");
        }
    }
    assert_eq!(selected(&ctx, &f), "<p>[say hello world]</p><p>next</p>");

    ctx.handle(&g, &click_at(62.0, 5.0), 450);
    assert_eq!(selected(&ctx, &f), "<p>[say hello world]</p><p>next</p>");
}

#[test]
fn third_click_after_the_window_is_a_single_click() {
    let f = Fixture::editable("<p>say hello world</p>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();

    ctx.handle(&g, &click_at(62.0, 5.0), 0);
    ctx.handle(&g, &click_at(62.0, 5.0), 150);
    ctx.handle(&g, &click_at(62.0, 5.0), 700);
    assert_eq!(selected(&ctx, &f), "<p>say he|llo world</p>");
}

#[test]
fn home_reaches_the_left_edge_of_the_line() {
    let f = Fixture::editable("<p>foo</p><p>bar b|az</p>");
    let g = geometry(&f);
    let mut ctx = context_at(&f);

    let Outcome::Render(request) = ctx.handle(&g, &press(Key::Home), 0) else {
        panic!("home should render");
    };
    let caret = request.caret.expect("a caret box");
    let host = g.layout().element_rect(f.host).expect("host box");
    assert!((caret.left - host.x).abs() <= 1.0);
    assert_eq!(caret.top, 20.0);
    assert_eq!(selected(&ctx, &f), "<p>foo</p><p>|bar baz</p>");
    assert_eq!(ctx.focus(), Focus::Start);
}

#[test]
fn reversed_merge_swaps_and_flips_focus() {
    let f = Fixture::editable("<p>foo</p><p>bar</p>");
    let foo = f.text_node("foo");
    let bar = f.text_node("bar");
    let later = [Boundary::new(bar, 1), Boundary::new(bar, 1)];
    let earlier = [Boundary::new(foo, 1), Boundary::new(foo, 1)];

    let merged = merge_ranges(&f.doc, earlier, later, Focus::End);
    assert_eq!(merged.boundaries, [Boundary::new(foo, 1), Boundary::new(bar, 1)]);
    assert_eq!(merged.focus, Focus::Start);

    let merged = merge_ranges(&f.doc, later, earlier, Focus::End);
    assert_eq!(merged.boundaries, [Boundary::new(foo, 1), Boundary::new(bar, 1)]);
    assert_eq!(merged.focus, Focus::End);
}

#[test]
fn failed_moves_leave_the_selection_alone() {
    let f = Fixture::editable("<p>f|oo</p>");
    let g = geometry(&f);
    let mut ctx = context_at(&f);
    let before = ctx.selection();

    assert_eq!(ctx.handle(&g, &press(Key::Up), 0), Outcome::Ignored);
    assert_eq!(ctx.selection(), before);
}
