use std::fmt;

use core_types::{Focus, Modifiers};
use html::{Boundary, Document};
use html_test_support::Fixture;
use input_core::{
    EditingOperations, InputEvent, Key, NavError, Outcome, Override, RenderRequest, Selection,
    SelectionContext,
};
use visual::{Geometry, View};

fn geometry(f: &Fixture) -> Geometry<'_> {
    Geometry::new(View::new(&f.doc, &f.styles), &f.layout)
}

fn selected(ctx: &SelectionContext, f: &Fixture) -> String {
    let sel = ctx.selection().expect("a selection");
    f.render(sel.start(), sel.end())
}

fn render_request(outcome: Outcome) -> RenderRequest {
    match outcome {
        Outcome::Render(request) => request,
        other => panic!("expected a render request, got {other:?}"),
    }
}

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::MouseDown {
        x,
        y,
        modifiers: Modifiers::NONE,
    }
}

fn key(key: Key) -> InputEvent {
    InputEvent::KeyDown {
        key,
        modifiers: Modifiers::NONE,
    }
}

fn start_at(f: &Fixture) -> SelectionContext {
    let (start, end) = f.selection().expect("fixture has markers");
    let mut ctx = SelectionContext::default();
    ctx.select(&f.doc, Selection::new([start, end], Focus::End));
    ctx
}

#[test]
fn press_places_a_collapsed_caret() {
    let f = Fixture::editable("<p>say hello world</p>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();

    let request = render_request(ctx.handle(&g, &down(62.0, 5.0), 0));
    assert!(request.selection.is_collapsed());
    assert_eq!(request.caret.map(|c| c.left), Some(60.0));
    assert!(request.highlights.is_empty());
    ctx.handle(&g, &InputEvent::MouseUp { x: 62.0, y: 5.0 }, 40);
    ctx.handle(&g, &InputEvent::Click { x: 62.0, y: 5.0 }, 41);
    assert_eq!(selected(&ctx, &f), "<p>say he|llo world</p>");
}

#[test]
fn quick_presses_select_word_then_block() {
    let f = Fixture::editable("<p>say hello world</p>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();

    ctx.handle(&g, &down(62.0, 5.0), 0);
    ctx.handle(&g, &InputEvent::MouseUp { x: 62.0, y: 5.0 }, 40);
    ctx.handle(&g, &InputEvent::Click { x: 62.0, y: 5.0 }, 41);

    ctx.handle(&g, &down(62.0, 5.0), 150);
    assert_eq!(selected(&ctx, &f), "<p>say [hello] world</p>");
    assert_eq!(ctx.focus(), Focus::End);
    ctx.handle(&g, &InputEvent::MouseUp { x: 62.0, y: 5.0 }, 190);
    assert_eq!(selected(&ctx, &f), "<p>say [hello] world</p>");

    let request = render_request(ctx.handle(&g, &down(62.0, 5.0), 300));
    assert_eq!(selected(&ctx, &f), "<p>[say hello world]</p>");
    assert_eq!(request.highlights.len(), 1);
}

#[test]
fn slow_second_press_is_a_single_click() {
    let f = Fixture::editable("<p>say hello world</p>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();

    ctx.handle(&g, &down(62.0, 5.0), 0);
    ctx.handle(&g, &down(62.0, 5.0), 700);
    assert_eq!(selected(&ctx, &f), "<p>say he|llo world</p>");
}

#[test]
fn pointer_travel_between_presses_keeps_the_double_click() {
    let f = Fixture::editable("<p>say hello world</p>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();

    ctx.handle(&g, &down(62.0, 5.0), 0);
    ctx.handle(&g, &InputEvent::MouseMove { x: 90.0, y: 5.0 }, 30);
    ctx.handle(&g, &down(62.0, 5.0), 100);
    assert_eq!(selected(&ctx, &f), "<p>say [hello] world</p>");
}

#[test]
fn drag_selects_live_and_commits_on_release() {
    let f = Fixture::editable("<p>say hello world</p>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();

    ctx.handle(&g, &down(10.0, 5.0), 0);
    let live = render_request(ctx.handle(&g, &InputEvent::MouseMove { x: 40.0, y: 5.0 }, 30));
    assert!(ctx.is_dragging());
    assert_eq!(live.caret, None);
    assert_eq!(live.highlights.len(), 1);
    assert_eq!(selected(&ctx, &f), "<p>s[ay ]hello world</p>");

    let done = render_request(ctx.handle(&g, &InputEvent::MouseUp { x: 50.0, y: 5.0 }, 60));
    assert!(!ctx.is_dragging());
    assert!(done.caret.is_some());
    assert_eq!(selected(&ctx, &f), "<p>s[ay h]ello world</p>");
}

#[test]
fn moving_without_a_press_is_ignored() {
    let f = Fixture::editable("<p>foo</p>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();
    let outcome = ctx.handle(&g, &InputEvent::MouseMove { x: 10.0, y: 5.0 }, 0);
    assert_eq!(outcome, Outcome::Ignored);
    assert!(!ctx.is_dragging());
}

#[test]
fn shift_press_extends_from_the_anchor() {
    let f = Fixture::editable("<p>f|oo bar</p>");
    let g = geometry(&f);
    let mut ctx = start_at(&f);
    let press = InputEvent::MouseDown {
        x: 50.0,
        y: 5.0,
        modifiers: Modifiers::SHIFT,
    };
    ctx.handle(&g, &press, 0);
    assert_eq!(selected(&ctx, &f), "<p>f[oo b]ar</p>");
    assert_eq!(ctx.focus(), Focus::End);
}

#[test]
fn press_below_the_last_line_of_a_tall_editor_places_the_caret() {
    let f = Fixture::editable("<div style=\"height: 200px\">foo</div>");
    let g = geometry(&f);
    let mut ctx = SelectionContext::default();

    let request = render_request(ctx.handle(&g, &down(10.0, 100.0), 0));
    assert_eq!(request.caret.map(|c| (c.left, c.top)), Some((10.0, 0.0)));
    assert_eq!(selected(&ctx, &f), "<div style=\"height: 200px\">f|oo</div>");
}

#[test]
fn pointer_outside_content_hides_the_caret() {
    let f = Fixture::editable("<p>f|oo</p>");
    let g = geometry(&f);
    let mut ctx = start_at(&f);
    render_request(ctx.handle(&g, &key(Key::Right), 0));
    assert!(ctx.is_caret_visible());

    assert_eq!(ctx.handle(&g, &down(10.0, 500.0), 100), Outcome::Hidden);
    assert!(!ctx.is_caret_visible());
    assert_eq!(ctx.tick(200), 0.0);
    assert_eq!(ctx.next_timer(200), None);
    assert_eq!(selected(&ctx, &f), "<p>fo|o</p>");
}

#[test]
fn keys_on_a_partially_editable_selection_are_ignored() {
    let f = Fixture::parse("<div contenteditable>fo|o</div><p>ba|r</p>");
    let g = geometry(&f);
    let mut ctx = start_at(&f);
    let before = ctx.selection();
    assert_eq!(ctx.handle(&g, &key(Key::Right), 0), Outcome::Ignored);
    assert_eq!(ctx.selection(), before);
}

#[test]
fn failed_climb_keeps_state() {
    let f = Fixture::editable("<p>fo|o</p>");
    let g = geometry(&f);
    let mut ctx = start_at(&f);
    assert_eq!(ctx.handle(&g, &key(Key::Up), 0), Outcome::Ignored);
    assert_eq!(selected(&ctx, &f), "<p>fo|o</p>");
}

#[test]
fn caret_blinks_after_each_render() {
    let f = Fixture::editable("<p>f|oo</p>");
    let g = geometry(&f);
    let mut ctx = start_at(&f);
    render_request(ctx.handle(&g, &key(Key::Right), 0));
    assert_eq!(ctx.tick(20), 1.0);
    assert_eq!(ctx.next_timer(20), Some(50));
    assert_eq!(ctx.tick(600), 0.5);

    render_request(ctx.handle(&g, &key(Key::Left), 600));
    assert_eq!(ctx.tick(620), 1.0);
    ctx.teardown();
    assert_eq!(ctx.next_timer(700), None);
}

#[test]
fn overrides_style_the_caret_until_it_leaves_the_container() {
    let f = Fixture::editable("<p>f|oo</p><p>bar</p>");
    let g = geometry(&f);
    let mut ctx = start_at(&f);

    let style = ctx.toggle_override(&g, Override::Bold).expect("a caret");
    assert_eq!(style.padding, 1.5);
    let same_line = render_request(ctx.handle(&g, &key(Key::Right), 0));
    assert_eq!(same_line.style.padding, 1.5);

    let next_line = render_request(ctx.handle(&g, &key(Key::Down), 100));
    assert_eq!(next_line.style.padding, 0.0);
    assert!(ctx.overrides().is_empty());
}

#[test]
fn caret_moves_scroll_into_view() {
    let f = Fixture::editable("<p>a|</p><p>b</p><p>c</p>");
    let g = geometry(&f);
    let mut ctx = start_at(&f);
    let resized = render_request(ctx.handle(
        &g,
        &InputEvent::Resize {
            width: 100.0,
            height: 40.0,
        },
        0,
    ));
    assert_eq!(resized.scroll_to, None);

    let request = render_request(ctx.handle(&g, &key(Key::PageDown), 10));
    assert_eq!(selected(&ctx, &f), "<p>a</p><p>b</p><p>c|</p>");
    assert_eq!(request.scroll_to, Some((0.0, 40.0)));
}

#[derive(Debug)]
struct Refused;

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refused")
    }
}

impl std::error::Error for Refused {}

/// Collapses the selection onto its end, or refuses.
struct CollapseToEnd<'a> {
    doc: &'a Document,
    refuse: bool,
}

impl EditingOperations for CollapseToEnd<'_> {
    type Error = Refused;

    fn document(&self) -> &Document {
        self.doc
    }

    fn apply(&mut self, _start: Boundary, end: Boundary) -> Result<(Boundary, Boundary), Refused> {
        if self.refuse {
            return Err(Refused);
        }
        Ok((end, end))
    }
}

#[test]
fn delegated_edits_replace_the_selection() {
    let f = Fixture::editable("<p>f[oo]</p>");
    let mut ctx = start_at(&f);
    let mut ops = CollapseToEnd {
        doc: &f.doc,
        refuse: false,
    };
    let next = ctx.delegate(&mut ops).expect("edit applies");
    assert!(next.is_collapsed());
    assert_eq!(selected(&ctx, &f), "<p>foo|</p>");
}

#[test]
fn refused_edits_surface_as_unsupported() {
    let f = Fixture::editable("<p>f[oo]</p>");
    let mut ctx = start_at(&f);
    let mut ops = CollapseToEnd {
        doc: &f.doc,
        refuse: true,
    };
    assert_eq!(
        ctx.delegate(&mut ops),
        Err(NavError::Unsupported("refused".into()))
    );
    assert_eq!(selected(&ctx, &f), "<p>f[oo]</p>");

    let mut empty = SelectionContext::default();
    assert_eq!(empty.delegate(&mut ops), Err(NavError::MalformedSelection));
}
