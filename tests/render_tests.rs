// Integration tests for total and partial redraws

mod common;

use common::{clear, count, entries, full_area, journal, row_text, Probe};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use screenstack::gui::{render::draw_fps_counter, Actions, Capabilities, Gui};
use screenstack::GuiConfig;

#[test]
fn test_total_then_simple_redraw() {
    let log = journal();
    let mut gui = Gui::new(GuiConfig::default());
    gui.push_new(Probe::new("A", &log), full_area(), Capabilities::empty())
        .expect("push failed");
    gui.push_new(Probe::new("B", &log), Rect::new(5, 3, 10, 2), Capabilities::empty())
        .expect("push failed");
    clear(&log);

    let mut buf = Buffer::empty(full_area());
    assert!(gui.needs_total_redraw());
    gui.render_frame(&mut buf, 0);
    assert!(!gui.needs_total_redraw());
    assert_eq!(entries(&log), vec!["A:render(full=true)", "B:render(full=true)"]);

    // Only the foreground repaints, over the cached background
    clear(&log);
    buf.reset();
    gui.render_frame(&mut buf, 0);
    assert_eq!(entries(&log), vec!["B:render(full=false)"]);
    assert!(row_text(&buf, 0).starts_with('A'));
    assert_eq!(&row_text(&buf, 3)[5..6], "B");

    clear(&log);
    gui.total_redraw();
    gui.render_frame(&mut buf, 0);
    assert_eq!(count(&log, "A:render(full=true)"), 1);
    assert_eq!(count(&log, "B:render(full=true)"), 1);
}

#[test]
fn test_stack_change_forces_total_redraw() {
    let log = journal();
    let mut gui = Gui::new(GuiConfig::default());
    gui.push_new(Probe::new("A", &log), full_area(), Capabilities::empty())
        .expect("push failed");
    let mut buf = Buffer::empty(full_area());
    gui.render_frame(&mut buf, 0);

    gui.push_new(Probe::new("B", &log), Rect::new(1, 1, 4, 1), Capabilities::empty())
        .expect("push failed");
    gui.pop(1).expect("pop failed");
    clear(&log);

    gui.render_frame(&mut buf, 0);
    assert_eq!(entries(&log), vec!["A:render(full=true)"]);
}

#[test]
fn test_render_gates_follow_child_actions() {
    let log = journal();
    let mut gui = Gui::new(GuiConfig::default());
    let screen = gui
        .push_new(Probe::new("S", &log), full_area(), Capabilities::empty())
        .expect("push failed");
    {
        let mut scope = gui.open_scope(screen);
        scope.create(Probe::new("all", &log), Rect::new(0, 1, 5, 1), Capabilities::empty());
        let mut state = scope.capture_state(true, Actions::all() - Actions::UPDATE);
        state.create(Probe::new("full", &log), Rect::new(0, 2, 5, 1), Capabilities::empty());
    }
    clear(&log);

    let mut buf = Buffer::empty(full_area());
    gui.render_frame(&mut buf, 0);
    assert_eq!(
        entries(&log),
        vec!["S:render(full=true)", "all:render(full=true)", "full:render(full=true)"]
    );

    clear(&log);
    gui.render_frame(&mut buf, 0);
    assert_eq!(
        entries(&log),
        vec!["S:render(full=false)", "all:render(full=false)"]
    );
}

#[test]
fn test_fps_overlay() {
    let log = journal();
    let config = GuiConfig {
        show_fps: true,
        ..GuiConfig::default()
    };
    let mut gui = Gui::new(config);
    gui.push_new(Probe::new("A", &log), full_area(), Capabilities::empty())
        .expect("push failed");

    let mut buf = Buffer::empty(full_area());
    gui.render_frame(&mut buf, 42);
    assert!(row_text(&buf, 0).starts_with("FPS: 42"));

    // Drawn on partial frames too
    gui.render_frame(&mut buf, 57);
    assert!(row_text(&buf, 0).starts_with("FPS: 57"));
}

#[test]
fn test_fps_counter_fits_small_buffers() {
    let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
    draw_fps_counter(&mut buf, 120);
    assert_eq!(row_text(&buf, 0), "FPS:");

    let mut empty = Buffer::empty(Rect::ZERO);
    draw_fps_counter(&mut empty, 120);
}
