// Integration tests for event dispatch

mod common;

use std::thread;

use common::{clear, count, entries, full_area, journal, new_gui, Journal, Probe};
use ratatui::layout::Rect;
use screenstack::gui::{Capabilities, Gui, ObjectId};
use screenstack::input::{ControlEvent, EventQueue, InputEvent, Key, KeyInput, PointerButton};

/// Push an empty full-screen probe and build `children` inside it
fn screen_with(
    gui: &mut Gui,
    log: &Journal,
    children: Vec<(Probe, Rect, Capabilities)>,
) -> Vec<ObjectId> {
    let screen = gui
        .push_new(Probe::new("S", log), full_area(), Capabilities::empty())
        .expect("push failed");
    let mut scope = gui.open_scope(screen);
    children
        .into_iter()
        .map(|(probe, pos, caps)| scope.create(probe, pos, caps))
        .collect()
}

fn key(k: Key) -> InputEvent {
    InputEvent::Key(KeyInput::press(k))
}

#[test]
fn test_double_registration_dispatches_once() {
    let log = journal();
    let mut gui = new_gui();
    let a = gui
        .push_new(Probe::new("A", &log), full_area(), Capabilities::KEYBOARD)
        .expect("push failed");

    gui.add_used_events(a, Capabilities::KEYBOARD);
    gui.add_used_events(a, Capabilities::KEYBOARD | Capabilities::TEXTINPUT);
    clear(&log);

    gui.handle_event(key(Key::Enter));
    assert_eq!(entries(&log), vec!["A:key(Enter)"]);

    gui.handle_event(InputEvent::Text("x".to_string()));
    assert_eq!(count(&log, "A:text(x)"), 1);
}

#[test]
fn test_newest_listener_sees_event_first() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![
            (Probe::new("A", &log), full_area(), Capabilities::KEYBOARD),
            (Probe::new("B", &log), full_area(), Capabilities::KEYBOARD),
        ],
    );
    clear(&log);

    gui.handle_event(key(Key::Tab));
    assert_eq!(entries(&log), vec!["B:key(Tab)", "A:key(Tab)"]);
}

#[test]
fn test_break_propagation_ends_only_current_event() {
    let log = journal();
    let mut gui = new_gui();
    let caps = Capabilities::KEYBOARD | Capabilities::TEXTINPUT;
    screen_with(
        &mut gui,
        &log,
        vec![
            (Probe::new("A", &log), full_area(), caps),
            (Probe::new("B", &log).stopping_keys(), full_area(), caps),
        ],
    );
    clear(&log);

    gui.handle_event(key(Key::Char('z')));
    assert_eq!(entries(&log), vec!["B:key(Char('z'))"]);

    // The next event starts fresh
    clear(&log);
    gui.handle_event(InputEvent::Text("hi".to_string()));
    assert_eq!(entries(&log), vec!["B:text(hi)", "A:text(hi)"]);
}

#[test]
fn test_object_disposed_mid_walk_gets_no_click() {
    let log = journal();
    let mut gui = new_gui();
    let area = Rect::new(0, 0, 10, 5);
    let ids = screen_with(
        &mut gui,
        &log,
        vec![(Probe::new("A", &log), area, Capabilities::LCLICK)],
    );
    let a = ids[0];
    let screen = gui.top().expect("no screen");
    {
        let mut scope = gui.open_scope(screen);
        scope.create(
            Probe::new("B", &log).on_click(move |gui, _| gui.dispose(a)),
            area,
            Capabilities::LCLICK,
        );
    }
    clear(&log);

    gui.handle_event(InputEvent::press(PointerButton::Left, 1, 1, 0));
    assert_eq!(
        entries(&log),
        vec![
            "B:click(pressed=true,inside=true)",
            "A:deactivate(pending=false)"
        ]
    );
    assert!(gui.is_pending_disposal(a));

    // Not drawn either, and freed at the end of the frame
    let mut buf = ratatui::buffer::Buffer::empty(full_area());
    gui.render_frame(&mut buf, 0);
    assert_eq!(count(&log, "A:render(full=true)"), 0);
    assert_eq!(gui.drain_disposed(), 1);
    assert_eq!(count(&log, "A:drop"), 1);
}

#[test]
fn test_press_reaches_only_objects_under_pointer() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![
            (Probe::new("L", &log), Rect::new(0, 0, 5, 5), Capabilities::LCLICK),
            (Probe::new("R", &log), Rect::new(5, 0, 5, 5), Capabilities::LCLICK),
        ],
    );
    clear(&log);

    gui.handle_event(InputEvent::press(PointerButton::Left, 1, 1, 0));
    assert_eq!(entries(&log), vec!["L:click(pressed=true,inside=true)"]);

    // Releases go to every listener so buttons can reset
    clear(&log);
    gui.handle_event(InputEvent::release(PointerButton::Left, 1, 1, 10));
    assert_eq!(
        entries(&log),
        vec![
            "R:click(pressed=false,inside=false)",
            "L:click(pressed=false,inside=true)"
        ]
    );
}

#[test]
fn test_right_click_uses_its_own_category() {
    let log = journal();
    let mut gui = new_gui();
    let ids = screen_with(
        &mut gui,
        &log,
        vec![
            (Probe::new("L", &log), full_area(), Capabilities::LCLICK),
            (Probe::new("R", &log), full_area(), Capabilities::RCLICK),
        ],
    );
    clear(&log);

    gui.handle_event(InputEvent::press(PointerButton::Right, 2, 2, 0));
    assert_eq!(entries(&log), vec!["R:click(pressed=true,inside=true)"]);
    let r = gui.node(ids[1]).expect("missing node");
    assert!(r.mouse_state(PointerButton::Right));
    assert!(!r.mouse_state(PointerButton::Left));
}

#[test]
fn test_double_click_yields_one_notification() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![(
            Probe::new("D", &log),
            Rect::new(0, 0, 10, 5),
            Capabilities::LCLICK | Capabilities::DOUBLECLICK,
        )],
    );
    clear(&log);

    gui.handle_event(InputEvent::press(PointerButton::Left, 3, 3, 1000));
    gui.handle_event(InputEvent::release(PointerButton::Left, 3, 3, 1050));
    gui.handle_event(InputEvent::press(PointerButton::Left, 4, 3, 1200));
    gui.handle_event(InputEvent::release(PointerButton::Left, 4, 3, 1250));

    assert_eq!(count(&log, "D:double"), 1);
    assert_eq!(count(&log, "D:click(pressed=true,inside=true)"), 1);
    assert_eq!(
        entries(&log),
        vec![
            "D:click(pressed=true,inside=true)",
            "D:click(pressed=false,inside=true)",
            "D:double",
            "D:click(pressed=false,inside=true)"
        ]
    );

    // A third press starts a new pair
    clear(&log);
    gui.handle_event(InputEvent::press(PointerButton::Left, 4, 3, 1300));
    assert_eq!(entries(&log), vec!["D:click(pressed=true,inside=true)"]);
}

#[test]
fn test_slow_or_distant_presses_stay_single() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![(
            Probe::new("D", &log),
            full_area(),
            Capabilities::LCLICK | Capabilities::DOUBLECLICK,
        )],
    );
    clear(&log);

    // Too slow
    gui.handle_event(InputEvent::press(PointerButton::Left, 3, 3, 0));
    gui.handle_event(InputEvent::press(PointerButton::Left, 3, 3, 400));
    // Too far apart
    gui.handle_event(InputEvent::press(PointerButton::Left, 10, 3, 450));

    assert_eq!(count(&log, "D:double"), 0);
    assert_eq!(count(&log, "D:click(pressed=true,inside=true)"), 3);
}

#[test]
fn test_hover_end_is_reported_before_start() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![
            (Probe::new("L", &log), Rect::new(0, 0, 5, 5), Capabilities::HOVER),
            (Probe::new("R", &log), Rect::new(5, 0, 5, 5), Capabilities::HOVER),
        ],
    );
    clear(&log);

    gui.handle_event(InputEvent::motion(1, 1));
    assert_eq!(entries(&log), vec!["L:hover(true)"]);

    clear(&log);
    gui.handle_event(InputEvent::motion(6, 1));
    assert_eq!(entries(&log), vec!["L:hover(false)", "R:hover(true)"]);

    // Staying inside reports nothing new
    clear(&log);
    gui.handle_event(InputEvent::motion(7, 2));
    assert!(entries(&log).is_empty());
}

#[test]
fn test_deactivation_clears_hover() {
    let log = journal();
    let mut gui = new_gui();
    let ids = screen_with(
        &mut gui,
        &log,
        vec![(Probe::new("H", &log), Rect::new(0, 0, 5, 5), Capabilities::HOVER)],
    );
    gui.handle_event(InputEvent::motion(1, 1));
    assert!(gui.node(ids[0]).is_some_and(|n| n.hovered));

    gui.deactivate(ids[0]);
    assert!(gui.node(ids[0]).is_some_and(|n| !n.hovered));
}

#[test]
fn test_motion_uses_inclusive_bounds_or_strong_interest() {
    let log = journal();
    let mut gui = new_gui();
    let ids = screen_with(
        &mut gui,
        &log,
        vec![(Probe::new("M", &log), Rect::new(0, 0, 4, 4), Capabilities::MOVE)],
    );
    clear(&log);

    gui.handle_event(InputEvent::motion(4, 4));
    gui.handle_event(InputEvent::motion(5, 5));
    assert_eq!(entries(&log), vec!["M:move(4,4)"]);

    if let Some(node) = gui.node_mut(ids[0]) {
        node.strong_interest = true;
    }
    gui.handle_event(InputEvent::motion(9, 9));
    assert_eq!(count(&log, "M:move(9,9)"), 1);
}

#[test]
fn test_captured_key_goes_only_to_capturing_listener() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![
            (Probe::new("A", &log), full_area(), Capabilities::KEYBOARD),
            (Probe::new("B", &log).capturing(Key::Esc), full_area(), Capabilities::KEYBOARD),
            (Probe::new("C", &log), full_area(), Capabilities::KEYBOARD),
        ],
    );
    clear(&log);

    gui.handle_event(key(Key::Esc));
    assert_eq!(entries(&log), vec!["B:key(Esc)"]);

    clear(&log);
    gui.handle_event(key(Key::Char('x')));
    assert_eq!(entries(&log).len(), 3);
}

#[test]
fn test_capture_all_keys_joins_every_capture() {
    let log = journal();
    let mut gui = new_gui();
    let ids = screen_with(
        &mut gui,
        &log,
        vec![
            (Probe::new("A", &log), full_area(), Capabilities::KEYBOARD),
            (Probe::new("B", &log).capturing(Key::Esc), full_area(), Capabilities::KEYBOARD),
        ],
    );
    if let Some(node) = gui.node_mut(ids[0]) {
        node.capture_all_keys = true;
    }
    clear(&log);

    gui.handle_event(key(Key::Esc));
    assert_eq!(entries(&log), vec!["B:key(Esc)", "A:key(Esc)"]);
}

#[test]
fn test_keypad_enter_is_delivered_as_enter() {
    let log = journal();
    let mut gui = new_gui();
    gui.push_new(Probe::new("A", &log), full_area(), Capabilities::KEYBOARD)
        .expect("push failed");
    clear(&log);

    gui.handle_event(key(Key::KeypadEnter));
    assert_eq!(entries(&log), vec!["A:key(Enter)"]);
}

#[test]
fn test_wheel_reports_direction_and_position() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![(Probe::new("W", &log), Rect::new(0, 0, 5, 5), Capabilities::WHEEL)],
    );
    clear(&log);

    gui.handle_event(InputEvent::Wheel {
        delta: -1,
        position: ratatui::layout::Position::new(1, 1),
    });
    gui.handle_event(InputEvent::Wheel {
        delta: 1,
        position: ratatui::layout::Position::new(8, 8),
    });
    assert_eq!(
        entries(&log),
        vec!["W:wheel(down=true,inside=true)", "W:wheel(down=false,inside=false)"]
    );
}

#[test]
fn test_timer_fires_when_countdown_runs_out() {
    let log = journal();
    let mut gui = new_gui();
    let ids = screen_with(
        &mut gui,
        &log,
        vec![(Probe::new("T", &log), full_area(), Capabilities::TIME)],
    );
    gui.set_timer(ids[0], 100);
    clear(&log);

    gui.update_time(40);
    gui.update_time(40);
    assert!(entries(&log).is_empty());
    gui.update_time(40);
    assert_eq!(entries(&log), vec!["T:tick(40)"]);

    // Overshoot carries into the next period
    gui.update_time(80);
    assert_eq!(count(&log, "T:tick(80)"), 1);
}

#[test]
fn test_timer_without_delay_fires_every_update() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![(Probe::new("T", &log), full_area(), Capabilities::TIME)],
    );
    clear(&log);

    gui.update_time(16);
    gui.update_time(17);
    assert_eq!(entries(&log), vec!["T:tick(16)", "T:tick(17)"]);
}

#[test]
fn test_inactive_screen_receives_nothing() {
    let log = journal();
    let mut gui = new_gui();
    gui.push_new(Probe::new("A", &log), full_area(), Capabilities::KEYBOARD)
        .expect("push failed");
    gui.push_new(Probe::new("B", &log), full_area(), Capabilities::KEYBOARD)
        .expect("push failed");
    clear(&log);

    gui.handle_event(key(Key::Up));
    assert_eq!(entries(&log), vec!["B:key(Up)"]);
}

#[test]
fn test_handler_can_pop_its_own_screen() {
    let log = journal();
    let mut gui = new_gui();
    let a = gui
        .push_new(Probe::new("A", &log), full_area(), Capabilities::KEYBOARD)
        .expect("push failed");
    let b = gui
        .push_new(
            Probe::new("B", &log).on_key(|gui, this| {
                gui.pop_specific(this).expect("B should be in front");
            }),
            full_area(),
            Capabilities::KEYBOARD,
        )
        .expect("push failed");
    clear(&log);

    gui.handle_event(key(Key::Esc));
    assert_eq!(gui.top(), Some(a));
    assert!(gui.is_pending_disposal(b));
    // A was not in the snapshot for this key. B was running its own hook,
    // so its deactivation notice arrives once the hook returns.
    assert_eq!(
        entries(&log),
        vec!["B:key(Esc)", "A:activate", "B:deactivate(pending=true)"]
    );
    assert!(!gui.registry().contains(screenstack::gui::Category::KeyPress, b));
}

#[test]
fn test_queued_motion_is_coalesced() {
    let log = journal();
    let mut gui = new_gui();
    screen_with(
        &mut gui,
        &log,
        vec![(
            Probe::new("M", &log),
            full_area(),
            Capabilities::MOVE | Capabilities::KEYBOARD,
        )],
    );
    clear(&log);

    let queue = EventQueue::new();
    let sender = queue.sender();
    sender.push(InputEvent::motion(1, 1));
    sender.push(InputEvent::motion(2, 2));
    sender.push(InputEvent::motion(3, 3));
    sender.push(key(Key::Home));
    sender.push(InputEvent::motion(4, 4));

    let handled = gui.handle_events(&queue, |_, _| {});
    assert_eq!(handled, 3);
    assert_eq!(
        entries(&log),
        vec!["M:move(3,3)", "M:key(Home)", "M:move(4,4)"]
    );
    assert!(queue.is_empty());
}

#[test]
fn test_control_events_from_other_threads_keep_their_place() {
    let log = journal();
    let mut gui = new_gui();
    gui.push_new(Probe::new("A", &log), full_area(), Capabilities::KEYBOARD)
        .expect("push failed");
    clear(&log);

    let queue = EventQueue::new();
    let sender = queue.sender();
    let producer = thread::spawn(move || {
        sender.push(InputEvent::Key(KeyInput::press(Key::Char('a'))));
        sender.push_control(ControlEvent::RestartGame);
        sender.push(InputEvent::Key(KeyInput::press(Key::Char('b'))));
    });
    producer.join().expect("producer panicked");

    let seen = log.clone();
    let mut controls = Vec::new();
    gui.handle_events(&queue, |_, event| {
        seen.borrow_mut().push(format!("control:{:?}", event));
        controls.push(event);
    });

    assert_eq!(controls, vec![ControlEvent::RestartGame]);
    assert_eq!(
        entries(&log),
        vec![
            "A:key(Char('a'))",
            "control:RestartGame",
            "A:key(Char('b'))"
        ]
    );
}
