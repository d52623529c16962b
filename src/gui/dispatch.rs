//! Event dispatch
//!
//! Each event resolves to a [`Category`] and walks a snapshot of that
//! category's listeners. Before every call the listener is looked up again in
//! the live registry, so an object deactivated or disposed by an earlier
//! handler in the same walk receives nothing. Any handler may call
//! [`Gui::break_propagation`] to end the walk for the current event only.
//!
//! Pointer motion first diffs the hover set (hover-end, then hover-start
//! notifications) and then delivers the motion itself. A left press close
//! enough in time and space to the previous one is promoted to a double
//! click: double-click listeners under the pointer get `double_click`
//! instead of the plain press.

use ratatui::layout::Position;

use super::handler::Gui;
use super::object::{Click, ObjectId};
use super::registry::Category;
use crate::input::channel::EventQueue;
use crate::input::events::{ControlEvent, InputEvent, Key, KeyInput, PointerButton};

impl Gui {
    /// Stop delivering the current event to further listeners
    pub fn break_propagation(&mut self) {
        self.continue_event_handling = false;
    }

    /// Last known pointer position
    pub fn pointer(&self) -> Position {
        self.pointer
    }

    /// Drain `queue` and dispatch every event in arrival order.
    ///
    /// Control events are handed to `on_control` at their place in the
    /// sequence. Runs of pointer motion collapse to the last one.
    pub fn handle_events(
        &mut self,
        queue: &EventQueue,
        mut on_control: impl FnMut(&mut Gui, ControlEvent),
    ) -> usize {
        self.assert_gui_thread();
        let mut events = queue.drain();
        let mut handled = 0;
        while let Some(event) = events.pop_front() {
            if event.is_motion() && events.front().is_some_and(InputEvent::is_motion) {
                continue;
            }
            match event {
                InputEvent::Control(control) => on_control(self, control),
                other => self.handle_event(other),
            }
            handled += 1;
        }
        handled
    }

    /// Dispatch a single input event. Control events are ignored here.
    pub fn handle_event(&mut self, event: InputEvent) {
        self.continue_event_handling = true;
        match event {
            InputEvent::PointerButton {
                button,
                pressed,
                position,
                timestamp_ms,
            } => self.handle_pointer_button(button, pressed, position, timestamp_ms),
            InputEvent::PointerMotion { position } => self.handle_mouse_motion(position),
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Text(text) => self.handle_text(&text),
            InputEvent::Wheel { delta, position } => self.handle_wheel(delta, position),
            InputEvent::Timer { elapsed_ms } => self.update_time(elapsed_ms),
            InputEvent::Control(_) => {}
        }
    }

    fn is_double_click(&self, position: Position, timestamp_ms: u64) -> bool {
        let Some((last_pos, last_time)) = self.last_click else {
            return false;
        };
        let max_dist = self.config.double_click_distance;
        timestamp_ms.saturating_sub(last_time) < self.config.double_click_ms
            && position.x.abs_diff(last_pos.x) <= max_dist
            && position.y.abs_diff(last_pos.y) <= max_dist
    }

    fn handle_pointer_button(
        &mut self,
        button: PointerButton,
        pressed: bool,
        position: Position,
        timestamp_ms: u64,
    ) {
        self.pointer = position;
        let category = match button {
            PointerButton::Left => Category::PrimaryClick,
            PointerButton::Right => Category::SecondaryClick,
            PointerButton::Middle => Category::TertiaryClick,
        };

        let mut promoted = Vec::new();
        if button == PointerButton::Left && pressed {
            if self.is_double_click(position, timestamp_ms) {
                // A third press starts a new pair
                self.last_click = None;
                promoted = self.dispatch_double_click(position);
            } else {
                self.last_click = Some((position, timestamp_ms));
            }
        }

        self.handle_mouse_button_click(category, button, pressed, position, &promoted);
    }

    /// Returns the objects that received the double click
    fn dispatch_double_click(&mut self, position: Position) -> Vec<ObjectId> {
        let mut reached = Vec::new();
        for id in self.registry.snapshot(Category::DoubleClick) {
            if !self.continue_event_handling {
                break;
            }
            if !self.registry.contains(Category::DoubleClick, id) {
                continue;
            }
            if !self.node(id).is_some_and(|n| n.contains(position)) {
                continue;
            }
            reached.push(id);
            self.with_widget(id, |w, gui| w.double_click(gui, id));
        }
        reached
    }

    fn handle_mouse_button_click(
        &mut self,
        category: Category,
        button: PointerButton,
        pressed: bool,
        position: Position,
        skip: &[ObjectId],
    ) {
        let b = button.index();
        for id in self.registry.snapshot(category) {
            if !self.continue_event_handling {
                break;
            }
            if !self.registry.contains(category, id) || skip.contains(&id) {
                continue;
            }
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            let previous = node.mouse_state[b];
            let inside = node.contains(position);
            // Presses only reach objects under the pointer; releases reach
            // every listener so a pressed button can reset itself.
            if !pressed || inside {
                node.mouse_state[b] = pressed;
                let click = Click {
                    button,
                    pressed,
                    previous,
                    inside,
                };
                self.with_widget(id, |w, gui| w.click(gui, id, click));
            }
        }
    }

    fn handle_key(&mut self, mut key: KeyInput) {
        if key.key == Key::KeypadEnter {
            key.key = Key::Enter;
        }

        let listeners = self.registry.snapshot(Category::KeyPress);
        let captured: Vec<ObjectId> = listeners
            .iter()
            .copied()
            .filter(|id| {
                self.node(*id).is_some_and(|n| n.capture_all_keys)
                    || self.widget(*id).is_some_and(|w| w.captures_key(&key))
            })
            .collect();

        for id in listeners {
            if !self.continue_event_handling {
                break;
            }
            if !self.registry.contains(Category::KeyPress, id) {
                continue;
            }
            if !captured.is_empty() && !captured.contains(&id) {
                continue;
            }
            self.with_widget(id, |w, gui| w.key_pressed(gui, id, &key));
        }
    }

    fn handle_text(&mut self, text: &str) {
        for id in self.registry.snapshot(Category::TextInput) {
            if !self.continue_event_handling {
                break;
            }
            if !self.registry.contains(Category::TextInput, id) {
                continue;
            }
            self.with_widget(id, |w, gui| w.text_input(gui, id, text));
        }
    }

    fn handle_wheel(&mut self, delta: i16, position: Position) {
        self.pointer = position;
        for id in self.registry.snapshot(Category::WheelScroll) {
            if !self.continue_event_handling {
                break;
            }
            if !self.registry.contains(Category::WheelScroll, id) {
                continue;
            }
            let inside = self.node(id).is_some_and(|n| n.contains(position));
            self.with_widget(id, |w, gui| w.wheel_scrolled(gui, id, delta < 0, inside));
        }
    }

    fn handle_mouse_motion(&mut self, position: Position) {
        self.pointer = position;

        let mut entered = Vec::new();
        for id in self.registry.snapshot(Category::Hover) {
            if !self.registry.contains(Category::Hover, id) {
                continue;
            }
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            if node.contains(position) {
                if !node.hovered {
                    entered.push(id);
                }
            } else if node.hovered {
                node.hovered = false;
                self.with_widget(id, |w, gui| w.hover(gui, id, false));
            }
        }
        for id in entered {
            if !self.registry.contains(Category::Hover, id) {
                continue;
            }
            if let Some(node) = self.node_mut(id) {
                node.hovered = true;
            }
            self.with_widget(id, |w, gui| w.hover(gui, id, true));
        }

        self.handle_move_interested(position);
    }

    fn handle_move_interested(&mut self, position: Position) {
        for id in self.registry.snapshot(Category::PointerMotion) {
            if !self.continue_event_handling {
                break;
            }
            if !self.registry.contains(Category::PointerMotion, id) {
                continue;
            }
            let wants = self
                .node(id)
                .is_some_and(|n| n.strong_interest || n.contains_or_lower_bounds(position));
            if wants {
                self.with_widget(id, |w, gui| w.mouse_moved(gui, id, position));
            }
        }
    }

    /// Re-run hover tracking at the last pointer position, e.g. after the
    /// stack changed underneath a still pointer
    pub fn fake_mouse_move(&mut self) {
        self.continue_event_handling = true;
        let position = self.pointer;
        self.handle_mouse_motion(position);
    }

    /// Deliver `elapsed_ms` to timer listeners. Objects with a timer set fire
    /// once their countdown runs out; the rest fire every call.
    pub fn update_time(&mut self, elapsed_ms: u64) {
        self.continue_event_handling = true;
        for id in self.registry.snapshot(Category::TimerTick) {
            if !self.continue_event_handling {
                break;
            }
            if !self.registry.contains(Category::TimerTick, id) {
                continue;
            }
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            if node.timer_delay > 0 {
                node.to_next_tick -= elapsed_ms as i64;
                if node.to_next_tick > 0 {
                    continue;
                }
                node.to_next_tick += node.timer_delay as i64;
                if node.to_next_tick <= 0 {
                    node.to_next_tick = node.timer_delay as i64;
                }
            }
            self.with_widget(id, |w, gui| w.tick(gui, id, elapsed_ms));
        }
    }
}
