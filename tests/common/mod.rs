// Shared helpers for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;

use screenstack::gui::{Click, Gui, ObjectId, Widget};
use screenstack::input::{Key, KeyInput};
use screenstack::GuiConfig;

pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

pub fn count(journal: &Journal, entry: &str) -> usize {
    journal.borrow().iter().filter(|e| e.as_str() == entry).count()
}

pub fn clear(journal: &Journal) {
    journal.borrow_mut().clear();
}

pub fn new_gui() -> Gui {
    Gui::new(GuiConfig::default())
}

pub fn full_area() -> Rect {
    Rect::new(0, 0, 40, 12)
}

type Action = Box<dyn FnMut(&mut Gui, ObjectId)>;

/// Records every hook it sees into a shared journal
pub struct Probe {
    name: &'static str,
    journal: Journal,
    stop_keys: bool,
    captured: Option<Key>,
    on_click: Option<Action>,
    on_key: Option<Action>,
}

impl Probe {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Probe {
            name,
            journal: journal.clone(),
            stop_keys: false,
            captured: None,
            on_click: None,
            on_key: None,
        }
    }

    /// Stop propagation after handling a key
    pub fn stopping_keys(mut self) -> Self {
        self.stop_keys = true;
        self
    }

    pub fn capturing(mut self, key: Key) -> Self {
        self.captured = Some(key);
        self
    }

    pub fn on_click(mut self, action: impl FnMut(&mut Gui, ObjectId) + 'static) -> Self {
        self.on_click = Some(Box::new(action));
        self
    }

    pub fn on_key(mut self, action: impl FnMut(&mut Gui, ObjectId) + 'static) -> Self {
        self.on_key = Some(Box::new(action));
        self
    }

    fn log(&self, entry: String) {
        self.journal.borrow_mut().push(entry);
    }
}

impl Widget for Probe {
    fn click(&mut self, gui: &mut Gui, this: ObjectId, click: Click) {
        self.log(format!(
            "{}:click(pressed={},inside={})",
            self.name, click.pressed, click.inside
        ));
        if let Some(action) = self.on_click.as_mut() {
            action(gui, this);
        }
    }

    fn double_click(&mut self, _gui: &mut Gui, _this: ObjectId) {
        self.log(format!("{}:double", self.name));
    }

    fn hover(&mut self, _gui: &mut Gui, _this: ObjectId, on: bool) {
        self.log(format!("{}:hover({})", self.name, on));
    }

    fn mouse_moved(&mut self, _gui: &mut Gui, _this: ObjectId, position: Position) {
        self.log(format!("{}:move({},{})", self.name, position.x, position.y));
    }

    fn wheel_scrolled(&mut self, _gui: &mut Gui, _this: ObjectId, down: bool, inside: bool) {
        self.log(format!("{}:wheel(down={},inside={})", self.name, down, inside));
    }

    fn key_pressed(&mut self, gui: &mut Gui, this: ObjectId, key: &KeyInput) {
        self.log(format!("{}:key({:?})", self.name, key.key));
        if let Some(action) = self.on_key.as_mut() {
            action(gui, this);
        }
        if self.stop_keys {
            gui.break_propagation();
        }
    }

    fn captures_key(&self, key: &KeyInput) -> bool {
        self.captured == Some(key.key)
    }

    fn text_input(&mut self, _gui: &mut Gui, _this: ObjectId, text: &str) {
        self.log(format!("{}:text({})", self.name, text));
    }

    fn tick(&mut self, _gui: &mut Gui, _this: ObjectId, elapsed_ms: u64) {
        self.log(format!("{}:tick({})", self.name, elapsed_ms));
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, full: bool) {
        self.log(format!("{}:render(full={})", self.name, full));
        if !area.is_empty() {
            buf.set_stringn(area.x, area.y, self.name, area.width as usize, Style::default());
        }
    }

    fn on_activate(&mut self, _gui: &Gui, _this: ObjectId) {
        self.log(format!("{}:activate", self.name));
    }

    fn on_deactivate(&mut self, gui: &Gui, this: ObjectId) {
        self.log(format!(
            "{}:deactivate(pending={})",
            self.name,
            gui.is_pending_disposal(this)
        ));
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.log(format!("{}:drop", self.name));
    }
}

/// Text of row `y`, one symbol per cell
pub fn row_text(buf: &Buffer, y: u16) -> String {
    let width = buf.area.width as usize;
    let start = y as usize * width;
    buf.content[start..start + width]
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}
