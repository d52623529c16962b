//! Main menu screen

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget as _};

use screenstack::gui::{Actions, Capabilities, Gui, ObjectId, Widget};
use screenstack::input::{ControlEvent, EventSender, Key, KeyInput};

use super::dialog::Dialog;
use super::theme::DEFAULT_THEME;

const ITEMS: [&str; 3] = ["Open dialog", "Open nested dialogs", "Quit"];

pub struct MainMenu {
    selected: usize,
    active: bool,
    sender: EventSender,
}

impl MainMenu {
    /// Build the menu and its clock label, returning the menu id
    pub fn build(gui: &mut Gui, area: Rect, sender: EventSender) -> ObjectId {
        let menu = gui.create_detached(
            MainMenu {
                selected: 0,
                active: false,
                sender,
            },
            area,
            Capabilities::KEYBOARD,
        );
        let mut scope = gui.open_capturing_scope(menu, Actions::all());
        let clock = scope.create(
            ClockLabel::default(),
            Rect::new(2, area.height.saturating_sub(2), 20, 1),
            Capabilities::TIME,
        );
        scope.set_timer(clock, 1000);
        menu
    }

    fn open_dialogs(&self, gui: &mut Gui, count: usize) {
        for i in 0..count {
            let offset = 4 + 2 * i as u16;
            let area = Rect::new(offset * 2, offset, 36, 7);
            let title = format!("Dialog {}", gui.stack().len());
            if let Err(e) = Dialog::open(gui, area, &title) {
                log::warn!("could not open dialog: {}", e);
            }
        }
    }
}

impl Widget for MainMenu {
    fn key_pressed(&mut self, gui: &mut Gui, _this: ObjectId, key: &KeyInput) {
        if !key.pressed {
            return;
        }
        match key.key {
            Key::Up => self.selected = self.selected.saturating_sub(1),
            Key::Down => self.selected = (self.selected + 1).min(ITEMS.len() - 1),
            Key::Char('q') | Key::Char('Q') => self.sender.push_control(ControlEvent::ForcedQuit),
            Key::Enter => match self.selected {
                0 => self.open_dialogs(gui, 1),
                1 => self.open_dialogs(gui, 3),
                _ => self.sender.push_control(ControlEvent::ForcedQuit),
            },
            _ => return,
        }
        gui.break_propagation();
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, _full: bool) {
        let border = if self.active {
            DEFAULT_THEME.border_focused
        } else {
            DEFAULT_THEME.border_normal
        };
        let lines: Vec<Line> = ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == self.selected {
                    Line::styled(
                        format!("> {}", item),
                        Style::default()
                            .fg(DEFAULT_THEME.primary)
                            .bg(DEFAULT_THEME.highlight_bg)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::styled(format!("  {}", item), Style::default().fg(DEFAULT_THEME.fg))
                }
            })
            .collect();

        Paragraph::new(lines)
            .style(Style::default().bg(DEFAULT_THEME.bg))
            .block(
                Block::default()
                    .title(" screenstack demo (↑/↓, Enter, q) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .render(area, buf);
    }

    fn on_activate(&mut self, _gui: &Gui, _this: ObjectId) {
        self.active = true;
    }

    fn on_deactivate(&mut self, _gui: &Gui, _this: ObjectId) {
        self.active = false;
    }
}

/// Counts seconds while the menu is in front
#[derive(Default)]
pub struct ClockLabel {
    seconds: u64,
}

impl Widget for ClockLabel {
    fn tick(&mut self, gui: &mut Gui, _this: ObjectId, _elapsed_ms: u64) {
        self.seconds += 1;
        gui.total_redraw();
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, _full: bool) {
        let text = format!("in front for {}s", self.seconds);
        buf.set_stringn(
            area.x,
            area.y,
            text,
            area.width as usize,
            Style::default().fg(DEFAULT_THEME.comment),
        );
    }
}
