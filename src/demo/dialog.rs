//! A modal dialog with a clickable OK button

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget as _};

use screenstack::gui::{Actions, Capabilities, Click, Gui, ObjectId, Widget};
use screenstack::input::{Key, KeyInput};
use screenstack::GuiError;

use super::theme::DEFAULT_THEME;

pub struct Dialog {
    title: String,
    active: bool,
    double_clicks: u32,
}

impl Dialog {
    /// Build a dialog with its button and push it on the stack
    pub fn open(gui: &mut Gui, area: Rect, title: &str) -> Result<ObjectId, GuiError> {
        let dialog = gui.create_detached(
            Dialog {
                title: title.to_string(),
                active: false,
                double_clicks: 0,
            },
            area,
            Capabilities::KEYBOARD | Capabilities::DOUBLECLICK,
        );
        {
            let mut scope = gui.open_capturing_scope(dialog, Actions::all());
            scope.create(
                OkButton::default(),
                Rect::new(area.width.saturating_sub(8), area.height.saturating_sub(2), 6, 1),
                Capabilities::LCLICK | Capabilities::HOVER,
            );
        }
        gui.push(dialog)?;
        Ok(dialog)
    }
}

impl Widget for Dialog {
    fn key_pressed(&mut self, gui: &mut Gui, this: ObjectId, key: &KeyInput) {
        if key.pressed && matches!(key.key, Key::Esc | Key::Enter) {
            if let Err(e) = gui.pop_specific(this) {
                log::warn!("could not close dialog: {}", e);
            }
            gui.break_propagation();
        }
    }

    fn captures_key(&self, key: &KeyInput) -> bool {
        matches!(key.key, Key::Esc | Key::Enter)
    }

    fn double_click(&mut self, gui: &mut Gui, _this: ObjectId) {
        self.double_clicks += 1;
        gui.total_redraw();
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, _full: bool) {
        let border = if self.active {
            DEFAULT_THEME.border_focused
        } else {
            DEFAULT_THEME.border_normal
        };
        Clear.render(area, buf);
        Paragraph::new(format!(
            "Esc or OK closes this dialog.\nDouble clicks so far: {}",
            self.double_clicks
        ))
        .style(Style::default().fg(DEFAULT_THEME.fg).bg(DEFAULT_THEME.bg))
        .block(
            Block::default()
                .title(format!(" {} ", self.title))
                .title_alignment(Alignment::Center)
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

/// Closes its parent dialog when released over itself after a press
#[derive(Default)]
pub struct OkButton {
    hovered: bool,
}

impl Widget for OkButton {
    fn click(&mut self, gui: &mut Gui, this: ObjectId, click: Click) {
        if !click.pressed && click.previous && click.inside {
            if let Some(dialog) = gui.parent(this) {
                if let Err(e) = gui.pop_specific(dialog) {
                    log::warn!("could not close dialog: {}", e);
                }
            }
            gui.break_propagation();
        }
    }

    fn hover(&mut self, gui: &mut Gui, _this: ObjectId, on: bool) {
        self.hovered = on;
        gui.total_redraw();
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, _full: bool) {
        let mut style = Style::default()
            .fg(DEFAULT_THEME.bg)
            .bg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD);
        if self.hovered {
            style = style.bg(DEFAULT_THEME.primary);
        }
        buf.set_stringn(area.x, area.y, "  OK  ", area.width as usize, style);
    }
}
