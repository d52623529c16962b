//! Frame rendering
//!
//! A total redraw clears the frame and draws every screen on the stack back
//! to front with `full = true`, then caches the result as the background. A
//! simple redraw restores that cached background and redraws only the
//! foreground screen with `full = false`. Stack changes request a total
//! redraw; the request is consumed by the next [`Gui::render_frame`].

use ratatui::buffer::Buffer;
use ratatui::style::{Color, Style};

use super::handler::Gui;
use super::object::{Actions, ObjectId};

impl Gui {
    /// Request a full repaint of every screen on the next frame
    pub fn total_redraw(&mut self) {
        self.needs_total_redraw = true;
    }

    pub fn needs_total_redraw(&self) -> bool {
        self.needs_total_redraw
    }

    /// Draw one frame into `buf`, full or partial depending on the redraw flag
    pub fn render_frame(&mut self, buf: &mut Buffer, fps: u32) {
        self.assert_gui_thread();
        if self.needs_total_redraw || self.background.area != buf.area {
            self.redraw_total(buf);
            self.needs_total_redraw = false;
        } else {
            self.redraw_simple(buf);
        }
        if self.config.show_fps {
            draw_fps_counter(buf, fps);
        }
    }

    /// Repaint every screen, back to front, and cache the result
    pub fn redraw_total(&mut self, buf: &mut Buffer) {
        buf.reset();
        let screens: Vec<ObjectId> = self.stack.iter().collect();
        for screen in screens {
            self.render_tree(screen, buf, true);
        }
        self.background = buf.clone();
    }

    /// Restore the cached background and repaint only the foreground
    pub fn redraw_simple(&mut self, buf: &mut Buffer) {
        buf.clone_from(&self.background);
        if let Some(front) = self.stack.top() {
            self.render_tree(front, buf, false);
        }
    }

    fn render_tree(&mut self, id: ObjectId, buf: &mut Buffer, full: bool) {
        let (area, forward, children) = match self.node(id) {
            Some(node) if !node.disposed => {
                let gate = if full { Actions::SHOWALL } else { Actions::UPDATE };
                (
                    node.pos.intersection(buf.area),
                    node.def_actions.contains(gate),
                    node.children.clone(),
                )
            }
            _ => return,
        };

        self.with_widget(id, |w, _| w.render(buf, area, full));

        if !forward {
            return;
        }
        let gate = if full { Actions::SHOWALL } else { Actions::UPDATE };
        for child in children {
            if self.node(child).is_some_and(|n| n.rec_actions.contains(gate)) {
                self.render_tree(child, buf, full);
            }
        }
    }
}

/// Write the FPS counter into the top-left corner
pub fn draw_fps_counter(buf: &mut Buffer, fps: u32) {
    if buf.area.is_empty() {
        return;
    }
    let text = format!("FPS: {}", fps);
    let style = Style::default().fg(Color::Yellow).bg(Color::Black);
    let x = buf.area.x;
    let y = buf.area.y;
    buf.set_stringn(x, y, text, buf.area.width as usize, style);
}
