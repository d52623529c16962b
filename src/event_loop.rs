//! The main loop
//!
//! One frame is:
//!
//! 1. forward pending terminal input into the event queue
//! 2. dispatch every queued event (control events go to the [`Application`])
//! 3. wait out the frame budget ([`FramePacer::tick`])
//! 4. deliver elapsed time to timer listeners and let the application update
//! 5. render, total or partial depending on the redraw flag
//! 6. destroy everything disposed during the frame
//!
//! Disposal always runs after dispatch and rendering, never in between.

use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

use crate::config::GuiConfig;
use crate::errors::GuiError;
use crate::gui::Gui;
use crate::input::channel::{EventQueue, EventSender, TerminationSignal};
use crate::input::events::ControlEvent;
use crate::input::terminal::TerminalSource;
use crate::pacing::{Clock, FramePacer, SystemClock};

/// What the loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    Exit,
}

/// Application hooks called by the loop
#[allow(unused_variables)]
pub trait Application {
    /// React to a lifecycle request. `ForcedQuit` ends the loop regardless of
    /// the return value.
    fn on_control(&mut self, gui: &mut Gui, event: ControlEvent) -> LoopAction {
        LoopAction::Continue
    }

    /// Per-frame update, after timers and before rendering
    fn update(&mut self, gui: &mut Gui) {}
}

/// Where input comes from and frames go to
pub trait Frontend {
    /// Forward any pending input into the queue without blocking
    fn pump_input(&mut self, sender: &EventSender) -> io::Result<()>;

    /// Present one frame drawn by `render`
    fn draw(&mut self, render: &mut dyn FnMut(&mut Buffer)) -> io::Result<()>;
}

/// A ratatui terminal fed by crossterm input
pub struct TerminalFrontend<B: Backend> {
    terminal: Terminal<B>,
    source: TerminalSource,
}

impl<B: Backend> TerminalFrontend<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        TerminalFrontend {
            terminal,
            source: TerminalSource::new(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }
}

impl<B: Backend> Frontend for TerminalFrontend<B> {
    fn pump_input(&mut self, sender: &EventSender) -> io::Result<()> {
        self.source.pump(sender, Duration::ZERO)?;
        Ok(())
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Buffer)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame.buffer_mut()))?;
        Ok(())
    }
}

/// Renders into an in-memory buffer; input only arrives through the queue
#[derive(Debug)]
pub struct HeadlessFrontend {
    pub buffer: Buffer,
    pub frames: usize,
}

impl HeadlessFrontend {
    pub fn new(width: u16, height: u16) -> Self {
        HeadlessFrontend {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            frames: 0,
        }
    }
}

impl Frontend for HeadlessFrontend {
    fn pump_input(&mut self, _sender: &EventSender) -> io::Result<()> {
        Ok(())
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Buffer)) -> io::Result<()> {
        render(&mut self.buffer);
        self.frames += 1;
        Ok(())
    }
}

/// Drives dispatch, pacing, rendering and disposal
pub struct EventLoop<C: Clock = SystemClock> {
    pacer: FramePacer<C>,
    queue: EventQueue,
    termination: TerminationSignal,
}

impl EventLoop<SystemClock> {
    pub fn new(config: &GuiConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> EventLoop<C> {
    pub fn with_clock(config: &GuiConfig, clock: C) -> Self {
        let mut pacer = FramePacer::with_clock(config.target_fps, clock);
        pacer.set_max_elapsed(Duration::from_millis(config.max_elapsed_ms));
        pacer.init();
        EventLoop {
            pacer,
            queue: EventQueue::new(),
            termination: TerminationSignal::new(),
        }
    }

    /// Handle for posting events from any thread
    pub fn sender(&self) -> EventSender {
        self.queue.sender()
    }

    /// Handshake a non-GUI thread can wait on after posting `ForcedQuit`
    pub fn termination(&self) -> TerminationSignal {
        self.termination.clone()
    }

    pub fn pacer(&self) -> &FramePacer<C> {
        &self.pacer
    }

    /// Run frames until the application or a `ForcedQuit` ends the loop
    pub fn run(
        &mut self,
        gui: &mut Gui,
        app: &mut impl Application,
        frontend: &mut impl Frontend,
    ) -> Result<(), GuiError> {
        self.pacer.init();
        loop {
            if self.run_frame(gui, app, frontend)? == LoopAction::Exit {
                log::info!("event loop finished");
                return Ok(());
            }
        }
    }

    /// Run exactly one frame
    pub fn run_frame(
        &mut self,
        gui: &mut Gui,
        app: &mut impl Application,
        frontend: &mut impl Frontend,
    ) -> Result<LoopAction, GuiError> {
        gui.assert_gui_thread();
        frontend.pump_input(&self.queue.sender())?;

        let mut action = LoopAction::Continue;
        let termination = &self.termination;
        gui.handle_events(&self.queue, |gui, event| {
            log::info!("control event: {:?}", event);
            let wanted = app.on_control(gui, event);
            if event == ControlEvent::ForcedQuit {
                termination.acknowledge();
                action = LoopAction::Exit;
            } else if wanted == LoopAction::Exit {
                action = LoopAction::Exit;
            }
        });

        self.pacer.tick();
        gui.update_time(self.pacer.elapsed_ms());
        app.update(gui);

        let fps = self.pacer.fps();
        frontend.draw(&mut |buf| gui.render_frame(buf, fps))?;

        gui.drain_disposed();
        Ok(action)
    }
}
