//! Sample screens for the terminal demo
//!
//! - [`menu`]: the bottom-most screen, keyboard driven, with a timer label
//! - [`dialog`]: modal dialogs whose OK button is built in a construction scope
//! - [`theme`]: colors shared by both

pub mod dialog;
pub mod menu;
pub mod theme;

use screenstack::event_loop::{Application, LoopAction};
use screenstack::gui::Gui;
use screenstack::input::ControlEvent;

/// Application hooks for the demo
pub struct DemoApp;

impl Application for DemoApp {
    fn on_control(&mut self, gui: &mut Gui, event: ControlEvent) -> LoopAction {
        match event {
            ControlEvent::ReturnToMainMenu | ControlEvent::ReturnToMenuAfterLoad => {
                let extra = gui.stack().len().saturating_sub(1);
                if let Err(e) = gui.pop(extra) {
                    log::warn!("could not return to menu: {}", e);
                }
                LoopAction::Continue
            }
            ControlEvent::InterfaceChanged | ControlEvent::ToggleFullscreen => {
                gui.total_redraw();
                LoopAction::Continue
            }
            ControlEvent::RestartGame | ControlEvent::StartCampaignScenario => {
                log::info!("{:?} has no effect in the demo", event);
                LoopAction::Continue
            }
            ControlEvent::ForcedQuit => LoopAction::Exit,
        }
    }
}
