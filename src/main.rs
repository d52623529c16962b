// screenstack demo: a menu and stacked dialogs in the terminal

mod demo;

use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use screenstack::event_loop::TerminalFrontend;
use screenstack::input::ControlEvent;
use screenstack::{EventLoop, Gui, GuiConfig};

use demo::menu::MainMenu;
use demo::DemoApp;

fn usage(program_name: &str) {
    eprintln!("Usage: {} [config.toml] [--quit-after SECONDS]", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {}                          # Run with defaults", program_name);
    eprintln!("  {} gui.toml                 # Load settings", program_name);
    eprintln!("  {} --quit-after 5           # Quit from a background thread", program_name);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("screenstack");

    let mut config_path: Option<&str> = None;
    let mut quit_after: Option<u64> = None;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                usage(program_name);
                return Ok(());
            }
            "--quit-after" => match rest.next().and_then(|s| s.parse().ok()) {
                Some(secs) => quit_after = Some(secs),
                None => {
                    eprintln!("Error: --quit-after needs a number of seconds");
                    usage(program_name);
                    std::process::exit(1);
                }
            },
            path => config_path = Some(path),
        }
    }

    let config = match config_path {
        Some(path) => {
            if !Path::new(path).exists() {
                eprintln!("Error: File '{}' not found", path);
                usage(program_name);
                std::process::exit(1);
            }
            match GuiConfig::load(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => GuiConfig::default(),
    };

    let mut event_loop = EventLoop::new(&config);

    // Quitting from another thread goes through the queue, then waits for the
    // GUI thread to acknowledge
    if let Some(secs) = quit_after {
        let sender = event_loop.sender();
        let termination = event_loop.termination();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            sender.push_control(ControlEvent::ForcedQuit);
            if !termination.wait_acknowledged_timeout(Duration::from_secs(5)) {
                log::warn!("GUI thread did not acknowledge the quit request");
            }
        });
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    let mut gui = Gui::new(config);
    let area = Rect::new(0, 0, size.width.min(60), size.height.min(16));
    let menu = MainMenu::build(&mut gui, area, event_loop.sender());

    let mut frontend = TerminalFrontend::new(terminal);
    let res = gui
        .push(menu)
        .and_then(|()| event_loop.run(&mut gui, &mut DemoApp, &mut frontend));

    // Restore terminal
    let mut terminal = frontend.into_terminal();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}
