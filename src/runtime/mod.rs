use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioElement;
use crate::bridge::NativeBridge;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_problem) = settings::load_settings();
    logging::init(&settings.logging);
    if let Some(msg) = settings_problem {
        warn!("{msg}");
    }

    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let bridge = NativeBridge::new(&settings.library);
    let media = RodioElement::new(settings.audio.clone());
    let mut app = App::new(Box::new(bridge), Box::new(media), settings.library.clone());
    app.lyrics.visible = settings.ui.show_lyrics;

    startup::import_initial_paths(&mut app, &args, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    run_result
}
