use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::ui;

/// What the loop should do after handling a key.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: applies media events, draws, and maps keys to
/// controller operations. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.pump_media_events();

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app) == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Map one key press onto the controller.
pub fn handle_key_event(key: KeyEvent, settings: &config::Settings, app: &mut App) -> Flow {
    // The save-failure notice blocks everything until acknowledged.
    if app.notice.is_some() {
        app.dismiss_notice();
        return Flow::Continue;
    }

    if app.lyrics.editor_open {
        handle_editor_key(key, app);
        return Flow::Continue;
    }

    let scrub = settings.controls.scrub_seconds as f64;
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::Char('a') => {
            app.add_files();
        }
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_play(),
        KeyCode::Char('l') | KeyCode::Right => app.seek_by(scrub),
        KeyCode::Char('h') | KeyCode::Left => app.seek_by(-scrub),
        KeyCode::Char(c @ '0'..='9') => {
            let tenth = c.to_digit(10).unwrap_or(0) as f64;
            app.seek_fraction(tenth / 10.0);
        }
        KeyCode::Char('y') => app.toggle_lyrics_visible(),
        KeyCode::Char('e') => app.open_lyrics_editor(),
        _ => {}
    }

    Flow::Continue
}

fn handle_editor_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.close_lyrics_editor(),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => app.save_lyrics(),
        KeyCode::Enter => app.push_draft_newline(),
        KeyCode::Backspace => app.pop_draft_char(),
        KeyCode::Char(c) => {
            if !c.is_control() && !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.push_draft_char(c);
            }
        }
        _ => {}
    }
}
