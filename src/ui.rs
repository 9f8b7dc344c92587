//! UI rendering helpers for the player window.
//!
//! This module renders the track list, the bottom transport bar with its
//! lyrics panel, and the editor/notice overlays using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::{ControlsSettings, TimeField, UiSettings};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("a".to_string(), "add files".to_string());
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "play selected song".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    // h/l is filled dynamically from config.
    map.insert("0-9".to_string(), "jump to 0-90%".to_string());
    map.insert("y".to_string(), "lyrics panel".to_string());
    map.insert("e".to_string(), "edit lyrics".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["a", "j/k", "enter", "space/p", "h/l", "0-9", "y", "e", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "h/l" {
                Some(format!("[h/l] seek -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `M:SS`; unknown or invalid values render as `0:00`.
fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Build the transport time text (elapsed/total/remaining) per `UiSettings`.
fn time_text(position: f64, duration: Option<f64>, remaining: f64, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();
    for f in &ui.time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_time(position)),
            TimeField::Total => parts.push(format_time(duration.unwrap_or(0.0))),
            TimeField::Remaining => parts.push(format!("-{}", format_time(remaining))),
        }
    }
    parts.join(&ui.time_separator)
}

/// Hard-wrap `text` into lines of at most `width` characters. Blank lines are kept.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            out.push(chunk.iter().collect());
        }
    }
    out
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let player_height = if app.current_track().is_some() {
        ui_settings.lyrics_panel_height.max(5)
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(player_height),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" arkia ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_track_list(frame, app, chunks[1]);

    if player_height > 0 {
        draw_player(frame, app, ui_settings, chunks[2]);
    }

    if app.lyrics.editor_open {
        let area = frame.area();
        draw_editor(frame, app, area);
    }

    if let Some(notice) = app.notice.as_deref() {
        let area = centered_rect_sized(44, 5, frame.area());
        frame.render_widget(Clear, area);
        let par = Paragraph::new(format!("{notice}\n\n(press any key)"))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" notice ").bold())
            .wrap(Wrap { trim: true });
        frame.render_widget(par, area);
    }

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(left_padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_track_list(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.tracks.len();
    let title = format!(" songs ({total}) ");

    if total == 0 {
        let empty = Paragraph::new("No songs yet. Press [a] to add music files.")
            .block(left_padded(&title))
            .italic();
        frame.render_widget(empty, area);
        return;
    }

    // Center the selected item when possible by creating a visible window.
    // Important: only build ListItems for the visible window (avoid allocating the entire list).
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = app.selected.min(total - 1);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let visible_items: Vec<ListItem> = (start..end)
        .map(|i| {
            let track = &app.tracks[i];
            let marker = if app.current == Some(i) { "♪ " } else { "  " };
            let item = ListItem::new(format!("{marker}{}", track.display));
            if app.current == Some(i) {
                item.bold()
            } else {
                item
            }
        })
        .collect();

    let list = List::new(visible_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    state.select(Some(selected_pos_in_visible));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player(frame: &mut Frame, app: &App, ui_settings: &UiSettings, area: Rect) {
    let Some(track) = app.current_track() else {
        return;
    };

    let lyrics_width = if app.lyrics.visible {
        ui_settings.lyrics_panel_width.min(area.width / 2)
    } else {
        0
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(9),
            Constraint::Min(20),
            Constraint::Length(lyrics_width),
        ])
        .split(area);

    // Artwork placeholder.
    let art = Paragraph::new("\n ♫")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(art, cols[0]);

    // Transport: title/artist, state, and the scrubber.
    let block = left_padded(" now playing ");
    let inner = block.inner(cols[1]);
    frame.render_widget(block, cols[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let state = if app.playing { "▶ Playing" } else { "⏸ Paused" };
    frame.render_widget(Paragraph::new(track.title.as_str()).bold(), rows[0]);
    frame.render_widget(
        Paragraph::new(format!("{} • {}", track.artist, state)).dim(),
        rows[1],
    );

    let ratio = match app.duration {
        Some(d) if d.is_finite() && d > 0.0 => (app.position / d).clamp(0.0, 1.0),
        _ => 0.0,
    };
    let gauge = LineGauge::default()
        .ratio(ratio)
        .label(time_text(app.position, app.duration, app.remaining(), ui_settings));
    frame.render_widget(gauge, rows[2]);

    if lyrics_width > 0 {
        draw_lyrics_panel(frame, app, cols[2]);
    }
}

fn draw_lyrics_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = left_padded(" lyrics ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lyrics = app
        .current_track()
        .and_then(|t| t.lyrics.as_deref())
        .filter(|l| !l.trim().is_empty());
    let Some(lyrics) = lyrics else {
        let empty = Paragraph::new("No embedded lyrics found. Press [e] to add.")
            .dim()
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, inner);
        return;
    };

    let lines = wrap_lines(lyrics, inner.width as usize);
    let scroll_range = lines.len().saturating_sub(inner.height as usize);
    let offset = app.lyrics_scroll(scroll_range).unwrap_or(0);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    let par = Paragraph::new(lines.join("\n")).scroll((offset, 0));
    frame.render_widget(par, inner);
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_sized(72, 18, area);
    frame.render_widget(Clear, popup);

    let title = app
        .current_track()
        .map(|t| format!(" edit lyrics: {} ", t.title))
        .unwrap_or_else(|| " edit lyrics ".to_string());
    let block = left_padded(&title).title_bottom(" [ctrl-s] save | [esc] cancel ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    // Keep the end of the draft (where typing happens) in view.
    let mut text = app.lyrics.draft.clone();
    text.push('▏');
    let lines = wrap_lines(&text, inner.width as usize);
    let skip = lines.len().saturating_sub(inner.height as usize);
    let visible = lines[skip..].join("\n");
    frame.render_widget(Paragraph::new(visible), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_matches_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(9.9), "0:09");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn time_text_follows_configured_fields() {
        let ui = UiSettings::default();
        assert_eq!(time_text(65.0, Some(200.0), 135.0, &ui), "1:05 / -2:15");

        let ui = UiSettings {
            time_fields: vec![TimeField::Elapsed, TimeField::Total],
            time_separator: " of ".into(),
            ..UiSettings::default()
        };
        assert_eq!(time_text(65.0, None, 0.0, &ui), "1:05 of 0:00");
    }

    #[test]
    fn wrap_lines_splits_long_lines_and_keeps_blank_ones() {
        assert_eq!(
            wrap_lines("abcdef\n\nxy", 4),
            vec!["abcd".to_string(), "ef".into(), "".into(), "xy".into()]
        );
        assert_eq!(wrap_lines("", 10), vec![String::new()]);
        assert_eq!(wrap_lines("üñíçø", 2).len(), 3);
    }

    #[test]
    fn controls_text_includes_scrub_seconds() {
        let text = controls_text(7);
        assert!(text.contains("[h/l] seek -/+7s"));
        assert!(text.starts_with("[a] add files"));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect_sized(72, 18, area);
        assert!(r.x + r.width <= area.width);
        assert!(r.y + r.height <= area.height);
    }
}
