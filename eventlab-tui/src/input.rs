//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::LoadReport => {
            handle_report_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='6') => {
            if let Some(panel) = c.to_digit(10).and_then(|d| Panel::from_index(d as usize - 1)) {
                app.active_panel = panel;
            }
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('r') => {
            app.overlay = Overlay::LoadReport;
            app.report_scroll = 0;
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Filters => handle_filters_key(app, key),
        Panel::Summary => {
            let len = app.view.summary.len();
            scroll(&mut app.summary_scroll, len, key);
        }
        Panel::Speed => handle_speed_key(app, key),
        Panel::Paths => {} // display only
        Panel::Detail => {
            let len = app.view.detail.len();
            scroll(&mut app.detail_scroll, len, key);
        }
        Panel::Help => {}
    }
}

fn handle_report_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('r') | KeyCode::Enter => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.report_scroll + 1 < app.report.rejected.len() {
                app.report_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.report_scroll = app.report_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_filters_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.filters.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.filters.cursor_up(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('l') | KeyCode::Right => {
            app.filters.switch_list()
        }
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_cursor(),
        KeyCode::Char('a') => app.select_all(),
        KeyCode::Char('d') => app.select_none(),
        _ => {}
    }
}

fn handle_speed_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('o') => app.toggle_ranking(),
        _ => {
            let len = app.view.summary.len();
            scroll(&mut app.speed_scroll, len, key);
        }
    }
}

fn scroll(offset: &mut usize, len: usize, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if len > 0 && *offset + 1 < len {
                *offset += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => *offset = offset.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => *offset = 0,
        KeyCode::Char('G') | KeyCode::End => *offset = len.saturating_sub(1),
        _ => {}
    }
}
