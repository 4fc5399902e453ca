//! Top-level UI layout — one active panel plus a status bar.

pub mod detail_panel;
pub mod filters_panel;
pub mod help_panel;
pub mod overlays;
pub mod paths_panel;
pub mod speed_panel;
pub mod status_bar;
pub mod summary_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    match app.overlay {
        Overlay::LoadReport => overlays::render_load_report(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Filters => filters_panel::render(f, inner, app),
        Panel::Summary => summary_panel::render(f, inner, app),
        Panel::Speed => speed_panel::render(f, inner, app),
        Panel::Paths => paths_panel::render(f, inner, app),
        Panel::Detail => detail_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Placeholder shown by the data panels when the selection is empty.
pub(crate) fn render_nothing_selected(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No rows match the current selection.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press 1 for Filters, then Space to select assets and events (a = all).",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// First visible row so that `cursor` stays inside a window of `height` rows.
pub(crate) fn window_start(cursor: usize, height: usize) -> usize {
    if height == 0 {
        return cursor;
    }
    cursor.saturating_sub(height - 1)
}

/// Truncate to `max` chars, marking the cut with a trailing '.'.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}.")
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_app;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn window_keeps_cursor_visible() {
        assert_eq!(window_start(0, 10), 0);
        assert_eq!(window_start(9, 10), 0);
        assert_eq!(window_start(10, 10), 1);
        assert_eq!(window_start(3, 0), 3);
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("EURUSD", 8), "EURUSD");
        assert_eq!(truncate("FOMC 2024-09-18", 6), "FOMC .");
    }

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 40, area);
        assert_eq!((r.width, r.height), (60, 20));
        assert!(r.x >= area.x && r.y >= area.y);
    }

    #[test]
    fn every_panel_draws() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        for i in 0..Panel::COUNT {
            app.active_panel = Panel::from_index(i).unwrap();
            terminal.draw(|f| draw(f, &app)).unwrap();
            let buffer = terminal.backend().buffer().clone();
            let title = format!(" {} [{}] ", app.active_panel.label(), i + 1);
            let top: String = (0..buffer.area.width)
                .map(|x| buffer[(x, 0)].symbol().to_string())
                .collect();
            assert!(top.contains(&title), "missing title {title:?} in {top:?}");
        }
        app.overlay = Overlay::LoadReport;
        terminal.draw(|f| draw(f, &app)).unwrap();
    }

    #[test]
    fn empty_selection_draws() {
        let mut app = sample_app();
        app.selection = eventlab_core::Selection::default();
        app.recompute();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        for i in 0..Panel::COUNT {
            app.active_panel = Panel::from_index(i).unwrap();
            terminal.draw(|f| draw(f, &app)).unwrap();
        }
    }
}
