//! Panel 1 — Filters: asset and event checkbox lists.

use std::collections::BTreeSet;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, FilterList};
use crate::theme;
use crate::ui::{truncate, window_start};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let header = Line::from(vec![
        Span::styled("Rows: ", theme::muted()),
        Span::styled(
            format!("{}/{}", app.view.detail.len(), app.dataset.len()),
            theme::accent(),
        ),
        Span::styled(
            "  [Space]toggle [a]ll [d]none [h/l]switch list",
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let filters = &app.filters;
    render_list(
        f,
        columns[0],
        "Assets",
        &filters.assets,
        &app.selection.assets,
        filters.asset_cursor,
        filters.focus == FilterList::Assets,
    );
    render_list(
        f,
        columns[1],
        "Events",
        &filters.events,
        &app.selection.events,
        filters.event_cursor,
        filters.focus == FilterList::Events,
    );
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    items: &[String],
    selected: &BTreeSet<String>,
    cursor: usize,
    focused: bool,
) {
    let mut lines: Vec<Line> = Vec::new();
    let chosen = items.iter().filter(|i| selected.contains(*i)).count();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{title} "),
            if focused {
                theme::accent_bold()
            } else {
                theme::neutral()
            },
        ),
        Span::styled(format!("({chosen}/{})", items.len()), theme::muted()),
    ]));

    let visible = (area.height as usize).saturating_sub(1);
    let start = window_start(cursor, visible);
    let width = (area.width as usize).saturating_sub(6);

    for (i, item) in items.iter().enumerate().skip(start).take(visible) {
        let is_selected = selected.contains(item);
        let mark = if is_selected { "[x]" } else { "[ ]" };
        let style = if focused && i == cursor {
            theme::cursor()
        } else if is_selected {
            theme::accent()
        } else {
            theme::muted()
        };
        lines.push(Line::from(Span::styled(
            format!("{mark} {}", truncate(item, width)),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
