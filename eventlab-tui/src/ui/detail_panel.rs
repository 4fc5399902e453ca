//! Panel 5 — Detail: every filtered row, formatted per field.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use eventlab_core::format::format_detail_row;
use eventlab_core::MetricField;

use crate::app::AppState;
use crate::theme;
use crate::ui::{render_nothing_selected, truncate, window_start};

const ASSET_WIDTH: usize = 9;
const EVENT_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 10;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = &app.view.detail;
    if rows.is_empty() {
        render_nothing_selected(f, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(format!("{} rows", rows.len()), theme::accent()),
        Span::styled(
            format!("  row {}/{}", app.detail_scroll + 1, rows.len()),
            theme::muted(),
        ),
        Span::styled("  [j/k]scroll [g/G]top/bottom", theme::muted()),
    ]));
    lines.push(Line::from(""));

    let mut header = format!(
        "{:<ASSET_WIDTH$}{:<EVENT_WIDTH$}",
        "Asset", "Event"
    );
    for field in MetricField::ALL {
        header.push_str(&format!("{:>VALUE_WIDTH$}", field.short_label()));
    }
    lines.push(Line::from(Span::styled(header, theme::accent_bold())));

    let visible = (area.height as usize).saturating_sub(3);
    let start = window_start(app.detail_scroll, visible);

    for (i, row) in rows.iter().enumerate().skip(start).take(visible) {
        let cells = format_detail_row(row);
        let is_cursor = i == app.detail_scroll;
        let mut spans = vec![
            Span::styled(
                format!("{:<ASSET_WIDTH$}", truncate(&cells[0], ASSET_WIDTH - 1)),
                if is_cursor { theme::cursor() } else { theme::secondary() },
            ),
            Span::styled(
                format!("{:<EVENT_WIDTH$}", truncate(&cells[1], EVENT_WIDTH - 1)),
                theme::neutral(),
            ),
        ];
        for (field, cell) in MetricField::ALL.iter().zip(&cells[2..]) {
            let style = match field {
                MetricField::ImmediateReturn | MetricField::PostReturn => {
                    signed_style(row.metric(*field))
                }
                MetricField::MaxDrawdown => theme::negative(),
                _ => theme::secondary(),
            };
            spans.push(Span::styled(format!("{cell:>VALUE_WIDTH$}"), style));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn signed_style(value: f64) -> ratatui::style::Style {
    if value > 0.0 {
        theme::positive()
    } else if value < 0.0 {
        theme::negative()
    } else {
        theme::secondary()
    }
}
