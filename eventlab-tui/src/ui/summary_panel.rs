//! Panel 2 — Summary: per-asset means with a red→green gradient per column.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use eventlab_core::format::SUMMARY_RULE;
use eventlab_core::{MetricField, SummaryRow};

use crate::app::AppState;
use crate::theme;
use crate::ui::{render_nothing_selected, truncate, window_start};

const ASSET_WIDTH: usize = 10;
const VALUE_WIDTH: usize = 11;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let summary = &app.view.summary;
    if summary.is_empty() {
        render_nothing_selected(f, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(format!("{} assets", summary.len()), theme::accent()),
        Span::styled("  mean per asset, 4 dp  [j/k]scroll", theme::muted()),
    ]));
    lines.push(Line::from(""));

    let mut header = vec![Span::styled(
        format!("{:<ASSET_WIDTH$}", "Asset"),
        theme::accent_bold(),
    )];
    for field in MetricField::SUMMARY {
        header.push(Span::styled(
            format!("{:>VALUE_WIDTH$}", field.short_label()),
            theme::accent_bold(),
        ));
    }
    header.push(Span::styled(format!("{:>6}", "N"), theme::accent_bold()));
    lines.push(Line::from(header));

    let ranges = column_ranges(summary);
    let visible = (area.height as usize).saturating_sub(3);
    let start = window_start(app.summary_scroll, visible);

    for (i, row) in summary.iter().enumerate().skip(start).take(visible) {
        let asset_style = if i == app.summary_scroll {
            theme::cursor()
        } else {
            theme::secondary()
        };
        let mut spans = vec![Span::styled(
            format!("{:<ASSET_WIDTH$}", truncate(&row.asset, ASSET_WIDTH - 1)),
            asset_style,
        )];
        for (field, (lo, hi)) in MetricField::SUMMARY.iter().zip(&ranges) {
            let value = row.metric(*field).unwrap_or(f64::NAN);
            let color = theme::gradient(theme::normalize(value, *lo, *hi));
            spans.push(Span::styled(
                format!("{:>VALUE_WIDTH$}", SUMMARY_RULE.apply(value)),
                Style::default().fg(color),
            ));
        }
        spans.push(Span::styled(format!("{:>6}", row.observations), theme::muted()));
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Finite (min, max) of each summary column.
pub(crate) fn column_ranges(summary: &[SummaryRow]) -> Vec<(f64, f64)> {
    MetricField::SUMMARY
        .iter()
        .map(|&field| {
            summary
                .iter()
                .filter_map(|r| r.metric(field))
                .filter(|v| v.is_finite())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                })
        })
        .collect()
}
