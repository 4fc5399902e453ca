//! Panel 3 — Speed: mean time to peak per asset as horizontal bars.
//!
//! Fastest pricing = lowest time to peak, so shorter bars are greener.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use eventlab_core::format::DisplayRule;
use eventlab_core::SpeedBar;

use crate::app::AppState;
use crate::theme;
use crate::ui::{render_nothing_selected, truncate, window_start};

const LABEL_WIDTH: usize = 10;
const VALUE_WIDTH: usize = 12;
const MINUTES: DisplayRule = DisplayRule::Fixed { decimals: 1 };

/// Left-to-right fill levels of one cell, in eighths.
const EIGHTHS: [&str; 8] = ["", "▏", "▎", "▍", "▌", "▋", "▊", "▉"];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let bars = app.view.ranking(app.ranking);
    if bars.is_empty() {
        render_nothing_selected(f, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled("Time to peak (min)  ", theme::accent_bold()),
        Span::styled(format!("order: {}", app.ranking.label()), theme::accent()),
        Span::styled("  [o]toggle order [j/k]scroll", theme::muted()),
    ]));
    lines.push(Line::from(Span::styled(
        "Fastest pricing = lowest time to peak. Bonds/Forex usually win.",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    let bar_width = (area.width as usize).saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 2);
    let max = bars
        .iter()
        .map(|b| b.time_to_peak)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let min = bars
        .iter()
        .map(|b| b.time_to_peak)
        .filter(|v| v.is_finite())
        .fold(f64::INFINITY, f64::min);

    let visible = (area.height as usize).saturating_sub(3);
    let start = window_start(app.speed_scroll, visible);
    for (i, bar) in bars.iter().enumerate().skip(start).take(visible) {
        // Low time to peak is good: invert the gradient.
        let t = 1.0 - theme::normalize(bar.time_to_peak, min, max);
        let color = theme::gradient(t);
        let label_style = if i == app.speed_scroll {
            theme::cursor()
        } else {
            theme::secondary()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<LABEL_WIDTH$}", truncate(&bar.asset, LABEL_WIDTH - 1)),
                label_style,
            ),
            Span::styled(bar_text(bar, max, bar_width), Style::default().fg(color)),
            Span::styled(
                format!(" {:>width$}", MINUTES.apply(bar.time_to_peak), width = VALUE_WIDTH - 1),
                theme::accent(),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Bar of `width` cells scaled so `max` fills the row; padded to `width`.
pub(crate) fn bar_text(bar: &SpeedBar, max: f64, width: usize) -> String {
    let fraction = if max > 0.0 && bar.time_to_peak.is_finite() {
        (bar.time_to_peak / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let eighths = (fraction * width as f64 * 8.0).round() as usize;
    let full = eighths / 8;
    let mut text = "█".repeat(full);
    text.push_str(EIGHTHS[eighths % 8]);
    let used = text.chars().count();
    text.push_str(&" ".repeat(width.saturating_sub(used)));
    text
}
