//! Overlay widgets — load report.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Load report: source, counts, fingerprint and the rejected rows.
pub fn render_load_report(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let report = &app.report;
    let border = if report.is_clean() {
        theme::accent()
    } else {
        theme::warning()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Load Report [Esc]close [j/k]scroll ")
        .title_style(border.add_modifier(Modifier::BOLD));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    field(&mut lines, "File", report.source.display().to_string());
    field(&mut lines, "Format", report.format.label().to_string());
    field(&mut lines, "Rows read", report.rows_read.to_string());
    field(&mut lines, "Rows used", app.dataset.len().to_string());
    field(&mut lines, "Rejected", report.rejected.len().to_string());
    field(&mut lines, "Fingerprint", app.dataset.fingerprint().to_string());
    lines.push(Line::from(""));

    if report.rejected.is_empty() {
        lines.push(Line::from(Span::styled("Every row passed validation.", theme::muted())));
    } else {
        let visible = (inner.height as usize).saturating_sub(lines.len());
        let start = app.report_scroll;
        for (i, rej) in report.rejected.iter().enumerate().skip(start).take(visible) {
            let style = if i == app.report_scroll {
                theme::warning().add_modifier(Modifier::BOLD)
            } else {
                theme::muted()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("row {:>5}  ", rej.line), theme::accent()),
                Span::styled(
                    format!("{:<10}", rej.asset.as_deref().unwrap_or("?")),
                    theme::neutral(),
                ),
                Span::styled(rej.reason.clone(), style),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn field(lines: &mut Vec<Line<'static>>, label: &str, value: String) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>12}: ", label), theme::muted()),
        Span::styled(value, theme::accent()),
    ]));
}
