//! Panel 6 — Help: keyboard shortcuts and what each view shows.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-6", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "r", "Load report (rows read, rejected rows)");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Filters");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "h / l", "Switch between asset and event lists");
    key(&mut lines, "Space", "Toggle the item under the cursor");
    key(&mut lines, "a", "Select every item in the list");
    key(&mut lines, "d", "Deselect every item in the list");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Summary");
    key(&mut lines, "j / k", "Scroll assets");
    key(&mut lines, "", "Mean per asset; colour runs red (low) to green (high) per column");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Speed");
    key(&mut lines, "o", "Toggle bar order: alphabetical / fastest");
    key(&mut lines, "", "Fastest pricing = lowest time to peak");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4 — Paths");
    key(&mut lines, "", "Synthetic path per asset, -60 to +180 min; line at 0 = announcement");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 5 — Detail");
    key(&mut lines, "j / k", "Scroll rows");
    key(&mut lines, "g / G", "Jump to first / last row");
    lines.push(Line::from(""));

    section(&mut lines, "Session");
    key(&mut lines, "File", &app.dataset.source().display().to_string());
    key(&mut lines, "Fingerprint", app.dataset.fingerprint());
    match &app.state_path {
        Some(path) => key(&mut lines, "State", &path.display().to_string()),
        None => key(&mut lines, "State", "not persisted"),
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
