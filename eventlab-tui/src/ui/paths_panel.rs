//! Panel 4 — Paths: synthetic price path per asset around the announcement.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;

use eventlab_core::path::{WINDOW_END_MIN, WINDOW_START_MIN};
use eventlab_core::PricePath;

use crate::app::AppState;
use crate::theme;
use crate::ui::render_nothing_selected;

pub const CAPTION: &str = "Note: Price paths are approximated from metrics for visualization.";
pub const ANNOUNCEMENT: &str = "Announcement";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let paths = &app.view.paths;
    if paths.is_empty() {
        render_nothing_selected(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    render_chart(f, chunks[0], paths);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            CAPTION,
            theme::muted().add_modifier(Modifier::ITALIC),
        ))),
        chunks[1],
    );
}

fn render_chart(f: &mut Frame, area: Rect, paths: &[PricePath]) {
    let (y_min, y_max) = y_bounds(paths);
    let x_min = WINDOW_START_MIN as f64;
    let x_max = WINDOW_END_MIN as f64;

    let series: Vec<Vec<(f64, f64)>> = paths.iter().map(PricePath::xy).collect();
    let marker_line = [(0.0, y_min), (0.0, y_max)];

    let mut datasets: Vec<Dataset> = paths
        .iter()
        .zip(&series)
        .enumerate()
        .map(|(i, (path, data))| {
            Dataset::default()
                .name(path.asset.clone())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::series_color(i)))
                .graph_type(GraphType::Line)
                .data(data)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .name(ANNOUNCEMENT)
            .marker(symbols::Marker::Dot)
            .style(theme::warning())
            .graph_type(GraphType::Line)
            .data(&marker_line),
    );

    let x_labels: Vec<Span> = (WINDOW_START_MIN..=WINDOW_END_MIN)
        .step_by(60)
        .map(|m| Span::styled(m.to_string(), theme::muted()))
        .collect();
    let y_mid = (y_min + y_max) / 2.0;
    let y_labels: Vec<Span> = [y_min, y_mid, y_max]
        .iter()
        .map(|v| Span::styled(percent_label(*v), theme::muted()))
        .collect();

    let chart = Chart::new(datasets)
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .title(Span::styled("Minutes from announcement", theme::muted()))
                .style(theme::muted())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Normalized price", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// Normalized price as a percentage of the pre-event level.
pub(crate) fn percent_label(price: f64) -> String {
    format!("{:.1}%", price * 100.0)
}

/// Padded bounds over every finite price; a flat or empty chart gets ±1%.
pub(crate) fn y_bounds(paths: &[PricePath]) -> (f64, f64) {
    let Some((lo, hi)) = paths
        .iter()
        .filter_map(PricePath::price_bounds)
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    else {
        return (0.99, 1.01);
    };
    let span = hi - lo;
    if span < 1e-12 {
        return (lo - 0.01, hi + 0.01);
    }
    let pad = span * 0.05;
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventlab_core::{synthetic_path, PathPoint};

    #[test]
    fn bounds_cover_paths_with_padding() {
        let paths = vec![PricePath {
            asset: "ZN".into(),
            points: synthetic_path(0.01, 15.0),
        }];
        let (lo, hi) = y_bounds(&paths);
        let (plo, phi) = paths[0].price_bounds().unwrap();
        assert!(lo < plo && hi > phi);
    }

    #[test]
    fn degenerate_bounds() {
        assert_eq!(y_bounds(&[]), (0.99, 1.01));
        let flat = vec![PricePath {
            asset: "X".into(),
            points: vec![PathPoint { minutes: 0.0, price: 1.0 }],
        }];
        assert_eq!(y_bounds(&flat), (0.99, 1.01));
        let nan = vec![PricePath {
            asset: "X".into(),
            points: synthetic_path(f64::NAN, 0.0),
        }];
        assert_eq!(y_bounds(&nan), (0.99, 1.01));
    }

    #[test]
    fn bounds_span_every_path() {
        let paths = vec![
            PricePath {
                asset: "ZN".into(),
                points: synthetic_path(0.01, 15.0),
            },
            PricePath {
                asset: "ES".into(),
                points: synthetic_path(-0.02, 30.0),
            },
            PricePath {
                asset: "GC".into(),
                points: synthetic_path(f64::NAN, 0.0),
            },
        ];
        let (lo, hi) = y_bounds(&paths);
        let (_, zn_hi) = paths[0].price_bounds().unwrap();
        let (es_lo, _) = paths[1].price_bounds().unwrap();
        assert!(lo < es_lo && hi > zn_hi);
    }

    #[test]
    fn labels_read_as_percent() {
        assert_eq!(percent_label(1.0), "100.0%");
        assert_eq!(percent_label(0.999), "99.9%");
    }
}
