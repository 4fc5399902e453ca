//! Parrot/neon theme tokens for the EventLab TUI.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights)
//! - **Positive**: Neon green (top of the summary gradient)
//! - **Negative**: Hot pink (errors, bottom of the summary gradient)
//! - **Warning**: Neon orange (rejected rows, alerts)
//! - **Neutral**: Cool purple (section labels)
//! - **Muted**: Steel blue (secondary text)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// Line colours for the path overlay, cycled per asset.
pub const SERIES: [Color; 8] = [
    ACCENT,
    POSITIVE,
    WARNING,
    NEUTRAL,
    NEGATIVE,
    Color::Rgb(255, 215, 0),
    Color::Rgb(64, 224, 208),
    Color::Rgb(240, 128, 128),
];

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

/// Row under the cursor.
pub fn cursor() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

pub fn series_color(index: usize) -> Color {
    SERIES[index % SERIES.len()]
}

/// Red → yellow → green for `t` in [0, 1]; non-finite `t` is grey.
pub fn gradient(t: f64) -> Color {
    if !t.is_finite() {
        return TEXT_SECONDARY;
    }
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8, s: f64| (a as f64 + (b as f64 - a as f64) * s).round() as u8;
    // Anchors: red (215, 48, 39), yellow (254, 224, 139), green (26, 152, 80).
    if t < 0.5 {
        let s = t * 2.0;
        Color::Rgb(lerp(215, 254, s), lerp(48, 224, s), lerp(39, 139, s))
    } else {
        let s = (t - 0.5) * 2.0;
        Color::Rgb(lerp(254, 26, s), lerp(224, 152, s), lerp(139, 80, s))
    }
}

/// Position of `value` within `[lo, hi]`; a flat column sits mid-scale.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if !value.is_finite() || !lo.is_finite() || !hi.is_finite() {
        return f64::NAN;
    }
    if hi - lo <= f64::EPSILON {
        return 0.5;
    }
    (value - lo) / (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        assert_eq!(gradient(0.0), Color::Rgb(215, 48, 39));
        assert_eq!(gradient(0.5), Color::Rgb(254, 224, 139));
        assert_eq!(gradient(1.0), Color::Rgb(26, 152, 80));
        assert_eq!(gradient(7.0), gradient(1.0));
        assert_eq!(gradient(f64::NAN), TEXT_SECONDARY);
    }

    #[test]
    fn normalize_handles_flat_and_nan() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
        assert!(normalize(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn series_cycles() {
        assert_eq!(series_color(0), ACCENT);
        assert_eq!(series_color(SERIES.len()), ACCENT);
    }

    #[test]
    fn active_panel_is_highlighted() {
        assert_eq!(panel_border(true), accent());
        assert_eq!(panel_title(false), muted());
    }
}
