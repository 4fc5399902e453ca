//! Plain-text and JSON printers for the CLI.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use eventlab_core::format::{
    detail_headers, format_detail_row, format_summary_row, summary_headers, DisplayRule,
    PRICE_RULE,
};
use eventlab_core::{Dataset, LoadReport, PricePath, ResultRow, SpeedBar, SummaryRow};

/// Widest ranking bar, in characters.
const BAR_WIDTH: usize = 40;

/// Column-aligned table. The first column is left-aligned, the rest right.
pub fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_row(out, &header_cells, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> Result<()> {
    let mut line = String::new();
    for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            line.push_str(&format!("{cell:<w$}"));
        } else {
            line.push_str(&format!("  {cell:>w$}"));
        }
    }
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn summary<W: Write>(out: &mut W, summary: &[SummaryRow]) -> Result<()> {
    let rows: Vec<Vec<String>> = summary.iter().map(format_summary_row).collect();
    write_table(out, &summary_headers(), &rows)
}

pub fn detail<W: Write>(out: &mut W, rows: &[ResultRow]) -> Result<()> {
    let cells: Vec<Vec<String>> = rows.iter().map(format_detail_row).collect();
    write_table(out, &detail_headers(), &cells)
}

/// Wide layout: one row per time offset, one column per asset.
pub fn paths<W: Write>(out: &mut W, paths: &[PricePath]) -> Result<()> {
    let mut headers = vec!["Minutes"];
    headers.extend(paths.iter().map(|p| p.asset.as_str()));

    let samples = paths.first().map_or(0, |p| p.points.len());
    let rows: Vec<Vec<String>> = (0..samples)
        .map(|i| {
            let mut row = vec![paths[0].points[i].minutes.to_string()];
            row.extend(paths.iter().map(|p| PRICE_RULE.apply(p.points[i].price)));
            row
        })
        .collect();
    write_table(out, &headers, &rows)
}

/// Horizontal bars scaled to the slowest asset.
pub fn ranking<W: Write>(out: &mut W, bars: &[SpeedBar]) -> Result<()> {
    let max = bars
        .iter()
        .map(|b| b.time_to_peak)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let rows: Vec<Vec<String>> = bars
        .iter()
        .map(|b| {
            vec![
                b.asset.clone(),
                DisplayRule::Minutes.apply(b.time_to_peak),
                bar(b.time_to_peak, max),
            ]
        })
        .collect();

    // Bars read left to right, so they are padded rather than right-aligned.
    let mut widths = [5usize, 19];
    for row in &rows {
        widths[0] = widths[0].max(row[0].chars().count());
        widths[1] = widths[1].max(row[1].chars().count());
    }
    let [a, m] = widths;
    writeln!(out, "{:<a$}  {:>m$}", "Asset", "Time to Peak (min)")?;
    writeln!(out, "{}  {}", "-".repeat(a), "-".repeat(m))?;
    for row in rows {
        writeln!(out, "{:<a$}  {:>m$}  {}", row[0], row[1], row[2])?;
    }
    writeln!(out)?;
    writeln!(out, "Fastest pricing = lowest time to peak.")?;
    Ok(())
}

fn bar(value: f64, max: f64) -> String {
    if !value.is_finite() || max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(1, BAR_WIDTH))
}

pub fn load_report<W: Write>(out: &mut W, report: &LoadReport, dataset: &Dataset) -> Result<()> {
    writeln!(out, "File:        {}", report.source.display())?;
    writeln!(out, "Format:      {}", report.format.label())?;
    writeln!(out, "Rows read:   {}", report.rows_read)?;
    writeln!(out, "Rows used:   {}", dataset.len())?;
    writeln!(out, "Rejected:    {}", report.rejected.len())?;
    writeln!(out, "Assets:      {}", dataset.assets().len())?;
    writeln!(out, "Events:      {}", dataset.events().len())?;
    writeln!(out, "Fingerprint: {}", dataset.fingerprint())?;
    if !report.rejected.is_empty() {
        writeln!(out)?;
        for rej in &report.rejected {
            writeln!(
                out,
                "row {:>5}  {:<10}  {}",
                rej.line,
                rej.asset.as_deref().unwrap_or("?"),
                rej.reason
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventlab_core::{summarize, synthetic_path};

    fn row(asset: &str, event: &str, imm: f64, ttp: f64) -> ResultRow {
        ResultRow {
            asset: asset.into(),
            event: event.into(),
            immediate_return: imm,
            post_return: 0.0021,
            vol_change: 3.44,
            max_drawdown: -0.512,
            time_to_peak: ttp,
        }
    }

    fn text(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_aligns_columns() {
        let out = text(|w| {
            write_table(
                w,
                &["Asset", "Value"],
                &[
                    vec!["ZN".into(), "1.5".into()],
                    vec!["EURUSD".into(), "12.25".into()],
                ],
            )
        });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Asset   Value");
        assert_eq!(lines[1], "------  -----");
        assert_eq!(lines[2], "ZN        1.5");
        assert_eq!(lines[3], "EURUSD  12.25");
    }

    #[test]
    fn detail_uses_display_rules() {
        let out = text(|w| detail(w, &[row("ZN", "FOMC", 0.0123, 14.6)]));
        let data = out.lines().nth(2).unwrap();
        assert!(data.starts_with("ZN"));
        assert!(data.contains("1.23%"));
        assert!(data.contains("3.4%"));
        assert!(data.contains("-0.51%"));
        assert!(data.ends_with("15"));
    }

    #[test]
    fn summary_prints_four_decimals() {
        let rows = [row("ZN", "A", 0.002, 10.0), row("ZN", "B", 0.003, 20.0)];
        let out = text(|w| summary(w, &summarize(&rows)));
        assert!(out.contains("0.0025"));
        assert!(out.contains("15.0000"));
    }

    #[test]
    fn paths_are_wide_with_one_row_per_sample() {
        let path = PricePath {
            asset: "ZN".into(),
            points: synthetic_path(0.0, 30.0),
        };
        let out = text(|w| paths(w, std::slice::from_ref(&path)));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2 + path.points.len());
        assert!(lines[0].starts_with("Minutes"));
        assert!(lines[2].starts_with("-60"));
        assert!(lines.last().unwrap().starts_with("180"));
        assert!(lines.last().unwrap().ends_with("1.000000"));
    }

    #[test]
    fn empty_paths_print_only_header() {
        let out = text(|w| paths(w, &[]));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn ranking_bars_scale_to_slowest() {
        let bars = vec![
            SpeedBar {
                asset: "ZN".into(),
                time_to_peak: 10.0,
            },
            SpeedBar {
                asset: "ES".into(),
                time_to_peak: 40.0,
            },
            SpeedBar {
                asset: "GC".into(),
                time_to_peak: f64::NAN,
            },
        ];
        let out = text(|w| ranking(w, &bars));
        let zn = out.lines().find(|l| l.starts_with("ZN")).unwrap();
        let es = out.lines().find(|l| l.starts_with("ES")).unwrap();
        let gc = out.lines().find(|l| l.starts_with("GC")).unwrap();
        assert_eq!(zn.matches('█').count(), BAR_WIDTH / 4);
        assert_eq!(es.matches('█').count(), BAR_WIDTH);
        assert!(gc.contains("NaN"));
        assert_eq!(gc.matches('█').count(), 0);
    }

    #[test]
    fn json_is_pretty_and_newline_terminated() {
        let rows = [row("ZN", "A", 0.002, 10.0)];
        let out = text(|w| write_json(w, &summarize(&rows)));
        assert!(out.ends_with("}\n]\n"));
        let parsed: Vec<SummaryRow> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn load_report_lists_rejected_rows() {
        let dataset = Dataset::new(vec![row("ZN", "A", 0.002, 10.0)], "results.csv");
        let report = LoadReport {
            source: "results.csv".into(),
            format: eventlab_core::InputFormat::Csv,
            rows_read: 2,
            rejected: vec![eventlab_core::RejectedRow {
                line: 3,
                asset: Some("ES".into()),
                reason: "negative Time to Peak (min)".into(),
            }],
        };
        let out = text(|w| load_report(w, &report, &dataset));
        assert!(out.contains("Rows read:   2"));
        assert!(out.contains("Rows used:   1"));
        assert!(out.contains(dataset.fingerprint()));
        assert!(out.contains("row     3  ES"));
    }
}
