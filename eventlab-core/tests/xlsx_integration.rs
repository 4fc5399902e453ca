//! Excel workbook end to end, from the checked-in fixture.
//!
//! Sheet layout of `fixtures/event_impact_results.xlsx`:
//! row 1 header (plus a `Notes` column), row 2 ZN, row 3 ES with its
//! immediate return stored as text, row 4 GC with a negative time to peak,
//! row 5 blank, row 6 CL with `n/a` as its immediate return.

#![cfg(feature = "xlsx")]

use eventlab_core::{load_results, DashboardView, InputFormat, LoadError, LoadOptions, Selection};

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/event_impact_results.xlsx"
);

#[test]
fn workbook_rows_load_with_sheet_line_numbers() {
    let loaded = load_results(FIXTURE, &LoadOptions::default()).unwrap();
    let report = &loaded.report;
    assert_eq!(report.format, InputFormat::Xlsx);
    // The blank sheet row is skipped without being counted.
    assert_eq!(report.rows_read, 4);
    assert_eq!(loaded.dataset.len(), 2);

    let lines: Vec<usize> = report.rejected.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![4, 6]);
    assert_eq!(report.rejected[0].asset.as_deref(), Some("GC"));
    assert!(report.rejected[0].reason.contains("negative"));
    assert_eq!(report.rejected[1].asset.as_deref(), Some("CL"));
    assert!(report.rejected[1].reason.contains("non-numeric value 'n/a'"));
}

#[test]
fn numeric_and_text_cells_both_parse() {
    let loaded = load_results(FIXTURE, &LoadOptions::default()).unwrap();
    let view = DashboardView::compute(&loaded.dataset, &Selection::all(&loaded.dataset));
    let assets: Vec<&str> = view.summary.iter().map(|s| s.asset.as_str()).collect();
    assert_eq!(assets, vec!["ES", "ZN"]);

    let es = &view.summary[0];
    assert_eq!(es.immediate_return, 0.004);
    assert_eq!(es.time_to_peak, 25.0);
    let zn = &view.summary[1];
    assert_eq!(zn.immediate_return, 0.0025);
    assert_eq!(zn.vol_change, 12.5);
    assert_eq!(zn.time_to_peak, 8.0);
}

#[test]
fn strict_load_names_first_bad_sheet_row() {
    let err = load_results(FIXTURE, &LoadOptions { strict: true }).unwrap_err();
    match err {
        LoadError::Strict { count, first, .. } => {
            assert_eq!(count, 2);
            assert_eq!(first.line, 4);
        }
        other => panic!("expected a strict-mode error, got {other}"),
    }
}
