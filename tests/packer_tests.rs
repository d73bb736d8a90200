use discogrid::catalog::{Album, YearGroup, YearKey};
use discogrid::config::GridParams;
use discogrid::layout::{compute_grid_layout, Cell, GridPacker, LayoutResult, Rect};
use rstest::rstest;

fn albums(ids: &[&str]) -> Vec<Album> {
    ids.iter().map(|id| Album::with_id(*id)).collect()
}

fn rect(x: f64, y: f64, size: f64) -> Rect {
    Rect {
        x,
        y,
        w: size,
        h: size,
    }
}

fn assert_rect(actual: &Rect, expected: Rect) {
    let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
    assert!(
        close(actual.x, expected.x)
            && close(actual.y, expected.y)
            && close(actual.w, expected.w)
            && close(actual.h, expected.h),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_single_year_scenario() {
    // 1048 - 2 * 24 = 1000 usable -> 10 columns of 100px
    let groups = vec![YearGroup::new(1975, albums(&["a", "b", "c"]))];
    let layout = compute_grid_layout(&groups, 1048.0);

    assert_eq!(layout.columns, 10);
    assert_eq!(layout.cell_size, 100.0);
    assert_eq!(layout.cells.len(), 4);

    match &layout.cells[0] {
        Cell::Year { rect: r, year, count } => {
            assert_eq!(*year, YearKey::Year(1975));
            assert_eq!(*count, 3);
            assert_rect(r, rect(24.0, 0.0, 200.0));
        }
        other => panic!("first cell should be the year label, got {:?}", other),
    }

    let ids: Vec<&str> = layout.albums().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    // No spacers for these ids: albums fill the first band left to right.
    assert_rect(layout.cells[1].rect(), rect(224.0, 0.0, 200.0));
    assert_rect(layout.cells[2].rect(), rect(424.0, 0.0, 200.0));
    assert_rect(layout.cells[3].rect(), rect(624.0, 0.0, 200.0));

    // Tallest column is 2 rows -> 2 * 100 + 100
    assert_eq!(layout.total_height, 300.0);
    assert_eq!(layout.grid_rows(100.0), 2);
}

#[test]
fn test_two_years_start_on_fresh_row() {
    // 648 - 48 = 600 usable -> 6 columns of 100px
    let groups = vec![
        YearGroup::new(1975, albums(&["a"])),
        YearGroup::new(1976, albums(&["b"])),
    ];
    let layout = compute_grid_layout(&groups, 648.0);
    assert_eq!(layout.columns, 6);
    assert_eq!(layout.cells.len(), 4);

    let first_album = layout.cells[1].rect();
    let second_label = layout.cells[2].rect();
    assert_eq!(layout.cells[2].year(), Some(YearKey::Year(1976)));

    // One blank row between the sections.
    assert!(second_label.y >= first_album.bottom() + layout.cell_size - 1e-9);
    assert_rect(second_label, rect(24.0, 300.0, 200.0));
    assert_rect(layout.cells[3].rect(), rect(224.0, 300.0, 200.0));
    assert_eq!(layout.total_height, 600.0);
}

#[test]
fn test_spacer_shifts_next_album() {
    // "ecm-1014" hashes to a low byte of 0, well under the spacer rate.
    let groups = vec![YearGroup::new(1980, albums(&["ecm-1014"]))];
    let layout = compute_grid_layout(&groups, 648.0);

    // Label at col 0, spacer takes (col 2, row 0), album moves to col 3.
    assert_rect(layout.cells[1].rect(), rect(324.0, 0.0, 200.0));
    assert_eq!(layout.cells.len(), 2);
}

#[test]
fn test_spacer_rate_zero_disables_spacers() {
    let packer = GridPacker::new(GridParams {
        spacer_rate: 0.0,
        ..Default::default()
    })
    .unwrap();
    let groups = vec![YearGroup::new(1980, albums(&["ecm-1014"]))];
    let layout = packer.compute(&groups, 648.0);
    assert_rect(layout.cells[1].rect(), rect(224.0, 0.0, 200.0));
}

#[test]
fn test_missing_id_still_lays_out() {
    // Empty id hashes to 0 and always takes a spacer.
    let groups = vec![YearGroup::new(YearKey::Unknown, albums(&["", ""]))];
    let first = compute_grid_layout(&groups, 648.0);
    let second = compute_grid_layout(&groups, 648.0);
    assert_eq!(first.cells.len(), 3);
    assert_eq!(first, second);
    assert_eq!(first.cells[0].year(), Some(YearKey::Unknown));
}

#[rstest]
#[case(800.0)]
#[case(150.0)]
#[case(0.0)]
#[case(-20.0)]
#[case(f64::NAN)]
fn test_empty_groups_give_empty_layout(#[case] width: f64) {
    let groups: Vec<YearGroup<Album>> = Vec::new();
    let layout = compute_grid_layout(&groups, width);
    assert!(layout.is_empty());
    assert_eq!(layout.total_height, 0.0);
}

#[rstest]
#[case(150.0)]
#[case(199.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_narrow_viewport_gives_empty_layout(#[case] width: f64) {
    let groups = vec![YearGroup::new(1975, albums(&["a", "b"]))];
    let layout = compute_grid_layout(&groups, width);
    assert!(layout.cells.is_empty());
    assert_eq!(layout.total_height, 0.0);
}

#[rstest]
#[case(200.0, 6)]
#[case(647.0, 6)]
#[case(848.0, 8)]
#[case(948.0, 8)]
#[case(1048.0, 10)]
#[case(1280.0, 12)]
#[case(1920.0, 18)]
#[case(2560.0, 24)]
fn test_column_count(#[case] width: f64, #[case] expected: usize) {
    let metrics = GridPacker::default().metrics(width).unwrap();
    assert_eq!(metrics.columns, expected);
    assert_eq!(metrics.columns % 2, 0);
    assert!((metrics.cell_size * expected as f64 - (width - 48.0)).abs() < 1e-9);
}

#[rstest]
#[case(1e6)]
#[case(1e15)]
#[case(f64::MAX)]
fn test_huge_viewport_caps_columns(#[case] width: f64) {
    let groups = vec![YearGroup::new(1975, albums(&["a", "b"]))];
    let layout = compute_grid_layout(&groups, width);

    assert_eq!(layout.columns, 256);
    assert_eq!(layout.cells.len(), 3);
    assert!(layout.cell_size.is_finite());
    assert!(layout.total_height.is_finite());
    let ids: Vec<&str> = layout.albums().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_tuned_max_cols_limits_wide_viewports() {
    let packer = GridPacker::new(GridParams {
        max_cols: 8,
        ..Default::default()
    })
    .unwrap();
    // 2560 would give 24 columns untuned.
    let metrics = packer.metrics(2560.0).unwrap();
    assert_eq!(metrics.columns, 8);
    assert!((metrics.cell_size - 2512.0 / 8.0).abs() < 1e-9);
}

#[test]
fn test_cells_scale_with_cell_size() {
    // 1280 - 48 = 1232 -> 12 columns of 102.67px
    let groups = vec![YearGroup::new(2001, albums(&["a", "b"]))];
    let layout = compute_grid_layout(&groups, 1280.0);
    let expected = 1232.0 / 12.0;
    assert!((layout.cell_size - expected).abs() < 1e-9);
    for cell in &layout.cells {
        assert!((cell.rect().w - 2.0 * expected).abs() < 1e-9);
        assert!((cell.rect().h - 2.0 * expected).abs() < 1e-9);
    }
    assert!((layout.total_height - (2.0 * expected + 100.0)).abs() < 1e-9);
}

#[test]
fn test_bottom_margin_is_flat() {
    let packer = GridPacker::new(GridParams {
        bottom_margin: 40.0,
        ..Default::default()
    })
    .unwrap();
    let groups = vec![YearGroup::new(1999, albums(&["a"]))];
    let layout = packer.compute(&groups, 648.0);
    assert_eq!(layout.total_height, 240.0);
    assert_eq!(layout.grid_rows(40.0), 2);
    assert_eq!(LayoutResult::<Album>::empty().grid_rows(40.0), 0);
}

#[test]
fn test_wraps_to_next_band_when_row_is_full() {
    // 6 columns: label + 2 albums fill the first band, the third wraps.
    let groups = vec![YearGroup::new(1990, albums(&["a", "b", "c"]))];
    let layout = compute_grid_layout(&groups, 648.0);
    assert_rect(layout.cells[3].rect(), rect(24.0, 200.0, 200.0));
    assert_eq!(layout.total_height, 500.0);
    assert_eq!(layout.grid_rows(100.0), 4);
}

#[test]
fn test_groups_are_not_resorted() {
    let groups = vec![
        YearGroup::new(1970, albums(&["a"])),
        YearGroup::new(2020, albums(&["b"])),
        YearGroup::new(YearKey::Unknown, albums(&["c"])),
        YearGroup::new(1985, albums(&["d"])),
    ];
    let layout = compute_grid_layout(&groups, 1048.0);
    let years: Vec<YearKey> = layout.cells.iter().filter_map(|c| c.year()).collect();
    assert_eq!(
        years,
        vec![
            YearKey::Year(1970),
            YearKey::Year(2020),
            YearKey::Unknown,
            YearKey::Year(1985)
        ]
    );
}

#[test]
fn test_empty_year_group_still_gets_label() {
    let groups = vec![
        YearGroup::new(1975, albums(&[])),
        YearGroup::new(1976, albums(&["a"])),
    ];
    let layout = compute_grid_layout(&groups, 648.0);
    assert_eq!(layout.cells.len(), 3);
    match &layout.cells[0] {
        Cell::Year { count, .. } => assert_eq!(*count, 0),
        other => panic!("expected year label, got {:?}", other),
    }
    // Label occupies rows 0-1, reset lands the next section on row 3.
    assert_rect(layout.cells[1].rect(), rect(24.0, 300.0, 200.0));
}

#[test]
fn test_layout_json_shape() {
    let groups = vec![YearGroup::new(1975, albums(&["a"]))];
    let layout = compute_grid_layout(&groups, 1048.0);
    let json = serde_json::to_value(&layout).unwrap();

    assert_eq!(json["totalHeight"], 300.0);
    assert_eq!(json["cellSize"], 100.0);
    assert_eq!(json["cells"][0]["type"], "year");
    assert_eq!(json["cells"][0]["year"], 1975);
    assert_eq!(json["cells"][0]["count"], 1);
    assert_eq!(json["cells"][0]["x"], 24.0);
    assert_eq!(json["cells"][1]["type"], "album");
    assert_eq!(json["cells"][1]["album"]["id"], "a");
    assert_eq!(json["cells"][1]["w"], 200.0);
}
