use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use discogrid::catalog::Artist;
use discogrid::layout::{Cell as GridCell, LayoutResult, Tile};

const HISTOGRAM_BAR_WIDTH: usize = 40;

fn right_align(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_layout_summary<A>(layout: &LayoutResult<'_, A>, bottom_margin: f64) {
    let years = layout.cells.iter().filter(|c| c.year().is_some()).count();
    let albums = layout.cells.len() - years;
    let rows = layout.grid_rows(bottom_margin);

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Columns").add_attribute(Attribute::Bold),
        Cell::new(layout.columns),
    ]);
    table.add_row(vec![
        Cell::new("Cell size").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}px", layout.cell_size)),
    ]);
    table.add_row(vec![
        Cell::new("Year labels").add_attribute(Attribute::Bold),
        Cell::new(years),
    ]);
    table.add_row(vec![
        Cell::new("Albums").add_attribute(Attribute::Bold),
        Cell::new(albums),
    ]);
    table.add_row(vec![
        Cell::new("Total height").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.0}px ({} rows)", layout.total_height, rows)).fg(Color::Cyan),
    ]);
    right_align(&mut table, 1..=1);
    println!("\n{}", table);
}

pub fn print_cell_table<A: Tile>(layout: &LayoutResult<'_, A>) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Row"),
        Cell::new("X"),
        Cell::new("Y"),
        Cell::new("Size"),
    ]);
    right_align(&mut table, 2..=5);

    for cell in &layout.cells {
        let r = cell.rect();
        let (kind, label) = match cell {
            GridCell::Year { year, count, .. } => (
                Cell::new("year").fg(Color::Yellow),
                Cell::new(format!("{} ({})", year, count)).add_attribute(Attribute::Bold),
            ),
            GridCell::Album { album, .. } => (Cell::new("album"), Cell::new(album.tile_id())),
        };
        table.add_row(vec![
            kind,
            label,
            Cell::new(layout.row_of(r.y)),
            Cell::new(format!("{:.1}", r.x)),
            Cell::new(format!("{:.1}", r.y)),
            Cell::new(format!("{:.1}", r.w)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_precompute_report<A>(widths: &[f64], layouts: &[LayoutResult<'_, A>]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Viewport").add_attribute(Attribute::Bold),
        Cell::new("Cols"),
        Cell::new("Cell"),
        Cell::new("Cells"),
        Cell::new("Height").fg(Color::Cyan),
    ]);
    right_align(&mut table, 0..=4);

    for (width, layout) in widths.iter().zip(layouts) {
        table.add_row(vec![
            Cell::new(format!("{}px", width)).add_attribute(Attribute::Bold),
            Cell::new(layout.columns),
            Cell::new(format!("{:.1}", layout.cell_size)),
            Cell::new(layout.cells.len()),
            Cell::new(format!("{:.0}", layout.total_height)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_year_histogram(histogram: &[(i32, usize)]) {
    let peak = histogram.iter().map(|(_, n)| *n).max().unwrap_or(0);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Albums"),
        Cell::new(""),
    ]);
    right_align(&mut table, 1..=1);

    for (year, count) in histogram {
        let bar_len = if peak > 0 {
            (count * HISTOGRAM_BAR_WIDTH).div_ceil(peak)
        } else {
            0
        };
        table.add_row(vec![
            Cell::new(year).add_attribute(Attribute::Bold),
            Cell::new(count),
            Cell::new("#".repeat(bar_len)).fg(Color::Green),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_top_artists(ranked: &[(&Artist, usize)], top: usize) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Artist").add_attribute(Attribute::Bold),
        Cell::new("Id"),
        Cell::new("Albums").fg(Color::Cyan),
    ]);
    right_align(&mut table, 3..=3);

    for (rank, (artist, count)) in ranked.iter().take(top).enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&artist.name).add_attribute(Attribute::Bold),
            Cell::new(&artist.id),
            Cell::new(count).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}
