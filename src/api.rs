use crate::catalog::{Album, Catalog, YearGroup};
use crate::error::{GridError, GridResult};
use crate::layout::{Cell, GridPacker, LayoutResult, Tile};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Reads grid input from JSON. Accepts either a full catalog object
/// (`{ albums, credits, artists }`), which is filtered and grouped here, or
/// an already grouped `[{ year, albums }]` array, which is used as is.
pub fn load_year_groups<P: AsRef<Path>>(
    path: P,
    artist: Option<&str>,
) -> GridResult<Vec<YearGroup<Album>>> {
    let content = fs::read_to_string(path.as_ref())?;
    let value: Value = serde_json::from_str(&content)?;

    match value {
        Value::Array(_) => {
            if artist.is_some() {
                warn!("Input is pre-grouped; artist filter ignored");
            }
            let groups: Vec<YearGroup<Album>> = serde_json::from_value(value)?;
            Ok(groups)
        }
        Value::Object(_) => {
            let catalog: Catalog = serde_json::from_value(value)?;
            catalog.validate()?;
            info!(
                "Catalog: {} albums, {} artists, {} credits",
                catalog.albums.len(),
                catalog.artists.len(),
                catalog.credits.len()
            );
            if let Some(id) = artist {
                if !catalog.artists.is_empty() && !catalog.artists.iter().any(|a| a.id == id) {
                    return Err(GridError::Validation(format!("Unknown artist id '{}'", id)));
                }
            }
            Ok(catalog
                .year_groups(artist)
                .iter()
                .map(|g| g.to_owned_albums())
                .collect())
        }
        _ => Err(GridError::Validation(
            "Expected a catalog object or an array of year groups".to_string(),
        )),
    }
}

/// One layout per width, computed in parallel and returned in `widths` order.
pub fn precompute_layouts<'a, A>(
    packer: &GridPacker,
    groups: &'a [YearGroup<A>],
    widths: &[f64],
) -> Vec<LayoutResult<'a, A>>
where
    A: Tile + Sync,
{
    widths
        .par_iter()
        .map(|&w| packer.compute(groups, w))
        .collect()
}

pub fn write_layout_json<P, A>(path: P, layout: &LayoutResult<'_, A>) -> GridResult<()>
where
    P: AsRef<Path>,
    A: Serialize,
{
    let json = serde_json::to_string(layout)?;
    fs::write(path, json)?;
    Ok(())
}

/// Flat row of the CSV export: one line per cell.
#[derive(Debug, Serialize)]
struct CellRecord<'a> {
    kind: &'static str,
    label: &'a str,
    count: Option<usize>,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

pub fn write_cells_csv<W, A>(writer: W, layout: &LayoutResult<'_, A>) -> GridResult<()>
where
    W: Write,
    A: Tile,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for cell in &layout.cells {
        let r = cell.rect();
        match cell {
            Cell::Year { year, count, .. } => {
                let label = year.to_string();
                wtr.serialize(CellRecord {
                    kind: "year",
                    label: &label,
                    count: Some(*count),
                    x: r.x,
                    y: r.y,
                    w: r.w,
                    h: r.h,
                })?;
            }
            Cell::Album { album, .. } => {
                wtr.serialize(CellRecord {
                    kind: "album",
                    label: album.tile_id(),
                    count: None,
                    x: r.x,
                    y: r.y,
                    w: r.w,
                    h: r.h,
                })?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}
