//! Skyline-packed year grid.
//!
//! Every year section starts with a square label tile followed by its album
//! tiles, all packed left to right into the shallowest free span. Some albums
//! are preceded by an invisible one-unit spacer, chosen from the album id so
//! the same catalog always renders the same gaps. A new year always starts on
//! a fresh row below the previous section.
//!
//! The output is plain geometry in CSS pixels; how the tiles are drawn is up
//! to the caller.

pub mod skyline;

use crate::catalog::{YearGroup, YearKey};
use crate::config::GridParams;
use crate::error::GridResult;
use crate::hashing::wants_spacer;
use serde::Serialize;
use skyline::{HeightMap, Placement};
use tracing::debug;

/// Anything with a stable id can be laid out as a tile.
pub trait Tile {
    fn tile_id(&self) -> &str;
}

impl Tile for str {
    fn tile_id(&self) -> &str {
        self
    }
}

impl Tile for String {
    fn tile_id(&self) -> &str {
        self
    }
}

impl<T: Tile + ?Sized> Tile for &T {
    fn tile_id(&self) -> &str {
        (**self).tile_id()
    }
}

/// Tolerance for comparing pixel edges that went through float scaling.
const EDGE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// True when the interiors intersect. Shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - EDGE_EPSILON
            && other.x < self.right() - EDGE_EPSILON
            && self.y < other.bottom() - EDGE_EPSILON
            && other.y < self.bottom() - EDGE_EPSILON
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cell<'a, A> {
    Year {
        #[serde(flatten)]
        rect: Rect,
        year: YearKey,
        count: usize,
    },
    Album {
        #[serde(flatten)]
        rect: Rect,
        album: &'a A,
    },
}

impl<'a, A> Cell<'a, A> {
    pub fn rect(&self) -> &Rect {
        match self {
            Cell::Year { rect, .. } | Cell::Album { rect, .. } => rect,
        }
    }

    pub fn album(&self) -> Option<&'a A> {
        match self {
            Cell::Album { album, .. } => Some(*album),
            Cell::Year { .. } => None,
        }
    }

    pub fn year(&self) -> Option<YearKey> {
        match self {
            Cell::Year { year, .. } => Some(*year),
            Cell::Album { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult<'a, A> {
    pub cells: Vec<Cell<'a, A>>,
    pub total_height: f64,
    pub cell_size: f64,
    pub columns: usize,
}

impl<'a, A> LayoutResult<'a, A> {
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            total_height: 0.0,
            cell_size: 0.0,
            columns: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn albums(&self) -> impl Iterator<Item = &'a A> + '_ {
        self.cells.iter().filter_map(|c| c.album())
    }

    /// Grid rows covered by cells or spacers, leaving out the flat margin
    /// that `total_height` carries below them.
    pub fn grid_rows(&self, bottom_margin: f64) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.row_of((self.total_height - bottom_margin).max(0.0))
    }

    /// Converts a pixel offset back to the grid row it starts on.
    pub fn row_of(&self, y: f64) -> usize {
        if self.cell_size > 0.0 {
            (y / self.cell_size).round() as usize
        } else {
            0
        }
    }
}

/// Column layout derived from a viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub columns: usize,
    /// Rendered edge of one grid unit. Usually differs from the nominal
    /// `cell_unit` because the column count is rounded.
    pub cell_size: f64,
    pub usable_width: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GridPacker {
    params: GridParams,
}

impl GridPacker {
    pub fn new(params: GridParams) -> GridResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    /// `None` when the viewport is too narrow (or not a number) to lay out.
    pub fn metrics(&self, viewport_width: f64) -> Option<GridMetrics> {
        let p = &self.params;
        if !viewport_width.is_finite() || viewport_width < p.min_viewport_width {
            return None;
        }

        let usable_width = viewport_width - 2.0 * p.padding;
        if usable_width <= 0.0 {
            return None;
        }

        // `as` saturates, so absurd widths land on max_cols below.
        let mut columns = (usable_width / p.cell_unit).floor() as usize;
        if columns % 2 != 0 {
            columns -= 1;
        }
        let columns = columns.clamp(p.min_cols, p.max_cols);

        Some(GridMetrics {
            columns,
            cell_size: usable_width / columns as f64,
            usable_width,
        })
    }

    /// Lays out `groups` in the given order for a viewport `viewport_width`
    /// pixels wide. Never fails: no groups or a too-narrow viewport give an
    /// empty layout.
    pub fn compute<'a, A: Tile>(
        &self,
        groups: &'a [YearGroup<A>],
        viewport_width: f64,
    ) -> LayoutResult<'a, A> {
        if groups.is_empty() {
            return LayoutResult::empty();
        }
        let Some(metrics) = self.metrics(viewport_width) else {
            return LayoutResult::empty();
        };

        let span = self.params.tile_span;
        let padding = self.params.padding;
        let cell_size = metrics.cell_size;
        let tile_px = cell_size * span as f64;
        let rect_at = |p: Placement| Rect {
            x: padding + p.col as f64 * cell_size,
            y: p.row as f64 * cell_size,
            w: tile_px,
            h: tile_px,
        };

        let mut heights = HeightMap::new(metrics.columns);
        let mut cells = Vec::with_capacity(groups.iter().map(|g| g.albums.len() + 1).sum());
        let mut spacers = 0usize;

        for (index, group) in groups.iter().enumerate() {
            if index > 0 {
                heights.level();
            }

            let label = heights.find_placement(span);
            heights.mark(label, span, span);
            cells.push(Cell::Year {
                rect: rect_at(label),
                year: group.year,
                count: group.albums.len(),
            });

            for album in &group.albums {
                if wants_spacer(album.tile_id(), self.params.spacer_rate) {
                    let gap = heights.find_placement(1);
                    heights.mark(gap, 1, 1);
                    spacers += 1;
                }

                let slot = heights.find_placement(span);
                heights.mark(slot, span, span);
                cells.push(Cell::Album {
                    rect: rect_at(slot),
                    album,
                });
            }
        }

        let total_height = heights.max_row() as f64 * cell_size + self.params.bottom_margin;

        debug!(
            "Packed {} groups into {} cells ({} spacers) over {} columns, height {:.1}px",
            groups.len(),
            cells.len(),
            spacers,
            metrics.columns,
            total_height
        );

        LayoutResult {
            cells,
            total_height,
            cell_size,
            columns: metrics.columns,
        }
    }
}

/// [`GridPacker::compute`] with the default tuning.
pub fn compute_grid_layout<A: Tile>(
    groups: &[YearGroup<A>],
    viewport_width: f64,
) -> LayoutResult<'_, A> {
    GridPacker::default().compute(groups, viewport_width)
}
