/// Top-left grid coordinate of a placed item, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub col: usize,
    pub row: usize,
}

/// Per-column "next free row" of one packing pass.
///
/// `heights[c]` is the smallest row index not yet covered in column `c`.
/// Holes left under a raised column are never back-filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    heights: Vec<usize>,
}

impl HeightMap {
    pub fn new(columns: usize) -> Self {
        Self {
            heights: vec![0; columns],
        }
    }

    pub fn columns(&self) -> usize {
        self.heights.len()
    }

    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    pub fn max_row(&self) -> usize {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Shallowest span of `width` contiguous columns; the leftmost wins a tie.
    /// Widths wider than the map are clamped to the full width.
    pub fn find_placement(&self, width: usize) -> Placement {
        let width = width.clamp(1, self.heights.len().max(1));
        self.heights
            .windows(width)
            .enumerate()
            .map(|(col, span)| Placement {
                col,
                row: span.iter().copied().max().unwrap_or(0),
            })
            // min_by_key keeps the first of equal minima
            .min_by_key(|p| p.row)
            .unwrap_or(Placement { col: 0, row: 0 })
    }

    /// Raises columns `[col, col + width)` to `row + height`.
    pub fn mark(&mut self, at: Placement, width: usize, height: usize) {
        for h in self.heights.iter_mut().skip(at.col).take(width) {
            *h = at.row + height;
        }
    }

    /// Flattens the skyline one empty row below its highest point.
    pub fn level(&mut self) {
        let next = self.max_row() + 1;
        self.heights.fill(next);
    }
}
