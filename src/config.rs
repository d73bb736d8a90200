use crate::error::{GridError, GridResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Smallest accepted grid unit, in CSS pixels.
pub const MIN_CELL_UNIT: f64 = 1.0;

/// Tuning knobs of the grid packer. All sizes are in CSS pixels.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridParams {
    /// Nominal width of one grid unit before scaling to the viewport.
    #[arg(long, default_value_t = 100.0)]
    pub cell_unit: f64,

    /// Lower bound on the column count. Must be even.
    #[arg(long, default_value_t = 6)]
    pub min_cols: usize,

    /// Upper bound on the column count. Must be even. Wider viewports get
    /// larger cells instead of more columns.
    #[arg(long, default_value_t = 256)]
    pub max_cols: usize,

    /// Share of albums preceded by an invisible 1x1 spacer.
    #[arg(long, default_value_t = 0.15)]
    pub spacer_rate: f64,

    /// Horizontal padding on each side of the grid.
    #[arg(long, default_value_t = 24.0)]
    pub padding: f64,

    /// Viewports narrower than this produce an empty layout.
    #[arg(long, default_value_t = 200.0)]
    pub min_viewport_width: f64,

    /// Flat space added below the tallest column.
    #[arg(long, default_value_t = 100.0)]
    pub bottom_margin: f64,

    /// Edge length, in grid units, of year labels and album tiles.
    #[arg(long, default_value_t = 2)]
    pub tile_span: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cell_unit: 100.0,
            min_cols: 6,
            max_cols: 256,
            spacer_rate: 0.15,
            padding: 24.0,
            min_viewport_width: 200.0,
            bottom_margin: 100.0,
            tile_span: 2,
        }
    }
}

impl GridParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GridResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GridError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let params: GridParams = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> GridResult<()> {
        if !self.cell_unit.is_finite() || self.cell_unit < MIN_CELL_UNIT {
            return Err(GridError::Config(format!(
                "cell_unit must be at least {}px, got {}",
                MIN_CELL_UNIT, self.cell_unit
            )));
        }
        if !(0.0..=1.0).contains(&self.spacer_rate) {
            return Err(GridError::Config(format!(
                "spacer_rate must lie in [0, 1], got {}",
                self.spacer_rate
            )));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(GridError::Config(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        if !self.bottom_margin.is_finite() || self.bottom_margin < 0.0 {
            return Err(GridError::Config(format!(
                "bottom_margin must be non-negative, got {}",
                self.bottom_margin
            )));
        }
        if self.min_viewport_width.is_nan() {
            return Err(GridError::Config(
                "min_viewport_width must be a number".to_string(),
            ));
        }
        if self.tile_span == 0 {
            return Err(GridError::Config("tile_span must be at least 1".to_string()));
        }
        if self.min_cols % 2 != 0 {
            return Err(GridError::Config(format!(
                "min_cols must be even, got {}",
                self.min_cols
            )));
        }
        if self.min_cols < self.tile_span {
            return Err(GridError::Config(format!(
                "min_cols ({}) must fit at least one tile of span {}",
                self.min_cols, self.tile_span
            )));
        }
        if self.max_cols % 2 != 0 || self.max_cols < self.min_cols {
            return Err(GridError::Config(format!(
                "max_cols must be even and at least min_cols ({}), got {}",
                self.min_cols, self.max_cols
            )));
        }
        Ok(())
    }

    /// Copies onto `self` only the flags the user typed; defaults filled in by
    /// clap leave the file-loaded values alone.
    pub fn merge_from_cli(&mut self, cli_params: &GridParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field;
                }
            };
        }

        update_if_present!(cell_unit);
        update_if_present!(min_cols);
        update_if_present!(max_cols);
        update_if_present!(spacer_rate);
        update_if_present!(padding);
        update_if_present!(min_viewport_width);
        update_if_present!(bottom_margin);
        update_if_present!(tile_span);
    }
}
