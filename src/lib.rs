pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hashing;
pub mod layout;
pub mod synth;
pub mod viewports;
// cmd and reports are modules of the binary crate (main.rs).

pub use catalog::{Album, Catalog, YearGroup, YearKey};
pub use config::GridParams;
pub use error::{GridError, GridResult};
pub use layout::{compute_grid_layout, Cell, GridPacker, LayoutResult, Rect, Tile};
