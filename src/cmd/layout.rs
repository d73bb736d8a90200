use crate::reports;
use clap::Args;
use discogrid::api;
use discogrid::config::GridParams;
use discogrid::error::GridResult;
use discogrid::layout::GridPacker;
use std::fs::{self, File};
use std::io;
use strum_macros::{Display, EnumString};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub grid: GridParams,

    /// Catalog JSON, or a pre-grouped `[{ year, albums }]` array.
    #[arg(short, long)]
    pub catalog: String,

    /// Viewport width in pixels.
    #[arg(short, long)]
    pub width: f64,

    /// Only lay out albums credited to this artist id.
    #[arg(short, long)]
    pub artist: Option<String>,

    #[arg(short, long, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(args: &LayoutArgs, packer: &GridPacker) -> GridResult<()> {
    info!("📂 Loading catalog: {}", args.catalog);
    let groups = api::load_year_groups(&args.catalog, args.artist.as_deref())?;

    let layout = packer.compute(&groups, args.width);
    if layout.is_empty() {
        warn!(
            "⚠️  Empty layout: {} year groups at {}px (minimum {}px)",
            groups.len(),
            args.width,
            packer.params().min_viewport_width
        );
    } else {
        info!(
            "📐 {} columns x {:.1}px, {} cells, {:.0}px tall",
            layout.columns,
            layout.cell_size,
            layout.cells.len(),
            layout.total_height
        );
    }

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&layout)?;
            match &args.output {
                Some(path) => {
                    fs::write(path, json)?;
                    info!("💾 Saved layout to {}", path);
                }
                None => println!("{}", json),
            }
        }
        OutputFormat::Csv => match &args.output {
            Some(path) => {
                api::write_cells_csv(File::create(path)?, &layout)?;
                info!("💾 Saved cells to {}", path);
            }
            None => api::write_cells_csv(io::stdout().lock(), &layout)?,
        },
        OutputFormat::Table => {
            if args.output.is_some() {
                warn!("⚠️  --output is ignored for table output");
            }
            reports::print_layout_summary(&layout, packer.params().bottom_margin);
            reports::print_cell_table(&layout);
        }
    }

    Ok(())
}
