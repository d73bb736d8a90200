use crate::reports;
use clap::Args;
use discogrid::api;
use discogrid::config::GridParams;
use discogrid::error::{GridError, GridResult};
use discogrid::layout::GridPacker;
use discogrid::viewports::{all_preset_widths, parse_widths};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PrecomputeArgs {
    #[command(flatten)]
    pub grid: GridParams,

    #[arg(short, long)]
    pub catalog: String,

    /// Comma separated preset names and/or pixel widths. Defaults to every preset.
    #[arg(long)]
    pub widths: Option<String>,

    #[arg(short, long)]
    pub artist: Option<String>,

    #[arg(short, long, default_value = "static/data")]
    pub out_dir: String,
}

pub fn run(args: &PrecomputeArgs, packer: &GridPacker) -> GridResult<()> {
    let widths = match &args.widths {
        Some(list) => parse_widths(list).map_err(GridError::Config)?,
        None => all_preset_widths(),
    };
    if widths.is_empty() {
        return Err(GridError::Config("No viewport widths given".to_string()));
    }

    info!("📂 Loading catalog: {}", args.catalog);
    let groups = api::load_year_groups(&args.catalog, args.artist.as_deref())?;

    info!("🧮 Packing {} viewports in parallel...", widths.len());
    let start = Instant::now();
    let layouts = api::precompute_layouts(packer, &groups, &widths);
    info!("    Done in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    let out_dir = Path::new(&args.out_dir);
    fs::create_dir_all(out_dir)?;
    for (width, layout) in widths.iter().zip(&layouts) {
        let path = out_dir.join(format!("grid-layout-{}.json", width));
        api::write_layout_json(&path, layout)?;
        let size = fs::metadata(&path)?.len();
        info!("✓ Saved {} ({:.1} KB)", path.display(), size as f64 / 1024.0);
    }

    reports::print_precompute_report(&widths, &layouts);
    Ok(())
}
