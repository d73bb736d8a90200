use crate::reports;
use clap::Args;
use discogrid::catalog::{Catalog, YearKey};
use discogrid::error::GridResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[arg(short, long)]
    pub catalog: String,

    /// How many artists to list.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub fn run(args: &StatsArgs) -> GridResult<()> {
    info!("📂 Loading catalog: {}", args.catalog);
    let catalog = Catalog::load_from_file(&args.catalog)?;

    let undated = catalog
        .albums
        .iter()
        .filter(|a| a.year_key() == YearKey::Unknown)
        .count();
    info!(
        "    Albums: {} ({} undated), Artists: {}, Credits: {}",
        catalog.albums.len(),
        undated,
        catalog.artists.len(),
        catalog.credits.len()
    );

    reports::print_year_histogram(&catalog.year_histogram());

    let ranked = catalog.artists_by_album_count();
    if ranked.is_empty() {
        info!("No credited artists in catalog.");
    } else {
        reports::print_top_artists(&ranked, args.top);
    }
    Ok(())
}
