use clap::Args;
use discogrid::error::GridResult;
use discogrid::synth::{self, SynthParams};
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SynthArgs {
    #[arg(long, default_value_t = 1_500)]
    pub albums: usize,
    #[arg(long, default_value_t = 300)]
    pub artists: usize,
    #[arg(long, default_value_t = 1969)]
    pub first_year: i32,
    #[arg(long, default_value_t = 2024)]
    pub last_year: i32,
    #[arg(long, default_value_t = 0.03)]
    pub unknown_rate: f32,
    #[arg(short = 'S', long, default_value_t = 1064)]
    pub seed: u64,

    #[arg(short, long)]
    pub output: String,
}

pub fn run(args: &SynthArgs) -> GridResult<()> {
    let params = SynthParams {
        albums: args.albums,
        artists: args.artists,
        first_year: args.first_year,
        last_year: args.last_year,
        unknown_rate: args.unknown_rate,
        seed: args.seed,
    };

    info!("🎲 Generating {} albums (seed {})", params.albums, params.seed);
    let catalog = synth::generate(&params);
    fs::write(&args.output, serde_json::to_string_pretty(&catalog)?)?;
    info!("💾 Saved catalog to {}", args.output);
    Ok(())
}
