use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use discogrid::config::GridParams;
use discogrid::error::GridResult;
use discogrid::layout::GridPacker;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with grid parameters. Flags given on the command line win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack a catalog into grid cells for one viewport width.
    Layout(cmd::layout::LayoutArgs),
    /// Pack a catalog for several viewport widths and write one file per width.
    Precompute(cmd::precompute::PrecomputeArgs),
    /// Year histogram and most credited artists of a catalog.
    Stats(cmd::stats::StatsArgs),
    /// Write a reproducible synthetic catalog.
    Synth(cmd::synth::SynthArgs),
}

fn resolve_packer(
    config_path: Option<&str>,
    cli_params: &GridParams,
    sub_matches: Option<&ArgMatches>,
) -> GridResult<GridPacker> {
    let params = match config_path {
        Some(path) => {
            info!("⚙️  Loading grid params from: {}", path);
            let mut file_params = GridParams::load_from_file(path)?;
            if let Some(matches) = sub_matches {
                file_params.merge_from_cli(cli_params, matches);
            }
            file_params
        }
        None => cli_params.clone(),
    };
    GridPacker::new(params)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    let result = match &cli.command {
        Commands::Layout(args) => resolve_packer(
            config_path,
            &args.grid,
            matches.subcommand_matches("layout"),
        )
        .and_then(|packer| cmd::layout::run(args, &packer)),
        Commands::Precompute(args) => resolve_packer(
            config_path,
            &args.grid,
            matches.subcommand_matches("precompute"),
        )
        .and_then(|packer| cmd::precompute::run(args, &packer)),
        Commands::Stats(args) => cmd::stats::run(args),
        Commands::Synth(args) => cmd::synth::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
