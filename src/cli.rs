use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Precinct graph builder CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "precinct-graph", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the border-adjacency graph and split it into districts
    Build(BuildArgs),

    /// Emit the downstream viewer payload from a cached graph
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input records: JSON array of {id, properties, geometry}
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output graph cache file
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Coarsening target node count (0 = no coarsening)
    #[arg(long, default_value_t = 0)]
    pub pieces: usize,

    /// Number of districts to grow
    #[arg(long, default_value_t = 1)]
    pub districts: u32,

    /// RNG seed; omit for a nondeterministic run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rebuild even if the output cache already exists
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Cached graph file produced by `build`
    #[arg(value_hint = ValueHint::FilePath)]
    pub graph: PathBuf,

    /// Output payload file
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}
