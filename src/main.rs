use anyhow::Result;
use clap::Parser;

use precinct_graph::cli::{Cli, Commands};
use precinct_graph::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Build(args) => commands::build(&cli, args),
        Commands::Export(args) => commands::export(&cli, args),
    }
}
