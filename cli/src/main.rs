mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{connectivity, faults, scatter3d, scatter3d_static, silhouette};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Scatter3d(args) => scatter3d::run(&cli, args),
        Commands::Scatter3dStatic(args) => scatter3d_static::run(&cli, args),
        Commands::Connectivity(args) => connectivity::run(&cli, args),
        Commands::Silhouette(args) => silhouette::run(&cli, args),
        Commands::Faults(args) => faults::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
