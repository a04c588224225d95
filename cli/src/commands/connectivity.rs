use anyhow::{Result, bail};
use quakeviz::{Adjacency, visualize_graph_connectivity};

use super::{load_catalog, plot_options};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ConnectivityArgs) -> Result<()> {
    let catalog = load_catalog(cli, &args.common.input)?;

    let adjacency = match (&args.edges, &args.dense) {
        (Some(path), None) => Adjacency::read_edge_list(path, catalog.len())?,
        (None, Some(path)) => Adjacency::read_dense(path)?,
        _ => bail!("[connectivity] pass exactly one of --edges or --dense"),
    };
    if cli.verbose > 1 {
        let (rows, cols) = adjacency.shape();
        eprintln!("[connectivity] adjacency is {rows}x{cols}");
    }

    visualize_graph_connectivity(&catalog, &adjacency, &args.common.cluster, args.save, &plot_options(cli, &args.common))
}
