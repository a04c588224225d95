use anyhow::Result;
use quakeviz::visualize_3d_static;

use super::{load_catalog, plot_options};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::Scatter3dArgs) -> Result<()> {
    let catalog = load_catalog(cli, &args.common.input)?;
    visualize_3d_static(&catalog, &args.common.cluster, &plot_options(cli, &args.common))
}
