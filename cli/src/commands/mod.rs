pub mod connectivity;
pub mod faults;
pub mod scatter3d;
pub mod scatter3d_static;
pub mod silhouette;

use std::path::Path;

use anyhow::Result;
use quakeviz::{Catalog, PlotOptions};

use crate::cli::{Cli, CommonArgs};

/// Load the input catalog named on the command line.
pub(crate) fn load_catalog(cli: &Cli, input: &Path) -> Result<Catalog> {
    if cli.verbose > 0 { eprintln!("[quakeviz] reading catalog from {}", input.display()); }
    let catalog = Catalog::read_csv(input)?;
    if cli.verbose > 1 { eprintln!("[quakeviz] {} events", catalog.len()); }
    Ok(catalog)
}

/// Plot options from the global flags and the `--output` argument.
pub(crate) fn plot_options(cli: &Cli, common: &CommonArgs) -> PlotOptions {
    let options = PlotOptions::default().with_verbose(cli.verbose);
    match &common.output {
        Some(path) => options.save_to(path),
        None => options,
    }
}
