use anyhow::Result;
use quakeviz::{Crs, Document, DocumentKind, fetch_fault_lines_from, render_fault_overlay, visualize_clusters_on_fault_lines};

use super::{load_catalog, plot_options};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::FaultsArgs) -> Result<()> {
    let catalog = load_catalog(cli, &args.common.input)?;
    let options = plot_options(cli, &args.common);

    let Some(url) = &args.url else {
        return visualize_clusters_on_fault_lines(&catalog, &args.crs, &args.common.cluster, &options);
    };

    let crs = Crs::parse(&args.crs)?;
    let faults = fetch_fault_lines_from(url, cli.verbose)?;
    let body = render_fault_overlay(&catalog, &crs, &args.common.cluster, &faults, &options)?;
    Document::new(DocumentKind::Svg, body).emit(&options)
}
