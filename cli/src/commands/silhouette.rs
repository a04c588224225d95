use anyhow::Result;
use quakeviz::report_silhouette_score;

use super::load_catalog;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::SilhouetteArgs) -> Result<()> {
    let catalog = load_catalog(cli, &args.input)?;

    let columns = args.features.iter().map(|s| s.trim()).collect::<Vec<_>>();
    let features = catalog.features(&columns)?;

    report_silhouette_score(features.view(), &catalog, &args.cluster)
}
