use std::path::PathBuf;

/// Earthquake cluster plotting CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "quakeviz-cli", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Interactive 3D scatter (HTML), sized by magnitude
    Scatter3d(Scatter3dArgs),

    /// Static 3D scatter (SVG) with a cluster colorbar
    #[command(name = "scatter3d-static")]
    Scatter3dStatic(Scatter3dArgs),

    /// Spatial graph edges under the cluster scatter (SVG)
    Connectivity(ConnectivityArgs),

    /// Print the silhouette score of a cluster column
    Silhouette(SilhouetteArgs),

    /// Clusters overlaid on the GEM global active faults (SVG)
    Faults(FaultsArgs),
}

/// Arguments every view takes.
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Input catalog CSV (longitude, latitude, depth, mag/magnitude, id, place, cluster labels)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Cluster label column
    #[arg(short, long, default_value = "cluster")]
    pub cluster: String,

    /// Save the figure to this file instead of opening it
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct Scatter3dArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(clap::Args, Debug)]
pub struct ConnectivityArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Sparse adjacency as an edge-list CSV (row,col[,weight])
    #[arg(long, value_hint = clap::ValueHint::FilePath, conflicts_with = "dense", required_unless_present = "dense")]
    pub edges: Option<PathBuf>,

    /// Dense adjacency as a headerless N x N CSV
    #[arg(long, value_hint = clap::ValueHint::FilePath, required_unless_present = "edges")]
    pub dense: Option<PathBuf>,

    /// Write spatial_graph_connectivity.svg to the current directory
    #[arg(long)]
    pub save: bool,
}

#[derive(clap::Args, Debug)]
pub struct SilhouetteArgs {
    /// Input catalog CSV
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Cluster label column
    #[arg(short, long, default_value = "cluster")]
    pub cluster: String,

    /// Comma-separated numeric feature columns
    #[arg(short, long, value_delimiter = ',', default_value = "longitude,latitude,depth")]
    pub features: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct FaultsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// CRS of the longitude/latitude columns (EPSG:<code> or a PROJ.4 string)
    #[arg(long, default_value = "EPSG:4326")]
    pub crs: String,

    /// Fault-line GeoJSON URL, defaults to the GEM global active faults
    #[arg(long)]
    pub url: Option<String>,
}
