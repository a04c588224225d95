#![doc = "quakeviz public API"]
mod catalog;
mod common;
mod geom;
mod graph;
mod io;
mod metrics;
mod plot;

#[doc(inline)]
pub use catalog::{Catalog, ClusterLabels};

#[doc(inline)]
pub use graph::{Adjacency, CsrMatrix, SpatialGraph};

#[doc(inline)]
pub use geom::{Crs, FaultLines, GEM_ACTIVE_FAULTS_URL};

#[cfg(feature = "download")]
#[doc(inline)]
pub use geom::{fetch_fault_lines, fetch_fault_lines_from};

#[doc(inline)]
pub use metrics::{report_silhouette_score, silhouette_samples, silhouette_score, write_silhouette_score};

#[doc(inline)]
pub use plot::{
    CONNECTIVITY_FILE, Document, DocumentKind, Output, PlotOptions,
    render_3d_html, render_3d_static_svg, render_connectivity_svg, render_fault_overlay,
    save_graph_connectivity, visualize_3d, visualize_3d_static, visualize_graph_connectivity,
};

#[cfg(feature = "download")]
#[doc(inline)]
pub use plot::visualize_clusters_on_fault_lines;
