//! Cluster views over an earthquake catalog.
//!
//! Each view has a `render_*` function returning the document text and a
//! `visualize_*` wrapper that sends it to [`PlotOptions::output`].

mod connectivity;
mod faults;
mod layout;
mod options;
mod scatter3d;
mod static3d;

pub use connectivity::{render_connectivity_svg, save_graph_connectivity, visualize_graph_connectivity};
pub use faults::render_fault_overlay;
#[cfg(feature = "download")]
pub use faults::visualize_clusters_on_fault_lines;
pub use options::{CONNECTIVITY_FILE, Document, DocumentKind, Output, PlotOptions};
pub use scatter3d::{render_3d_html, visualize_3d};
pub use static3d::{render_3d_static_svg, visualize_3d_static};
