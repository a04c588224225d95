mod adjacency;
mod graph;

pub use adjacency::{Adjacency, CsrMatrix};
pub use graph::SpatialGraph;
