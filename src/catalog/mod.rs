mod catalog;
mod labels;

pub use catalog::Catalog;
pub(crate) use catalog::bounding_rect;
pub use labels::ClusterLabels;
