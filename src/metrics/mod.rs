mod silhouette;

pub use silhouette::{report_silhouette_score, silhouette_samples, silhouette_score, write_silhouette_score};
