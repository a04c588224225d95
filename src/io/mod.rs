//! IO module for format-specific reading and writing operations.
//!
//! Each format module handles one file format, independent of which view uses it.
//!
//! # Format Modules
//!
//! - `csv` - CSV format for catalogs, edge lists and dense matrices
//! - `geojson` - GeoJSON parsing for fault-line geometry
//! - `svg` - SVG format for static chart export
//! - `html` - Self-contained HTML for the interactive 3D viewer

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod html;
pub(crate) mod svg;
