use anyhow::Result;
use serde::Serialize;

use crate::{catalog::Catalog, io::{html::write_viewer_html, svg::viridis}};

use super::{Document, DocumentKind, PlotOptions};

const TITLE: &str = "Interactive Earthquake Clusters";

/// Diameter of the largest marker, in pixels.
const SIZE_MAX: f64 = 20.0;

/// Diameter of markers with zero or negative magnitude, in pixels.
const SIZE_MIN: f64 = 2.0;

#[derive(Serialize)]
struct ScatterPayload<'a> {
    title: &'a str,
    cluster_column: &'a str,
    axes: [&'a str; 3],
    clusters: &'a [String],
    colors: Vec<String>,
    points: Vec<ScatterPoint<'a>>,
}

#[derive(Serialize)]
struct ScatterPoint<'a> {
    x: f64,
    y: f64,
    z: f64,
    size: f64,
    magnitude: f64,
    cluster: u32,
    id: &'a str,
    place: &'a str,
}

/// Marker diameters with area proportional to magnitude; the largest magnitude gets `SIZE_MAX`.
fn marker_sizes(magnitudes: &[f64]) -> Vec<f64> {
    let max = magnitudes.iter().copied().fold(0.0_f64, f64::max);
    magnitudes.iter()
        .map(|&m| {
            if max > 0.0 { (SIZE_MAX * (m.max(0.0) / max).sqrt()).max(SIZE_MIN) } else { SIZE_MIN }
        })
        .collect()
}

/// Render the interactive 3D view as a self-contained HTML document.
/// Points sit at (longitude, latitude, -depth); the JSON payload holds one record per row.
pub fn render_3d_html(catalog: &Catalog, column: &str, options: &PlotOptions) -> Result<String> {
    let labels = catalog.labels(column)?;

    let sizes = marker_sizes(catalog.magnitudes());
    let points = (0..catalog.len())
        .map(|i| ScatterPoint {
            x: catalog.longitudes()[i],
            y: catalog.latitudes()[i],
            z: -catalog.depths()[i],
            size: sizes[i],
            magnitude: catalog.magnitudes()[i],
            cluster: labels.codes()[i],
            id: &catalog.ids()[i],
            place: &catalog.places()[i],
        })
        .collect::<Vec<_>>();

    if options.verbose > 1 {
        eprintln!("[plot] 3d scatter: {} points in {} clusters", points.len(), labels.num_clusters());
    }

    let payload = ScatterPayload {
        title: TITLE,
        cluster_column: column,
        axes: ["Longitude", "Latitude", "Depth (km)"],
        clusters: labels.names(),
        colors: (0..labels.num_clusters() as u32)
            .map(|code| viridis(labels.normalized(code)).hex())
            .collect(),
        points,
    };

    let mut out = Vec::new();
    write_viewer_html(&mut out, TITLE, options.width, options.height, &payload)?;
    Ok(String::from_utf8(out)?)
}

/// Interactive 3D scatter of the catalog colored by `column`, sized by magnitude.
pub fn visualize_3d(catalog: &Catalog, column: &str, options: &PlotOptions) -> Result<()> {
    let body = render_3d_html(catalog, column, options)?;
    Document::new(DocumentKind::Html, body).emit(options)
}
