use std::path::{Path, PathBuf};

use anyhow::Result;
use geo::Coord;

use crate::{
    catalog::Catalog,
    graph::{Adjacency, SpatialGraph},
    io::svg::{Axes2d, LEGEND_WIDTH, draw_edges, draw_points, padded, point_colors, write_legend},
};

use super::{CONNECTIVITY_FILE, Document, DocumentKind, PlotOptions, layout::{begin_figure, data_rect, plot_area}};

const TITLE: &str = "Spatial Graph Connectivity";
const RADIUS: f64 = 4.0;
const ALPHA: f64 = 0.9;

/// Render the spatial graph overlay as SVG: one faint line per undirected edge between
/// epicenters, under a scatter colored by `column`.
pub fn render_connectivity_svg(
    catalog: &Catalog,
    adjacency: &Adjacency,
    column: &str,
    options: &PlotOptions,
) -> Result<String> {
    let graph = SpatialGraph::from_adjacency(adjacency, catalog.len())?;
    let labels = catalog.labels(column)?;

    let coords = catalog.coords();
    let area = plot_area(options);
    let axes = Axes2d::new(padded(data_rect(catalog.bounds()), 0.05), area, false);
    let project = move |coord: &Coord<f64>| axes.project(coord);

    let edges = graph.edges()
        .filter(|&(i, j)| i != j)
        .map(|(i, j)| (coords[i], coords[j]))
        .collect::<Vec<_>>();

    if options.verbose > 1 {
        eprintln!("[plot] connectivity: {} nodes, {} edges drawn", graph.node_count(), edges.len());
    }

    let mut writer = begin_figure(options, TITLE)?;
    axes.write_frame(&mut writer, "Longitude", "Latitude")?;
    draw_edges(&mut writer, &edges, &project)?;
    draw_points(&mut writer, &coords, &point_colors(&labels), RADIUS, ALPHA, &project)?;

    let legend_x = options.width as f64 - options.margin as f64 - LEGEND_WIDTH + 30.0;
    write_legend(&mut writer, &labels, column, legend_x, area.min().y, area.height())?;

    writer.write_footer()?;
    writer.into_string()
}

/// Spatial graph overlay. With `persist`, the figure is written to
/// [`CONNECTIVITY_FILE`] in the current directory; otherwise it goes to `options.output`.
pub fn visualize_graph_connectivity(
    catalog: &Catalog,
    adjacency: &Adjacency,
    column: &str,
    persist: bool,
    options: &PlotOptions,
) -> Result<()> {
    let body = render_connectivity_svg(catalog, adjacency, column, options)?;
    let document = Document::new(DocumentKind::Svg, body);

    if persist {
        document.save(Path::new(CONNECTIVITY_FILE), options.verbose)
    } else {
        document.emit(options)
    }
}

/// Write the spatial graph overlay to [`CONNECTIVITY_FILE`] under `dir` and return its path.
pub fn save_graph_connectivity(
    catalog: &Catalog,
    adjacency: &Adjacency,
    column: &str,
    dir: &Path,
    options: &PlotOptions,
) -> Result<PathBuf> {
    let body = render_connectivity_svg(catalog, adjacency, column, options)?;
    let path = dir.join(CONNECTIVITY_FILE);
    Document::new(DocumentKind::Svg, body).save(&path, options.verbose)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use polars::prelude::*;

    use super::*;
    use crate::graph::CsrMatrix;

    fn triangle_catalog() -> Catalog {
        Catalog::new(df!(
            "longitude" => [-117.5, -117.4, -117.6],
            "latitude" => [35.7, 35.8, 35.9],
            "depth" => [5.0, 7.5, 3.2],
            "mag" => [2.1, 3.4, 1.0],
            "id" => ["ci1", "ci2", "ci3"],
            "place" => ["a", "b", "c"],
            "cluster" => [0i64, 0, 1],
        ).unwrap()).unwrap()
    }

    #[test]
    fn each_undirected_edge_is_drawn_once() {
        let adjacency = Adjacency::Dense(array![
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 0.0],
        ]);
        let svg = render_connectivity_svg(&triangle_catalog(), &adjacency, "cluster", &PlotOptions::default()).unwrap();
        assert_eq!(svg.matches(r#"<line class="edge""#).count(), 2);
        assert_eq!(svg.matches(r#"<circle class="pt""#).count(), 3);
        assert!(svg.contains(TITLE));
    }

    #[test]
    fn sparse_and_dense_render_identically() {
        let dense = Adjacency::Dense(array![
            [0.0, 2.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ]);
        let sparse = Adjacency::Sparse(CsrMatrix::from_triplets((3, 3), &[(0, 1, 2.0), (1, 0, 2.0)]).unwrap());
        let options = PlotOptions::default();
        let catalog = triangle_catalog();

        assert_eq!(
            render_connectivity_svg(&catalog, &dense, "cluster", &options).unwrap(),
            render_connectivity_svg(&catalog, &sparse, "cluster", &options).unwrap(),
        );
    }

    #[test]
    fn mis_sized_adjacency_is_a_shape_error() {
        let adjacency = Adjacency::Dense(array![[0.0, 1.0], [1.0, 0.0]]);
        let err = render_connectivity_svg(&triangle_catalog(), &adjacency, "cluster", &PlotOptions::default()).unwrap_err();
        assert!(err.to_string().contains("shape mismatch"), "{err}");
    }
}
