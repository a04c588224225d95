use anyhow::Result;
use geo::Coord;

use crate::{
    catalog::{Catalog, bounding_rect},
    geom::{Crs, FaultLines},
    io::svg::{Axes2d, LEGEND_WIDTH, draw_points, draw_polylines, padded, point_colors, write_legend},
};

use super::{PlotOptions, layout::{begin_figure, data_rect, plot_area, union_rect}};

const TITLE: &str = "Earthquake Clusters vs. Known Fault Lines";
const RADIUS: f64 = 3.0;
const ALPHA: f64 = 0.9;

/// Render cluster points against fault traces as SVG, in WGS84 lon/lat with equal aspect.
/// Catalog coordinates are read in `crs` and reprojected when it is not WGS84.
pub fn render_fault_overlay(
    catalog: &Catalog,
    crs: &Crs,
    column: &str,
    faults: &FaultLines,
    options: &PlotOptions,
) -> Result<String> {
    let labels = catalog.labels(column)?;
    let points = crs.to_wgs84(&catalog.coords())?;

    let bounds = data_rect(union_rect(faults.bounds(), bounding_rect(&points)));
    let area = plot_area(options);
    let axes = Axes2d::new(padded(bounds, 0.02), area, true);
    let project = move |coord: &Coord<f64>| axes.project(coord);

    if options.verbose > 1 {
        eprintln!("[plot] fault overlay: {} polylines, {} points in {crs}", faults.len(), points.len());
    }

    let mut writer = begin_figure(options, TITLE)?;
    axes.write_frame(&mut writer, "Longitude", "Latitude")?;
    draw_polylines(&mut writer, faults.lines(), &project)?;
    draw_points(&mut writer, &points, &point_colors(&labels), RADIUS, ALPHA, &project)?;

    let legend_x = axes.right() + 40.0;
    let legend_x = legend_x.min(options.width as f64 - LEGEND_WIDTH);
    write_legend(&mut writer, &labels, column, legend_x, area.min().y, area.height())?;

    writer.write_footer()?;
    writer.into_string()
}

/// Fetch the GEM active faults and overlay the catalog's clusters on them.
/// `crs` is the coordinate system of the catalog's longitude/latitude columns.
#[cfg(feature = "download")]
pub fn visualize_clusters_on_fault_lines(
    catalog: &Catalog,
    crs: &str,
    column: &str,
    options: &PlotOptions,
) -> Result<()> {
    let crs = Crs::parse(crs)?;
    catalog.labels(column)?;

    let faults = crate::geom::fetch_fault_lines(options.verbose)?;
    let body = render_fault_overlay(catalog, &crs, column, &faults, options)?;
    super::Document::new(super::DocumentKind::Svg, body).emit(options)
}
