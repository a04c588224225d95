use std::io::Write;

use anyhow::{Ok, Result};

use crate::{
    catalog::Catalog,
    io::svg::{
        Bounds3d, Camera3d, LEGEND_WIDTH, SvgStringWriter, cube_edges, escape_xml,
        format_tick, nice_ticks, point_colors, tick_step, write_legend,
    },
};

use super::{Document, DocumentKind, PlotOptions, layout::{begin_figure, plot_area}};

const TITLE: &str = "3D Cluster Visualization";
const AZIMUTH: f64 = -60.0;
const ELEVATION: f64 = 30.0;
const ALPHA: f64 = 0.6;
const RADIUS: f64 = 3.5;

/// Axis titles for x, y and z.
const AXIS_LABELS: [&str; 3] = ["Longitude", "Latitude", "Depth (km)"];

/// Render the static 3D view as SVG: an orthographic projection of (longitude, latitude, -depth)
/// inside its bounding box, colored by `column` on the viridis scale.
pub fn render_3d_static_svg(catalog: &Catalog, column: &str, options: &PlotOptions) -> Result<String> {
    let labels = catalog.labels(column)?;

    let points = (0..catalog.len())
        .map(|i| [catalog.longitudes()[i], catalog.latitudes()[i], -catalog.depths()[i]])
        .collect::<Vec<_>>();
    let bounds = Bounds3d::of(&points).unwrap_or(Bounds3d::UNIT);

    let area = plot_area(options);
    let center = ((area.min().x + area.max().x) / 2.0, (area.min().y + area.max().y) / 2.0);
    let camera = Camera3d::new(AZIMUTH, ELEVATION, 0.62 * area.width().min(area.height()), center);

    let mut writer = begin_figure(options, TITLE)?;
    write_box(&mut writer, &camera, &bounds, center)?;

    // Back to front, so nearer markers cover farther ones.
    let normalized = points.iter().map(|p| bounds.normalize(p)).collect::<Vec<_>>();
    let mut order = (0..normalized.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| camera.depth(&normalized[a]).total_cmp(&camera.depth(&normalized[b])));

    let colors = point_colors(&labels);
    for i in order {
        let (x, y) = camera.project(&normalized[i]);
        writeln!(writer, r#"<circle class="pt" cx="{x:.3}" cy="{y:.3}" r="{RADIUS}" fill="{}" fill-opacity="{ALPHA}"/>"#, colors[i])?;
    }

    let legend_x = options.width as f64 - options.margin as f64 - LEGEND_WIDTH + 30.0;
    write_legend(&mut writer, &labels, "Cluster ID", legend_x, area.min().y, area.height())?;

    writer.write_footer()?;
    if options.verbose > 1 { eprintln!("[plot] static 3d scatter: {} points", points.len()); }
    writer.into_string()
}

/// Static 3D scatter of the catalog colored by `column`.
pub fn visualize_3d_static(catalog: &Catalog, column: &str, options: &PlotOptions) -> Result<()> {
    let body = render_3d_static_svg(catalog, column, options)?;
    Document::new(DocumentKind::Svg, body).emit(options)
}

/// Draw the bounding box, tick labels along three outer edges and the axis titles.
fn write_box(writer: &mut SvgStringWriter, camera: &Camera3d, bounds: &Bounds3d, center: (f64, f64)) -> Result<()> {
    for (a, b) in cube_edges() {
        let (x1, y1) = camera.project(&a);
        let (x2, y2) = camera.project(&b);
        writeln!(writer, r#"<line class="box" x1="{x1:.3}" y1="{y1:.3}" x2="{x2:.3}" y2="{y2:.3}"/>"#)?;
    }

    // Ticks run along box edges on the viewer's side: x and y at the floor, z on a vertical edge.
    let anchors: [[f64; 3]; 3] = [[0.0, -0.5, -0.5], [0.5, 0.0, -0.5], [0.5, 0.5, 0.0]];

    for axis in 0..3 {
        let ticks = nice_ticks(bounds.min[axis], bounds.max[axis], 5);
        let step = tick_step(&ticks);
        for &t in &ticks {
            let mut data = [0, 1, 2].map(|k| (bounds.min[k] + bounds.max[k]) / 2.0);
            data[axis] = t;
            let mut p = bounds.normalize(&data);
            for k in 0..3 { if k != axis { p[k] = anchors[axis][k]; } }

            let (x, y) = outward(camera.project(&p), center, 12.0);
            writeln!(writer, r#"<text class="tick" x="{x:.3}" y="{:.3}" text-anchor="middle">{}</text>"#, y + 3.5, format_tick(t, step))?;
        }

        let (x, y) = outward(camera.project(&anchors[axis]), center, 34.0);
        writeln!(writer, r#"<text x="{x:.3}" y="{y:.3}" text-anchor="middle">{}</text>"#, escape_xml(AXIS_LABELS[axis]))?;
    }

    Ok(())
}

/// Move a screen point `distance` pixels further from `center`.
fn outward((x, y): (f64, f64), center: (f64, f64), distance: f64) -> (f64, f64) {
    let (dx, dy) = (x - center.0, y - center.1);
    let norm = dx.hypot(dy);
    if norm > 0.0 { (x + dx / norm * distance, y + dy / norm * distance) } else { (x, y + distance) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outward_moves_away_from_center() {
        assert_eq!(outward((10.0, 0.0), (0.0, 0.0), 5.0), (15.0, 0.0));
        assert_eq!(outward((0.0, 0.0), (0.0, 0.0), 5.0), (0.0, 5.0));
    }
}
