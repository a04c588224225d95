use anyhow::Result;
use geo::{Coord, Rect};

use crate::io::svg::{LEGEND_WIDTH, SvgStringWriter};

use super::PlotOptions;

/// Space kept left of the plot area for tick labels and the y-axis title.
const AXIS_GUTTER: f64 = 30.0;

/// Pixel rectangle left for the plot itself after margins, axis gutter and legend.
pub(super) fn plot_area(options: &PlotOptions) -> Rect<f64> {
    let (width, height, margin) = (options.width as f64, options.height as f64, options.margin as f64);
    let left = margin + AXIS_GUTTER;
    let right = (width - margin - LEGEND_WIDTH).max(left + 1.0);
    let bottom = (height - margin).max(margin + 1.0);
    Rect::new(Coord { x: left, y: margin }, Coord { x: right, y: bottom })
}

/// Start an SVG figure: header, styles and title.
pub(super) fn begin_figure(options: &PlotOptions, title: &str) -> Result<SvgStringWriter> {
    let (width, height) = (options.width as f64, options.height as f64);
    let mut writer = SvgStringWriter::new();
    writer.write_header(width, height)?;
    writer.write_styles()?;
    writer.write_title(width, title)?;
    Ok(writer)
}

/// Data extent to lay axes out on; an empty view gets the unit square.
pub(super) fn data_rect(bounds: Option<Rect<f64>>) -> Rect<f64> {
    bounds.unwrap_or_else(|| Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }))
}

/// Smallest rectangle covering both inputs.
pub(super) fn union_rect(a: Option<Rect<f64>>, b: Option<Rect<f64>>) -> Option<Rect<f64>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(Rect::new(
            Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        )),
        (a, b) => a.or(b),
    }
}
