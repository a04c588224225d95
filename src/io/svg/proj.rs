use std::io::Write;

use anyhow::{Ok, Result, ensure};
use geo::{Coord, CoordsIter, LineString, Rect};

/// Projection function: data coords -> SVG coords (x,y)
pub(crate) type Projection<'a> = dyn Fn(&Coord<f64>) -> (f64, f64) + 'a;

/// A 2D plotting frame mapping a data rectangle onto a pixel rectangle (Y down).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Axes2d {
    data: Rect<f64>,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Axes2d {
    /// Fit `data` into the pixel `area`. With `equal_aspect`, one data unit spans the same
    /// number of pixels on both axes and the frame is centered in the area.
    pub(crate) fn new(data: Rect<f64>, area: Rect<f64>, equal_aspect: bool) -> Self {
        let (mut width, mut height) = (area.width(), area.height());
        let (mut left, mut top) = (area.min().x, area.min().y);

        if equal_aspect {
            let scale = (width / data.width()).min(height / data.height());
            let (fit_w, fit_h) = (data.width() * scale, data.height() * scale);
            left += (width - fit_w) / 2.0;
            top += (height - fit_h) / 2.0;
            width = fit_w;
            height = fit_h;
        }

        Self { data, left, top, width, height }
    }

    /// Map a data coordinate to SVG coords.
    #[inline]
    pub(crate) fn project(&self, coord: &Coord<f64>) -> (f64, f64) {
        let x = self.left + (coord.x - self.data.min().x) / self.data.width() * self.width;
        let y = self.top + (self.data.max().y - coord.y) / self.data.height() * self.height; // invert vertically
        (x, y)
    }

    /// Right edge of the frame in pixels.
    #[inline] pub(crate) fn right(&self) -> f64 { self.left + self.width }

    /// Draw the frame, tick marks with labels, and axis labels.
    pub(crate) fn write_frame(&self, writer: &mut impl Write, xlabel: &str, ylabel: &str) -> Result<()> {
        let (left, top, bottom) = (self.left, self.top, self.top + self.height);
        writeln!(writer, r#"<rect class="frame" x="{left:.3}" y="{top:.3}" width="{:.3}" height="{:.3}"/>"#, self.width, self.height)?;

        let (xmin, xmax) = (self.data.min().x, self.data.max().x);
        let xticks = nice_ticks(xmin, xmax, 6);
        let xstep = tick_step(&xticks);
        for &t in &xticks {
            let (x, _) = self.project(&Coord { x: t, y: self.data.min().y });
            writeln!(writer, r#"<line class="grid" x1="{x:.3}" y1="{bottom:.3}" x2="{x:.3}" y2="{:.3}"/>"#, bottom + 4.0)?;
            writeln!(writer, r#"<text class="tick" x="{x:.3}" y="{:.3}" text-anchor="middle">{}</text>"#, bottom + 16.0, format_tick(t, xstep))?;
        }

        let (ymin, ymax) = (self.data.min().y, self.data.max().y);
        let yticks = nice_ticks(ymin, ymax, 6);
        let ystep = tick_step(&yticks);
        for &t in &yticks {
            let (_, y) = self.project(&Coord { x: self.data.min().x, y: t });
            writeln!(writer, r#"<line class="grid" x1="{:.3}" y1="{y:.3}" x2="{left:.3}" y2="{y:.3}"/>"#, left - 4.0)?;
            writeln!(writer, r#"<text class="tick" x="{:.3}" y="{:.3}" text-anchor="end">{}</text>"#, left - 6.0, y + 3.5, format_tick(t, ystep))?;
        }

        writeln!(writer, r#"<text x="{:.3}" y="{:.3}" text-anchor="middle">{}</text>"#,
            left + self.width / 2.0, bottom + 36.0, super::escape_xml(xlabel))?;
        let (lx, ly) = (left - 46.0, top + self.height / 2.0);
        writeln!(writer, r#"<text x="{lx:.3}" y="{ly:.3}" text-anchor="middle" transform="rotate(-90 {lx:.3} {ly:.3})">{}</text>"#,
            super::escape_xml(ylabel))?;

        Ok(())
    }
}

/// Grow a rectangle by `frac` of its size on every side; degenerate extents grow by 0.5 units.
pub(crate) fn padded(rect: Rect<f64>, frac: f64) -> Rect<f64> {
    let pad = |extent: f64| if extent > 0.0 { extent * frac } else { 0.5 };
    let (px, py) = (pad(rect.width()), pad(rect.height()));
    Rect::new(
        Coord { x: rect.min().x - px, y: rect.min().y - py },
        Coord { x: rect.max().x + px, y: rect.max().y + py },
    )
}

/// Round-number tick positions covering [lo, hi], roughly `target` of them.
pub(crate) fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo || target < 2 { return vec![lo] }

    let raw = (hi - lo) / (target - 1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0].iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Spacing of a tick sequence (1.0 when there is only one tick).
pub(crate) fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

/// Format a tick value with as many decimals as its step needs.
pub(crate) fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 { 0 } else { (-step.log10()).ceil() as usize };
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value }; // avoid "-0"
    format!("{value:.decimals$}")
}

/// Draw straight edges between pairs of data coordinates.
pub(crate) fn draw_edges(
    writer: &mut impl Write,
    edges: &[(Coord<f64>, Coord<f64>)],
    project: &Projection<'_>,
) -> Result<()> {
    for (a, b) in edges {
        let (x1, y1) = project(a);
        let (x2, y2) = project(b);
        writeln!(writer, r##"<line class="edge" x1="{x1:.3}" y1="{y1:.3}" x2="{x2:.3}" y2="{y2:.3}"/>"##)?;
    }
    Ok(())
}

/// Draw open polylines as compact SVG paths.
pub(crate) fn draw_polylines(writer: &mut impl Write, lines: &[LineString<f64>], project: &Projection<'_>) -> Result<()> {
    for line in lines {
        let path = line_to_path(line, project);
        if !path.is_empty() {
            writeln!(writer, r#"<path class="fault" d="{path}"/>"#)?;
        }
    }
    Ok(())
}

/// Draw filled circles at data coordinates.
pub(crate) fn draw_points(
    writer: &mut impl Write,
    coords: &[Coord<f64>],
    colors: &[String],
    radius: f64,
    opacity: f64,
    project: &Projection<'_>,
) -> Result<()> {
    ensure!(colors.len() == coords.len(),
        "[draw_points] length mismatch: {} colors for {} points",
        colors.len(),
        coords.len(),
    );

    for (coord, color) in coords.iter().zip(colors) {
        let (x, y) = project(coord);
        writeln!(writer, r#"<circle class="pt" cx="{x:.3}" cy="{y:.3}" r="{radius}" fill="{color}" fill-opacity="{opacity}"/>"#)?;
    }
    Ok(())
}

/// Build a compact SVG path string for an open LineString: "M x,y L x,y ..."
fn line_to_path(line: &LineString<f64>, project: &Projection<'_>) -> String {
    let mut out = String::new();

    let mut coords = line.coords_iter()
        .map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!("M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
    }

    out
}
